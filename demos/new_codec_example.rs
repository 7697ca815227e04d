// Example demonstrating the codec architecture: encode a PDU, then decode it
// back via the registry.

use smpp_esme::codec::{CodecError, Encodable, Frame, PduHeader, PduRegistry};
use smpp_esme::datatypes::{CommandStatus, EnquireLink, EnquireLinkResponse};
use std::io::Cursor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SMPP Codec Architecture Demo");
    println!("============================");

    // 1. Create PDUs using the generated constructors
    let enquire_link = EnquireLink::new(42);
    let enquire_response = EnquireLinkResponse::error(42, CommandStatus::SystemError);

    println!("Created PDUs:");
    println!("  EnquireLink: seq={}", enquire_link.sequence_number);
    println!(
        "  EnquireLinkResponse: seq={}, status={:?}",
        enquire_response.sequence_number, enquire_response.command_status
    );

    // 2. Encode PDUs via the Encodable trait
    let link_bytes = enquire_link.to_bytes();
    let response_bytes = enquire_response.to_bytes();

    println!("\nEncoded sizes:");
    println!("  EnquireLink: {} bytes", link_bytes.len());
    println!("  EnquireLinkResponse: {} bytes", response_bytes.len());

    // 3. Decode using the registry
    let registry = PduRegistry::new();

    let mut cursor = Cursor::new(link_bytes.as_ref());
    let header = PduHeader::decode(&mut cursor)?;
    let frame = registry.decode_pdu(header, &mut cursor)?;

    match frame {
        Frame::EnquireLink(pdu) => {
            println!("\nDecoded EnquireLink: seq={}", pdu.sequence_number);
        }
        _ => println!("Unexpected frame type"),
    }

    let mut cursor = Cursor::new(response_bytes.as_ref());
    let header = PduHeader::decode(&mut cursor)?;
    let frame = registry.decode_pdu(header, &mut cursor)?;

    match frame {
        Frame::EnquireLinkResp(pdu) => {
            println!(
                "Decoded EnquireLinkResponse: seq={}, status={:?}",
                pdu.sequence_number, pdu.command_status
            );
        }
        _ => println!("Unexpected frame type"),
    }

    println!("\nCodec Architecture Benefits:");
    println!("  Clean separation of encoding/decoding logic");
    println!("  Each PDU implements Encodable/Decodable traits");
    println!("  Registry-based dispatch for extensibility");
    println!("  Forward compatibility with unknown PDUs");
    println!("  Structured CodecError instead of string errors");

    // 4. Demonstrate error handling on a malformed header
    println!("\nError Handling Demo:");

    let invalid_data = [0x00, 0x00, 0x00, 0x08]; // command_length below the minimum header size
    let mut cursor = Cursor::new(&invalid_data[..]);

    match PduHeader::decode(&mut cursor) {
        Err(CodecError::InvalidPduLength { length, min, max }) => {
            println!("Caught invalid PDU length: {length} (valid range: {min}-{max})");
        }
        other => println!("Unexpected result: {other:?}"),
    }

    println!("\nDemo completed successfully!");
    Ok(())
}
