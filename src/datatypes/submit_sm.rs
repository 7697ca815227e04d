use crate::datatypes::{
    AddressError, CommandId, CommandStatus, DataCoding, DestinationAddr, EsmClass, MessageId,
    NumericPlanIndicator, ScheduleDeliveryTime, ServiceType, ShortMessage, SourceAddr, Tlv,
    TypeOfNumber, ValidityPeriod,
};
use bytes::{Buf, BufMut, BytesMut};
use std::io::Cursor;
use thiserror::Error;

use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_u8, encode_cstring,
    encode_u8,
};

/// Validation errors for SubmitSm PDU
#[derive(Debug, Error)]
pub enum SubmitSmValidationError {
    #[error("Service type error: {0}")]
    ServiceType(#[from] crate::datatypes::ServiceTypeError),
    #[error("Source address error: {0}")]
    SourceAddr(#[from] AddressError),
    #[error("Data coding error: {0}")]
    DataCoding(#[from] crate::datatypes::DataCodingError),
    #[error("ESM class error: {0}")]
    EsmClass(#[from] crate::datatypes::EsmClassError),
    #[error(
        "sm_length ({sm_length}) does not match short_message length ({message_length})"
    )]
    SmLengthMismatch { sm_length: u8, message_length: usize },
}

/// SMPP v3.4 submit_sm PDU (Section 4.4.1).
///
/// This operation is used by an ESME to submit a short message to the SMSC
/// for onward transmission to a specified short message entity (SME).
/// submit_sm does not support the transaction message mode.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitSm {
    pub command_status: CommandStatus,
    pub sequence_number: u32,

    // Mandatory parameters
    pub service_type: ServiceType,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: SourceAddr,
    pub dest_addr_ton: TypeOfNumber,
    pub dest_addr_npi: NumericPlanIndicator,
    pub destination_addr: DestinationAddr,
    pub esm_class: EsmClass,
    pub protocol_id: u8,
    pub priority_flag: u8,
    pub schedule_delivery_time: ScheduleDeliveryTime,
    pub validity_period: ValidityPeriod,
    pub registered_delivery: u8,
    pub replace_if_present_flag: u8,
    pub data_coding: DataCoding,
    pub sm_default_msg_id: u8,
    pub sm_length: u8,
    pub short_message: ShortMessage,

    /// Optional TLV parameters: user_message_reference, source_port,
    /// destination_port, sar_* (concatenation), payload_type,
    /// message_payload, privacy_indicator, callback_num and friends,
    /// language_indicator, its_reply_type/its_session_info, ussd_service_op.
    pub optional_parameters: Vec<Tlv>,
}

impl SubmitSm {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence_number: u32,
        service_type: ServiceType,
        source_addr_ton: TypeOfNumber,
        source_addr_npi: NumericPlanIndicator,
        source_addr: SourceAddr,
        dest_addr_ton: TypeOfNumber,
        dest_addr_npi: NumericPlanIndicator,
        destination_addr: DestinationAddr,
        esm_class: EsmClass,
        registered_delivery: u8,
        data_coding: DataCoding,
        short_message: ShortMessage,
    ) -> Result<Self, SubmitSmValidationError> {
        let sm_length = short_message.len();
        let pdu = SubmitSm {
            command_status: CommandStatus::Ok,
            sequence_number,
            service_type,
            source_addr_ton,
            source_addr_npi,
            source_addr,
            dest_addr_ton,
            dest_addr_npi,
            destination_addr,
            esm_class,
            protocol_id: 0,
            priority_flag: 0,
            schedule_delivery_time: ScheduleDeliveryTime::immediate(),
            validity_period: ValidityPeriod::immediate(),
            registered_delivery,
            replace_if_present_flag: 0,
            data_coding,
            sm_default_msg_id: 0,
            sm_length,
            short_message,
            optional_parameters: Vec::new(),
        };
        pdu.validate()?;
        Ok(pdu)
    }

    /// Add a message payload TLV, for messages that exceed the 254-octet
    /// short_message field.
    pub fn add_message_payload(&mut self, payload: &[u8]) {
        let tlv = Tlv {
            tag: crate::datatypes::tlv::tags::MESSAGE_PAYLOAD,
            length: payload.len() as u16,
            value: bytes::Bytes::copy_from_slice(payload),
        };
        self.optional_parameters.push(tlv);
    }

    /// Add SAR (Segmentation and Reassembly) parameters for a concatenated
    /// multipart message.
    pub fn add_sar_parameters(&mut self, msg_ref: u16, total_segments: u8, segment_seq: u8) {
        self.optional_parameters.push(Tlv {
            tag: crate::datatypes::tlv::tags::SAR_MSG_REF_NUM,
            length: 2,
            value: bytes::Bytes::copy_from_slice(&msg_ref.to_be_bytes()),
        });
        self.optional_parameters.push(Tlv {
            tag: crate::datatypes::tlv::tags::SAR_TOTAL_SEGMENTS,
            length: 1,
            value: bytes::Bytes::copy_from_slice(&[total_segments]),
        });
        self.optional_parameters.push(Tlv {
            tag: crate::datatypes::tlv::tags::SAR_SEGMENT_SEQNUM,
            length: 1,
            value: bytes::Bytes::copy_from_slice(&[segment_seq]),
        });
    }

    pub fn add_tlv(&mut self, tlv: Tlv) {
        self.optional_parameters.push(tlv);
    }

    pub fn message_payload(&self) -> Option<&bytes::Bytes> {
        self.optional_parameters
            .iter()
            .find(|tlv| tlv.tag == crate::datatypes::tlv::tags::MESSAGE_PAYLOAD)
            .map(|tlv| &tlv.value)
    }

    fn validate(&self) -> Result<(), SubmitSmValidationError> {
        if self.sm_length as usize != self.short_message.len() as usize {
            return Err(SubmitSmValidationError::SmLengthMismatch {
                sm_length: self.sm_length,
                message_length: self.short_message.len() as usize,
            });
        }
        Ok(())
    }
}

impl Encodable for SubmitSm {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        self.validate().map_err(|e| CodecError::FieldValidation {
            field: "submit_sm",
            reason: e.to_string(),
        })?;

        let header = PduHeader {
            command_length: 0, // fixed up by Encodable::to_bytes
            command_id: CommandId::SubmitSm,
            command_status: self.command_status,
            sequence_number: self.sequence_number,
        };
        header.encode(buf)?;

        encode_cstring(buf, self.service_type.as_str(), 6);
        encode_u8(buf, self.source_addr_ton as u8);
        encode_u8(buf, self.source_addr_npi as u8);
        encode_cstring(buf, self.source_addr.as_str().unwrap_or(""), 21);
        encode_u8(buf, self.dest_addr_ton as u8);
        encode_u8(buf, self.dest_addr_npi as u8);
        encode_cstring(buf, self.destination_addr.as_str().unwrap_or(""), 21);
        encode_u8(buf, self.esm_class.to_byte());
        encode_u8(buf, self.protocol_id);
        encode_u8(buf, self.priority_flag);
        encode_cstring(buf, self.schedule_delivery_time.as_str().unwrap_or(""), 17);
        encode_cstring(buf, self.validity_period.as_str().unwrap_or(""), 17);
        encode_u8(buf, self.registered_delivery);
        encode_u8(buf, self.replace_if_present_flag);
        encode_u8(buf, self.data_coding.to_byte());
        encode_u8(buf, self.sm_default_msg_id);
        encode_u8(buf, self.sm_length);

        let message_bytes = self.short_message.as_bytes();
        buf.extend_from_slice(&message_bytes[..(self.sm_length as usize).min(message_bytes.len())]);

        for tlv in &self.optional_parameters {
            tlv.encode(buf)?;
        }

        Ok(())
    }

    fn encoded_size(&self) -> usize {
        let mut size = PduHeader::SIZE + 6 + 1 + 1 + 21 + 1 + 1 + 21 + 1 + 1 + 1 + 17 + 17 + 1 + 1 + 1 + 1 + 1;
        size += self.sm_length as usize;
        for tlv in &self.optional_parameters {
            size += tlv.encoded_size();
        }
        size
    }
}

impl Decodable for SubmitSm {
    fn command_id() -> CommandId {
        CommandId::SubmitSm
    }

    fn decode(header: PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(&header)?;

        let service_type_str = decode_cstring(buf, 6, "service_type")?;
        let service_type =
            ServiceType::new(&service_type_str).map_err(|e| CodecError::FieldValidation {
                field: "service_type",
                reason: e.to_string(),
            })?;

        let source_addr_ton =
            TypeOfNumber::try_from(decode_u8(buf)?).map_err(|_| CodecError::FieldValidation {
                field: "source_addr_ton",
                reason: "Invalid TypeOfNumber value".to_string(),
            })?;

        let source_addr_npi = NumericPlanIndicator::try_from(decode_u8(buf)?).map_err(|_| {
            CodecError::FieldValidation {
                field: "source_addr_npi",
                reason: "Invalid NumericPlanIndicator value".to_string(),
            }
        })?;

        let source_addr_str = decode_cstring(buf, 21, "source_addr")?;
        let source_addr = SourceAddr::from_parsed_string(source_addr_str).map_err(|e| {
            CodecError::FieldValidation {
                field: "source_addr",
                reason: e.to_string(),
            }
        })?;

        let dest_addr_ton =
            TypeOfNumber::try_from(decode_u8(buf)?).map_err(|_| CodecError::FieldValidation {
                field: "dest_addr_ton",
                reason: "Invalid TypeOfNumber value".to_string(),
            })?;

        let dest_addr_npi = NumericPlanIndicator::try_from(decode_u8(buf)?).map_err(|_| {
            CodecError::FieldValidation {
                field: "dest_addr_npi",
                reason: "Invalid NumericPlanIndicator value".to_string(),
            }
        })?;

        let destination_addr_str = decode_cstring(buf, 21, "destination_addr")?;
        let destination_addr =
            DestinationAddr::from_parsed_string(destination_addr_str).map_err(|e| {
                CodecError::FieldValidation {
                    field: "destination_addr",
                    reason: e.to_string(),
                }
            })?;

        let esm_class_byte = decode_u8(buf)?;
        let esm_class = EsmClass::from_byte(esm_class_byte).map_err(|e| {
            CodecError::FieldValidation {
                field: "esm_class",
                reason: e.to_string(),
            }
        })?;

        let protocol_id = decode_u8(buf)?;
        let priority_flag = decode_u8(buf)?;

        let schedule_delivery_time_str = decode_cstring(buf, 17, "schedule_delivery_time")?;
        let schedule_delivery_time = ScheduleDeliveryTime::from_parsed_string(
            schedule_delivery_time_str,
        )
        .map_err(|e| CodecError::FieldValidation {
            field: "schedule_delivery_time",
            reason: e.to_string(),
        })?;

        let validity_period_str = decode_cstring(buf, 17, "validity_period")?;
        let validity_period =
            ValidityPeriod::from_parsed_string(validity_period_str).map_err(|e| {
                CodecError::FieldValidation {
                    field: "validity_period",
                    reason: e.to_string(),
                }
            })?;

        let registered_delivery = decode_u8(buf)?;
        let replace_if_present_flag = decode_u8(buf)?;

        let data_coding_byte = decode_u8(buf)?;
        let data_coding = DataCoding::from_byte(data_coding_byte);

        let sm_default_msg_id = decode_u8(buf)?;
        let sm_length = decode_u8(buf)?;

        if buf.remaining() < sm_length as usize {
            return Err(CodecError::Incomplete);
        }
        let mut message_bytes = vec![0u8; sm_length as usize];
        buf.copy_to_slice(&mut message_bytes);
        let short_message =
            ShortMessage::new(&message_bytes).map_err(|e| CodecError::FieldValidation {
                field: "short_message",
                reason: e.to_string(),
            })?;

        let mut optional_parameters = Vec::new();
        while buf.remaining() > 0 {
            match Tlv::decode(buf) {
                Ok(tlv) => optional_parameters.push(tlv),
                Err(CodecError::Incomplete) => break,
                Err(e) => return Err(e),
            }
        }

        Ok(SubmitSm {
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            service_type,
            source_addr_ton,
            source_addr_npi,
            source_addr,
            dest_addr_ton,
            dest_addr_npi,
            destination_addr,
            esm_class,
            protocol_id,
            priority_flag,
            schedule_delivery_time,
            validity_period,
            registered_delivery,
            replace_if_present_flag,
            data_coding,
            sm_default_msg_id,
            sm_length,
            short_message,
            optional_parameters,
        })
    }
}

/// Validation errors for SubmitSmResponse PDU
#[derive(Debug, Error)]
pub enum SubmitSmResponseValidationError {
    #[error("Message ID error: {0}")]
    MessageId(#[from] crate::datatypes::FixedStringError),
}

/// SMPP v3.4 submit_sm_resp PDU (Section 4.4.2).
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitSmResponse {
    pub command_status: CommandStatus,
    pub sequence_number: u32,

    /// Message ID assigned by the SMSC. Empty on a non-zero command_status.
    pub message_id: MessageId,
}

impl SubmitSmResponse {
    pub fn success(sequence_number: u32, message_id: MessageId) -> Self {
        SubmitSmResponse {
            command_status: CommandStatus::Ok,
            sequence_number,
            message_id,
        }
    }

    pub fn error(sequence_number: u32, command_status: CommandStatus) -> Self {
        SubmitSmResponse {
            command_status,
            sequence_number,
            message_id: MessageId::default(),
        }
    }
}

impl Encodable for SubmitSmResponse {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        let header = PduHeader {
            command_length: 0,
            command_id: CommandId::SubmitSmResp,
            command_status: self.command_status,
            sequence_number: self.sequence_number,
        };
        header.encode(buf)?;

        encode_cstring(buf, self.message_id.as_str().unwrap_or(""), 65);

        Ok(())
    }

    fn encoded_size(&self) -> usize {
        PduHeader::SIZE + 65
    }
}

impl Decodable for SubmitSmResponse {
    fn command_id() -> CommandId {
        CommandId::SubmitSmResp
    }

    fn decode(header: PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(&header)?;

        let message_id_str = decode_cstring(buf, 65, "message_id")?;
        let message_id = MessageId::from_parsed_string(message_id_str).map_err(|e| {
            CodecError::FieldValidation {
                field: "message_id",
                reason: e.to_string(),
            }
        })?;

        Ok(SubmitSmResponse {
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            message_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PduRegistry;

    fn sample_submit_sm(sequence_number: u32) -> SubmitSm {
        SubmitSm::new(
            sequence_number,
            ServiceType::new("").unwrap(),
            TypeOfNumber::Unknown,
            NumericPlanIndicator::Unknown,
            SourceAddr::new("1000", TypeOfNumber::Unknown).unwrap(),
            TypeOfNumber::Unknown,
            NumericPlanIndicator::Unknown,
            DestinationAddr::new("2000", TypeOfNumber::Unknown).unwrap(),
            EsmClass::default(),
            0,
            DataCoding::default(),
            ShortMessage::new(b"hi").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn encode_submit_sm_matches_scenario() {
        // spec testable scenario 1: source_addr="1000", destination_addr="2000",
        // short_message=b"hi", sequence 7.
        let pdu = sample_submit_sm(7);
        let bytes = pdu.to_bytes();

        let total_length = bytes.len() as u32;
        assert_eq!(&bytes[0..4], &total_length.to_be_bytes());
        assert_eq!(&bytes[4..8], &(CommandId::SubmitSm as u32).to_be_bytes());
        assert_eq!(&bytes[12..16], &7u32.to_be_bytes());
    }

    #[test]
    fn submit_sm_roundtrip() {
        let original = sample_submit_sm(42);
        let bytes = original.to_bytes();

        let registry = PduRegistry::new();
        let mut cursor = Cursor::new(bytes.as_ref());
        let frame = crate::codec::Frame::parse(&registry, &mut cursor).unwrap();

        if let crate::codec::Frame::SubmitSm(decoded) = frame {
            assert_eq!(*decoded, original);
        } else {
            panic!("Expected SubmitSm frame");
        }
    }

    #[test]
    fn submit_sm_sm_length_mismatch_rejected() {
        let mut pdu = sample_submit_sm(1);
        pdu.sm_length = 99;
        assert!(matches!(
            pdu.validate(),
            Err(SubmitSmValidationError::SmLengthMismatch { .. })
        ));
    }

    #[test]
    fn decode_submit_sm_resp_scenario() {
        // spec testable scenario 2: 17-byte SUBMIT_SM_RESP frame with
        // status 14, sequence 7, empty message_id.
        let bytes: [u8; 17] = [
            0x00, 0x00, 0x00, 0x11, 0x80, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x0e, 0x00, 0x00,
            0x00, 0x07, 0x00,
        ];

        let registry = PduRegistry::new();
        let mut cursor = Cursor::new(&bytes[..]);
        let frame = crate::codec::Frame::parse(&registry, &mut cursor).unwrap();

        if let crate::codec::Frame::SubmitSmResp(resp) = frame {
            assert_eq!(resp.command_status, CommandStatus::InvalidPassword);
            assert_eq!(resp.command_status as u32, 14);
            assert_eq!(resp.sequence_number, 7);
            assert_eq!(resp.message_id.as_str().unwrap_or(""), "");
        } else {
            panic!("Expected SubmitSmResp frame");
        }
    }

    #[test]
    fn submit_sm_response_success_and_error() {
        let ok = SubmitSmResponse::success(5, MessageId::from_parsed_string("MSG1".into()).unwrap());
        assert_eq!(ok.command_status, CommandStatus::Ok);
        assert_eq!(ok.message_id.as_str().unwrap(), "MSG1");

        let err = SubmitSmResponse::error(6, CommandStatus::InvalidDestinationAddress);
        assert_eq!(err.command_status, CommandStatus::InvalidDestinationAddress);
        assert_eq!(err.message_id.as_str().unwrap_or(""), "");
    }

    #[test]
    fn submit_sm_message_payload_tlv() {
        let mut pdu = sample_submit_sm(1);
        pdu.add_message_payload(b"a long message that exceeds short_message capacity");
        assert_eq!(pdu.optional_parameters.len(), 1);
        assert_eq!(
            pdu.message_payload().unwrap().as_ref(),
            b"a long message that exceeds short_message capacity"
        );
    }
}
