// ABOUTME: Provides stream-based connection management for SMPP v3.4 protocol communication
// ABOUTME: Implements frame-based I/O with buffering, generic over any AsyncRead + AsyncWrite transport

use crate::codec::{CodecError, Encodable, Frame, PduHeader, PduRegistry};
use bytes::{Buf, BytesMut};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};

/// SMPP v3.4 Connection Management
///
/// Handles frame-based communication over a byte stream for SMPP protocol sessions.
/// This implements the transport layer for SMPP v3.4 as defined in Section 2.1
/// of the specification.
///
/// `Connection` is generic over `S: AsyncRead + AsyncWrite + Unpin` rather than
/// hard-wired to `tokio::net::TcpStream`, so the session engine's lifecycle can be
/// exercised in tests over `tokio::io::duplex` without a real socket.
///
/// ## SMPP v3.4 Session States (Section 2.1)
///
/// An SMPP session progresses through the following states:
///
/// ```text
/// CLOSED → OPEN → BOUND_TX/BOUND_RX/BOUND_TRX → UNBOUND → CLOSED
/// ```
///
/// ## Implementation Notes
/// This `Connection` handles the transport layer (frame I/O) but does not track
/// session state; `crate::session` owns the bind-state machine and sequences
/// operations on top of this type.
#[derive(Debug)]
pub struct Connection<S> {
    stream: BufWriter<S>,
    buffer: BytesMut,
    registry: PduRegistry,
}

/// Errors a `Connection` can produce while reading or writing frames.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("connection reset by peer")]
    ResetByPeer,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Create a new `Connection`, backed by `stream`. Read and write buffers
    /// are initialized, and the standard SMPP v3.4 PDU registry is installed.
    pub fn new(stream: S) -> Connection<S> {
        Connection {
            stream: BufWriter::new(stream),
            // A 4KB read buffer is a reasonable default; callers that expect
            // large submit_sm/data_sm payloads may want to tune this.
            buffer: BytesMut::with_capacity(4 * 1024),
            registry: PduRegistry::new(),
        }
    }

    /// Create a new `Connection` using a caller-supplied registry, e.g. one
    /// extended via [`crate::schema::define_optional_param`] for vendor TLVs.
    pub fn with_registry(stream: S, registry: PduRegistry) -> Connection<S> {
        Connection {
            stream: BufWriter::new(stream),
            buffer: BytesMut::with_capacity(4 * 1024),
            registry,
        }
    }

    /// Read a single `Frame` value from the underlying stream.
    ///
    /// The function waits until it has retrieved enough data to parse a frame.
    /// Any data remaining in the read buffer after the frame has been parsed is
    /// kept there for the next call to `read_frame`.
    ///
    /// On success, the received frame is returned. If the stream is closed in
    /// a way that doesn't break a frame in half, `Ok(None)` is returned.
    pub async fn read_frame(&mut self) -> Result<Option<Frame>, ConnectionError> {
        loop {
            if let Some(frame) = self.parse_frame()? {
                return Ok(Some(frame));
            }

            if 0 == self.stream.read_buf(&mut self.buffer).await? {
                return if self.buffer.is_empty() {
                    Ok(None)
                } else {
                    Err(ConnectionError::ResetByPeer)
                };
            }
        }
    }

    /// Tries to parse a frame from the buffer. If the buffer contains enough
    /// data, the frame is returned and the data removed from the buffer. If not
    /// enough data has been buffered yet, `Ok(None)` is returned.
    fn parse_frame(&mut self) -> Result<Option<Frame>, ConnectionError> {
        let mut buf = std::io::Cursor::new(&self.buffer[..]);

        match Frame::check(&mut buf) {
            Ok(()) => {
                let command_length =
                    u32::from_be_bytes(self.buffer[..4].try_into().expect("checked above"));
                let len = command_length as usize;

                buf.set_position(0);
                let frame = Frame::parse(&self.registry, &mut buf)?;

                self.buffer.advance(len);
                Ok(Some(frame))
            }
            Err(CodecError::Incomplete) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a single `Frame` value to the underlying stream.
    pub async fn write_frame(&mut self, frame: &Frame) -> Result<(), ConnectionError> {
        let bytes = match frame {
            Frame::EnquireLink(pdu) => pdu.to_bytes(),
            Frame::EnquireLinkResp(pdu) => pdu.to_bytes(),
            Frame::Unbind(pdu) => pdu.to_bytes(),
            Frame::UnbindResp(pdu) => pdu.to_bytes(),
            Frame::BindReceiver(pdu) => pdu.to_bytes(),
            Frame::BindReceiverResp(pdu) => pdu.to_bytes(),
            Frame::BindTransceiver(pdu) => pdu.to_bytes(),
            Frame::BindTransceiverResp(pdu) => pdu.to_bytes(),
            Frame::BindTransmitter(pdu) => pdu.to_bytes(),
            Frame::BindTransmitterResp(pdu) => pdu.to_bytes(),
            Frame::SubmitSm(pdu) => pdu.to_bytes(),
            Frame::SubmitSmResp(pdu) => pdu.to_bytes(),
            Frame::SubmitMulti(pdu) => pdu.to_bytes(),
            Frame::SubmitMultiResp(pdu) => pdu.to_bytes(),
            Frame::QuerySm(pdu) => pdu.to_bytes(),
            Frame::QuerySmResp(pdu) => pdu.to_bytes(),
            Frame::ReplaceSm(pdu) => pdu.to_bytes(),
            Frame::ReplaceSmResp(pdu) => pdu.to_bytes(),
            Frame::CancelSm(pdu) => pdu.to_bytes(),
            Frame::CancelSmResp(pdu) => pdu.to_bytes(),
            Frame::DataSm(pdu) => pdu.to_bytes(),
            Frame::DataSmResp(pdu) => pdu.to_bytes(),
            Frame::DeliverSm(pdu) => pdu.to_bytes(),
            Frame::DeliverSmResp(pdu) => pdu.to_bytes(),
            Frame::AlertNotification(pdu) => pdu.to_bytes(),
            Frame::GenericNack(pdu) => pdu.to_bytes(),
            Frame::Outbind(pdu) => pdu.to_bytes(),
            Frame::Unknown { .. } => {
                return Err(ConnectionError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "cannot write an unknown frame back to the wire",
                )));
            }
        };

        tracing::debug!(
            command_id = ?frame.command_id(),
            sequence_number = frame.sequence_number(),
            len = bytes.len(),
            "writing frame"
        );

        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::EnquireLink;

    #[tokio::test]
    async fn write_then_read_frame_over_duplex() {
        let (client, server) = tokio::io::duplex(1024);
        let mut client_conn = Connection::new(client);
        let mut server_conn = Connection::new(server);

        let frame = Frame::EnquireLink(EnquireLink::new(99));
        client_conn.write_frame(&frame).await.unwrap();

        let received = server_conn.read_frame().await.unwrap().unwrap();
        assert_eq!(received.sequence_number(), 99);
        assert!(matches!(received, Frame::EnquireLink(_)));
    }

    #[tokio::test]
    async fn read_frame_returns_none_on_clean_close() {
        let (client, server) = tokio::io::duplex(1024);
        drop(client);
        let mut server_conn = Connection::new(server);
        assert!(server_conn.read_frame().await.unwrap().is_none());
    }
}
