// ABOUTME: The stateful SMPP session engine: binds, sequencing, dispatch, and auto-responses
// ABOUTME: Generic over any AsyncRead+AsyncWrite transport so tests can drive it without a socket

//! The session engine (spec Section 4.2): owns the connection, drives the
//! bind/unbind state machine, allocates sequence numbers, dispatches
//! incoming PDUs to callbacks, and synthesizes automatic responses.
//!
//! [`SmppSession`] is generic over its transport (`AsyncRead + AsyncWrite +
//! Unpin`); [`SessionBuilder::connect`] dials a real `tokio::net::TcpStream`,
//! while [`SessionBuilder::connect_with`] accepts any stream (a
//! `tokio::io::duplex` half, in tests) so the full bind/submit/unbind
//! lifecycle can run without a socket.
//!
//! This engine does not spawn any task of its own. Every operation is
//! `.await`ed to completion before the next is issued, matching the
//! single-thread-at-a-time contract in spec Section 5; a caller that wants
//! a background read loop spawns [`SmppSession::listen`] as its own task.

use std::collections::HashMap;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::codec::{CodecError, Frame};
use crate::connection::{Connection, ConnectionError};
use crate::datatypes::{
    AddressError, BindCredentials, BindReceiver, BindReceiverResponse, BindTransceiver,
    BindTransceiverResponse, BindTransmitter, BindTransmitterResponse, CancelSm, CommandId,
    CommandStatus, DataCoding, DataSm, DataSmResponse, DeliverSmResponse, DestinationAddr,
    EnquireLink, EnquireLinkResponse, EsmClass, FixedStringError, InterfaceVersion, MessageId,
    NumericPlanIndicator, QuerySm, ReplaceSm, ServiceType, ShortMessage, SourceAddr, SubmitSm,
    SystemType, TypeOfNumber, Unbind, UnbindResponse,
};
use crate::schema::RegistrationError;
use crate::sequence::{CounterSequenceGenerator, SequenceGenerator};
use crate::sms::{self, MessageInput, SmsError};

/// Bind lifecycle state (spec Section 4.2 and Section 8 scenario 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    Unbound,
    BoundTransmitter,
    BoundReceiver,
    BoundTransceiver,
    /// `unbind()` has been sent; waiting for `unbind_resp`.
    Unbinding,
    Closed,
}

/// Errors the session engine can raise (spec Section 7: four categories,
/// plus registration errors, composed into one public type).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Encoding/decoding error (spec Section 7 "Encoding error" / "Decoding
    /// error").
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Socket open/read/write failure; the session is `closed` afterward.
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    /// A method was invoked in a state that forbids it.
    #[error("{operation} is not legal in state {state:?}")]
    State {
        operation: &'static str,
        state: BindState,
    },
    /// A response PDU carried a non-zero `command_status`.
    #[error("{command_id:?} (sequence {sequence_number}) failed with status {status:?}")]
    Command {
        command_id: CommandId,
        sequence_number: u32,
        status: CommandStatus,
    },
    /// `define_optional_param` was called with a conflicting redefinition.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    /// A short-message encoding/splitting error (spec Section 4.3).
    #[error(transparent)]
    Sms(#[from] SmsError),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    FixedString(#[from] FixedStringError),
    /// The peer closed the connection, or sent something other than the
    /// response we were waiting for, while a bind/submit-style request was
    /// outstanding.
    #[error("connection closed while waiting for a response")]
    ConnectionClosed,
}

/// A user-supplied handler invoked for a PDU of one command id (or every
/// command id, for the wildcard slot). Returning `Some(status)` overrides
/// the status used for an auto-generated response; `None` implies
/// `ESME_ROK` (spec Section 4.2 "Callback contract").
pub type PduCallback = Box<dyn FnMut(&Frame) -> Option<CommandStatus> + Send>;

/// Maps command ids to callbacks, plus one wildcard slot for anything
/// without a specific registration (spec Section 4.2).
#[derive(Default)]
pub struct CallbackTable {
    handlers: HashMap<CommandId, PduCallback>,
    wildcard: Option<PduCallback>,
}

impl CallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for `command_id`, replacing any previous one.
    pub fn register<F>(&mut self, command_id: CommandId, callback: F) -> &mut Self
    where
        F: FnMut(&Frame) -> Option<CommandStatus> + Send + 'static,
    {
        self.handlers.insert(command_id, Box::new(callback));
        self
    }

    /// Registers the wildcard callback, invoked for any command id with no
    /// specific registration.
    pub fn register_wildcard<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&Frame) -> Option<CommandStatus> + Send + 'static,
    {
        self.wildcard = Some(Box::new(callback));
        self
    }

    fn dispatch(&mut self, frame: &Frame) -> Option<CommandStatus> {
        if let Some(handler) = self.handlers.get_mut(&frame.command_id()) {
            handler(frame)
        } else if let Some(handler) = self.wildcard.as_mut() {
            handler(frame)
        } else {
            None
        }
    }
}

/// Builds a [`SmppSession`] (spec Section 4.2 "Construction" / Section 6
/// "Configuration options").
pub struct SessionBuilder {
    host: String,
    port: u16,
    sequence_generator: Option<Box<dyn SequenceGenerator>>,
    callbacks: CallbackTable,
    system_type: SystemType,
    interface_version: InterfaceVersion,
}

impl SessionBuilder {
    /// `system_type` defaults to `""` and `interface_version` to SMPP
    /// v3.4, matching spec Section 6's configuration defaults.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            sequence_generator: None,
            callbacks: CallbackTable::new(),
            system_type: SystemType::default(),
            interface_version: InterfaceVersion::SmppV34,
        }
    }

    /// Supplies a non-default sequence number allocation strategy.
    pub fn sequence_generator(mut self, generator: impl SequenceGenerator + 'static) -> Self {
        self.sequence_generator = Some(Box::new(generator));
        self
    }

    /// Supplies a pre-populated callback table.
    pub fn callbacks(mut self, callbacks: CallbackTable) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// `system_type` carried in every bind PDU this session sends.
    pub fn system_type(mut self, system_type: &str) -> Self {
        self.system_type = SystemType::from(system_type);
        self
    }

    /// `interface_version` carried in every bind PDU this session sends.
    pub fn interface_version(mut self, interface_version: InterfaceVersion) -> Self {
        self.interface_version = interface_version;
        self
    }

    /// Opens a TCP connection to `host:port` and returns a session in
    /// `unbound` state (spec Section 4.2 `connect()`, "Transitions
    /// `closed -> unbound`").
    pub async fn connect(self) -> Result<SmppSession<TcpStream>, SessionError> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(ConnectionError::Io)?;
        Ok(self.connect_with(stream))
    }

    /// Builds a session over an already-open stream, skipping the TCP
    /// dial. Used by tests to drive the engine over `tokio::io::duplex`.
    pub fn connect_with<S>(self, stream: S) -> SmppSession<S>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        SmppSession {
            connection: Some(Connection::new(stream)),
            state: BindState::Unbound,
            sequence: self
                .sequence_generator
                .unwrap_or_else(|| Box::new(CounterSequenceGenerator::new())),
            callbacks: self.callbacks,
            system_type: self.system_type,
            interface_version: self.interface_version,
        }
    }
}

/// The session engine itself. See the module docs and spec Section 4.2.
pub struct SmppSession<S> {
    connection: Option<Connection<S>>,
    state: BindState,
    sequence: Box<dyn SequenceGenerator>,
    callbacks: CallbackTable,
    system_type: SystemType,
    interface_version: InterfaceVersion,
}

impl<S> SmppSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// The current bind state.
    pub fn state(&self) -> BindState {
        self.state
    }

    /// Registers (or replaces) the callback table used for dispatch.
    pub fn set_callbacks(&mut self, callbacks: CallbackTable) {
        self.callbacks = callbacks;
    }

    fn next_sequence(&mut self) -> u32 {
        self.sequence.next_sequence()
    }

    fn ensure_state(&self, operation: &'static str, allowed: &[BindState]) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::State {
                operation,
                state: self.state,
            })
        }
    }

    fn connection_mut(&mut self) -> Result<&mut Connection<S>, SessionError> {
        self.connection
            .as_mut()
            .ok_or(SessionError::ConnectionClosed)
    }

    async fn send_frame(&mut self, frame: Frame) -> Result<u32, SessionError> {
        let sequence_number = frame.sequence_number();
        tracing::debug!(
            command_id = ?frame.command_id(),
            sequence_number,
            "sending frame"
        );
        self.callbacks.dispatch(&frame);
        self.connection_mut()?.write_frame(&frame).await?;
        Ok(sequence_number)
    }

    /// Reads one frame, dispatches it to its callback (or the wildcard),
    /// and writes an auto-generated response if the frame is a request
    /// that requires one. Returns the frame so bind-style waits can
    /// inspect it.
    async fn process_incoming(&mut self) -> Result<Frame, SessionError> {
        let frame = self
            .connection_mut()?
            .read_frame()
            .await?
            .ok_or(SessionError::ConnectionClosed)?;
        tracing::debug!(
            command_id = ?frame.command_id(),
            sequence_number = frame.sequence_number(),
            "received frame"
        );

        let status_override = self.callbacks.dispatch(&frame);
        if status_override.is_some() {
            tracing::warn!(
                command_id = ?frame.command_id(),
                "auto-response status overridden by callback"
            );
        }
        if let Some(response) = auto_response(&frame, status_override.unwrap_or(CommandStatus::Ok)) {
            self.connection_mut()?.write_frame(&response).await?;
        }
        Ok(frame)
    }

    /// Blocks reading (and auto-responding to anything interleaved) until
    /// a frame with `sequence_number == seq` and `command_id ==
    /// expected` arrives.
    async fn wait_for_response(
        &mut self,
        seq: u32,
        expected: CommandId,
    ) -> Result<Frame, SessionError> {
        loop {
            let frame = self.process_incoming().await?;
            if frame.sequence_number() == seq && frame.command_id() == expected {
                return Ok(frame);
            }
        }
    }

    async fn bind_transmitter_inner(
        &mut self,
        credentials: &BindCredentials,
    ) -> Result<BindTransmitterResponse, SessionError> {
        self.ensure_state("bind_transmitter", &[BindState::Unbound])?;
        let sequence_number = self.next_sequence();
        let pdu = BindTransmitter {
            command_status: CommandStatus::Ok,
            sequence_number,
            system_id: credentials.system_id.clone(),
            password: credentials.password.clone(),
            system_type: self.system_type.clone(),
            interface_version: self.interface_version,
            addr_ton: credentials.addr_ton,
            addr_npi: credentials.addr_npi,
            address_range: credentials.address_range.clone(),
        };
        self.send_frame(Frame::BindTransmitter(pdu)).await?;
        match self
            .wait_for_response(sequence_number, CommandId::BindTransmitterResp)
            .await?
        {
            Frame::BindTransmitterResp(resp) if resp.command_status == CommandStatus::Ok => {
                self.state = BindState::BoundTransmitter;
                Ok(resp)
            }
            Frame::BindTransmitterResp(resp) => Err(SessionError::Command {
                command_id: CommandId::BindTransmitterResp,
                sequence_number,
                status: resp.command_status,
            }),
            other => unreachable!("wait_for_response returned {other:?}"),
        }
    }

    /// Binds as a transmitter: submit_sm/data_sm/query_sm/cancel_sm/
    /// replace_sm only, no deliver_sm. Transitions `unbound ->
    /// bound_transmitter` on success.
    pub async fn bind_transmitter(
        &mut self,
        credentials: &BindCredentials,
    ) -> Result<BindTransmitterResponse, SessionError> {
        self.bind_transmitter_inner(credentials).await
    }

    /// Binds as a receiver: only deliver_sm arrives, nothing may be
    /// submitted. Transitions `unbound -> bound_receiver` on success.
    pub async fn bind_receiver(
        &mut self,
        credentials: &BindCredentials,
    ) -> Result<BindReceiverResponse, SessionError> {
        self.ensure_state("bind_receiver", &[BindState::Unbound])?;
        let sequence_number = self.next_sequence();
        let pdu = BindReceiver {
            command_status: CommandStatus::Ok,
            sequence_number,
            system_id: credentials.system_id.clone(),
            password: credentials.password.clone(),
            system_type: self.system_type.clone(),
            interface_version: self.interface_version,
            addr_ton: credentials.addr_ton,
            addr_npi: credentials.addr_npi,
            address_range: credentials.address_range.clone(),
        };
        self.send_frame(Frame::BindReceiver(pdu)).await?;
        match self
            .wait_for_response(sequence_number, CommandId::BindReceiverResp)
            .await?
        {
            Frame::BindReceiverResp(resp) if resp.command_status == CommandStatus::Ok => {
                self.state = BindState::BoundReceiver;
                Ok(resp)
            }
            Frame::BindReceiverResp(resp) => Err(SessionError::Command {
                command_id: CommandId::BindReceiverResp,
                sequence_number,
                status: resp.command_status,
            }),
            other => unreachable!("wait_for_response returned {other:?}"),
        }
    }

    /// Binds as a transceiver: both submit and deliver are legal.
    /// Transitions `unbound -> bound_transceiver` on success.
    pub async fn bind_transceiver(
        &mut self,
        credentials: &BindCredentials,
    ) -> Result<BindTransceiverResponse, SessionError> {
        self.ensure_state("bind_transceiver", &[BindState::Unbound])?;
        let sequence_number = self.next_sequence();
        let pdu = BindTransceiver {
            command_status: CommandStatus::Ok,
            sequence_number,
            system_id: credentials.system_id.clone(),
            password: credentials.password.clone(),
            system_type: self.system_type.clone(),
            interface_version: self.interface_version,
            addr_ton: credentials.addr_ton,
            addr_npi: credentials.addr_npi,
            address_range: credentials.address_range.clone(),
        };
        self.send_frame(Frame::BindTransceiver(pdu)).await?;
        match self
            .wait_for_response(sequence_number, CommandId::BindTransceiverResp)
            .await?
        {
            Frame::BindTransceiverResp(resp) if resp.command_status == CommandStatus::Ok => {
                self.state = BindState::BoundTransceiver;
                Ok(resp)
            }
            Frame::BindTransceiverResp(resp) => Err(SessionError::Command {
                command_id: CommandId::BindTransceiverResp,
                sequence_number,
                status: resp.command_status,
            }),
            other => unreachable!("wait_for_response returned {other:?}"),
        }
    }

    /// Writes an UNBIND PDU and returns its sequence number without
    /// waiting for `unbind_resp`; the caller drains it via
    /// `read_one_pdu`/`listen` (spec Section 4.2 `unbind()`).
    pub async fn unbind(&mut self) -> Result<u32, SessionError> {
        self.ensure_state(
            "unbind",
            &[
                BindState::BoundTransmitter,
                BindState::BoundReceiver,
                BindState::BoundTransceiver,
            ],
        )?;
        let sequence_number = self.next_sequence();
        self.state = BindState::Unbinding;
        self.send_frame(Frame::Unbind(Unbind::new(sequence_number)))
            .await
    }

    /// Closes the socket and transitions to `closed`. Safe to call in any
    /// state, idempotent.
    pub async fn disconnect(&mut self) -> Result<(), SessionError> {
        self.connection = None;
        self.state = BindState::Closed;
        Ok(())
    }

    /// Performs one framed read, dispatches it, auto-responds if needed.
    /// Returns `false` (after calling `disconnect()`) when the frame was
    /// UNBIND or UNBIND_RESP (spec Section 4.2 `read_one_pdu`).
    pub async fn read_one_pdu(&mut self) -> Result<bool, SessionError> {
        let frame = self.process_incoming().await?;
        match frame.command_id() {
            CommandId::Unbind | CommandId::UnbindResp => {
                self.disconnect().await?;
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    /// Calls `read_one_pdu` until it returns `false` or raises (spec
    /// Section 4.2 `listen()`). Intended to be spawned as its own task by
    /// a caller that also wants to issue commands concurrently.
    pub async fn listen(&mut self) -> Result<(), SessionError> {
        while self.read_one_pdu().await? {}
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn submit_sm(
        &mut self,
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
        sequence_number: Option<u32>,
    ) -> Result<u32, SessionError> {
        self.ensure_state(
            "submit_sm",
            &[BindState::BoundTransmitter, BindState::BoundTransceiver],
        )?;
        let sequence_number = sequence_number.unwrap_or_else(|| self.next_sequence());
        let pdu = SubmitSm::new(
            sequence_number,
            service_type,
            source_addr_ton,
            source_addr_npi,
            source_addr,
            dest_addr_ton,
            dest_addr_npi,
            destination_addr,
            esm_class,
            registered_delivery,
            data_coding,
            short_message,
        )?;
        self.send_frame(Frame::SubmitSm(Box::new(pdu))).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn data_sm(
        &mut self,
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
        sequence_number: Option<u32>,
    ) -> Result<u32, SessionError> {
        self.ensure_state(
            "data_sm",
            &[
                BindState::BoundTransmitter,
                BindState::BoundReceiver,
                BindState::BoundTransceiver,
            ],
        )?;
        let sequence_number = sequence_number.unwrap_or_else(|| self.next_sequence());
        let pdu = DataSm::new(
            sequence_number,
            service_type,
            source_addr_ton,
            source_addr_npi,
            source_addr,
            dest_addr_ton,
            dest_addr_npi,
            destination_addr,
            esm_class,
            registered_delivery,
            data_coding,
        )?;
        self.send_frame(Frame::DataSm(Box::new(pdu))).await
    }

    pub async fn query_sm(
        &mut self,
        message_id: MessageId,
        source_addr_ton: TypeOfNumber,
        source_addr_npi: NumericPlanIndicator,
        source_addr: SourceAddr,
        sequence_number: Option<u32>,
    ) -> Result<u32, SessionError> {
        self.ensure_state(
            "query_sm",
            &[BindState::BoundTransmitter, BindState::BoundTransceiver],
        )?;
        let sequence_number = sequence_number.unwrap_or_else(|| self.next_sequence());
        let pdu = QuerySm::new(
            sequence_number,
            message_id,
            source_addr_ton,
            source_addr_npi,
            source_addr,
        )?;
        self.send_frame(Frame::QuerySm(pdu)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn cancel_sm(
        &mut self,
        service_type: ServiceType,
        message_id: MessageId,
        source_addr_ton: TypeOfNumber,
        source_addr_npi: NumericPlanIndicator,
        source_addr: SourceAddr,
        dest_addr_ton: TypeOfNumber,
        dest_addr_npi: NumericPlanIndicator,
        destination_addr: SourceAddr,
        sequence_number: Option<u32>,
    ) -> Result<u32, SessionError> {
        self.ensure_state(
            "cancel_sm",
            &[BindState::BoundTransmitter, BindState::BoundTransceiver],
        )?;
        let sequence_number = sequence_number.unwrap_or_else(|| self.next_sequence());
        let pdu = CancelSm::new(
            sequence_number,
            service_type,
            message_id,
            source_addr_ton,
            source_addr_npi,
            source_addr,
            dest_addr_ton,
            dest_addr_npi,
            destination_addr,
        )?;
        self.send_frame(Frame::CancelSm(pdu)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn replace_sm(
        &mut self,
        message_id: MessageId,
        source_addr_ton: TypeOfNumber,
        source_addr_npi: NumericPlanIndicator,
        source_addr: SourceAddr,
        schedule_delivery_time: crate::datatypes::ScheduleDeliveryTime,
        validity_period: crate::datatypes::ValidityPeriod,
        registered_delivery: u8,
        sm_default_msg_id: u8,
        short_message: ShortMessage,
        sequence_number: Option<u32>,
    ) -> Result<u32, SessionError> {
        self.ensure_state(
            "replace_sm",
            &[BindState::BoundTransmitter, BindState::BoundTransceiver],
        )?;
        let sequence_number = sequence_number.unwrap_or_else(|| self.next_sequence());
        let pdu = ReplaceSm::new(
            sequence_number,
            message_id,
            source_addr_ton,
            source_addr_npi,
            source_addr,
            schedule_delivery_time,
            validity_period,
            registered_delivery,
            sm_default_msg_id,
            short_message,
        )?;
        self.send_frame(Frame::ReplaceSm(Box::new(pdu))).await
    }

    /// Sends an ENQUIRE_LINK keep-alive; legal in any bound state.
    pub async fn enquire_link(&mut self, sequence_number: Option<u32>) -> Result<u32, SessionError> {
        self.ensure_state(
            "enquire_link",
            &[
                BindState::BoundTransmitter,
                BindState::BoundReceiver,
                BindState::BoundTransceiver,
            ],
        )?;
        let sequence_number = sequence_number.unwrap_or_else(|| self.next_sequence());
        self.send_frame(Frame::EnquireLink(EnquireLink::new(sequence_number)))
            .await
    }

    /// Convenience wrapper over [`Self::submit_sm`]: encodes `text` with
    /// the GSM-default/UCS-2-fallback policy, splits it into as many
    /// parts as needed, and submits each part in order. Returns one
    /// sequence number per part.
    pub async fn submit_sm_text(
        &mut self,
        source_addr: &str,
        destination_addr: &str,
        text: &str,
    ) -> Result<Vec<u32>, SessionError> {
        self.submit_sm_text_with_coding(source_addr, destination_addr, text, DataCoding::SmscDefault)
            .await
    }

    /// Like [`Self::submit_sm_text`] but with an explicit requested
    /// coding (spec Section 4.3 `encode_short_message`'s `requested_coding`
    /// parameter).
    pub async fn submit_sm_text_with_coding(
        &mut self,
        source_addr: &str,
        destination_addr: &str,
        text: &str,
        requested_coding: DataCoding,
    ) -> Result<Vec<u32>, SessionError> {
        let split = sms::split_short_message(MessageInput::Text(text), requested_coding)?;
        let source = SourceAddr::new(source_addr, TypeOfNumber::Unknown)?;
        let destination = DestinationAddr::new(destination_addr, TypeOfNumber::Unknown)?;
        let esm_class = if split.esm_class & sms::ESM_CLASS_UDHI != 0 {
            EsmClass::default().with_udhi()
        } else {
            EsmClass::default()
        };

        let mut sequence_numbers = Vec::with_capacity(split.parts.len());
        for part in &split.parts {
            let short_message = ShortMessage::new(part)?;
            let seq = self
                .submit_sm(
                    ServiceType::default(),
                    TypeOfNumber::Unknown,
                    NumericPlanIndicator::Unknown,
                    source.clone(),
                    TypeOfNumber::Unknown,
                    NumericPlanIndicator::Unknown,
                    destination.clone(),
                    esm_class,
                    0,
                    split.data_coding,
                    short_message,
                    None,
                )
                .await?;
            sequence_numbers.push(seq);
        }
        Ok(sequence_numbers)
    }
}

/// Builds the auto-generated response for an incoming request, or `None`
/// if `frame` is a response itself or has no registered response pair
/// (spec Section 4.2 "Automatic response policy"; `alert_notification` and
/// `outbind` are explicitly response-less per `CommandId`).
fn auto_response(frame: &Frame, status: CommandStatus) -> Option<Frame> {
    if frame.is_response() {
        return None;
    }
    let sequence_number = frame.sequence_number();
    match frame {
        Frame::EnquireLink(_) => Some(Frame::EnquireLinkResp(EnquireLinkResponse {
            command_status: status,
            sequence_number,
        })),
        Frame::Unbind(_) => Some(Frame::UnbindResp(UnbindResponse {
            command_status: status,
            sequence_number,
        })),
        Frame::DeliverSm(_) => Some(Frame::DeliverSmResp(DeliverSmResponse {
            command_status: status,
            sequence_number,
            message_id: MessageId::default(),
        })),
        Frame::DataSm(_) => Some(Frame::DataSmResp(DataSmResponse {
            command_status: status,
            sequence_number,
            message_id: MessageId::default(),
            optional_parameters: Vec::new(),
        })),
        _ => None,
    }
}
