use crate::datatypes::CommandStatus;
use crate::macros::impl_complete_header_only_pdu;

/// enquire_link is used to check that an application level connection between
/// an ESME and an SMSC is active (Section 4.11.1).
#[derive(Clone, Debug, PartialEq)]
pub struct EnquireLink {
    pub command_status: CommandStatus,
    pub sequence_number: u32,
}

/// Response to an enquire_link PDU (Section 4.11.2).
#[derive(Clone, Debug, PartialEq)]
pub struct EnquireLinkResponse {
    pub command_status: CommandStatus,
    pub sequence_number: u32,
}

impl_complete_header_only_pdu!(EnquireLink, crate::datatypes::CommandId::EnquireLink);
impl_complete_header_only_pdu!(
    EnquireLinkResponse,
    crate::datatypes::CommandId::EnquireLinkResp
);
