// ABOUTME: Process-wide registry of vendor/optional TLV parameter definitions
// ABOUTME: Append-only extension point so callers can recognize vendor TLVs without touching codec code

//! Vendor TLV extension registry (spec Section 4.1, Section 9 "global registry
//! for vendor TLVs").
//!
//! SMPP 3.4 fixes the mandatory parameters of every command, but optional
//! parameters (TLVs) are open-ended: vendors define their own tags. The
//! codec already decodes any TLV it encounters into a PDU's
//! `optional_parameters: Vec<Tlv>` bucket (tag + raw bytes) regardless of
//! whether the tag is recognized. This module lets a caller additionally
//! *name* a (command, tag) pair before any I/O begins, so logging and
//! tooling can report `source_port` instead of `tag 0x020a`.
//!
//! Registration is process-wide and append-only: [`define_optional_param`]
//! may be called any number of times with an identical definition (a no-op),
//! but a conflicting redefinition of an already-registered `(command_id,
//! tag)` pair is a [`RegistrationError`]. There is no operation to remove a
//! definition. Per spec Section 5, all calls are expected to happen during
//! process startup, before any PDU of the affected command type is encoded
//! or decoded; the registry does not defend against concurrent registration
//! racing concurrent reads, only against redefinition.

use crate::datatypes::CommandId;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// The wire type of a registered optional parameter, mirroring the
/// mandatory-parameter type rules in spec Section 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlvValueType {
    /// Null-terminated ASCII text, with an upper bound on encoded length
    /// (including the terminator).
    COctetString { max_len: usize },
    /// Arbitrary bytes; length is whatever the TLV's length prefix says.
    OctetString,
    /// Unsigned big-endian integer of 1, 2, or 4 octets.
    Integer { size: u8 },
}

/// A named, typed optional parameter recognized for one command type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionalParamDef {
    pub name: String,
    pub value_type: TlvValueType,
}

/// Error returned when [`define_optional_param`] is called with a
/// definition that conflicts with one already registered for the same
/// `(command_id, tag)` pair.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(
        "tag {tag:#06x} is already registered for {command_id:?} as `{existing_name}` \
         ({existing_type:?}); cannot redefine as `{new_name}` ({new_type:?})"
    )]
    Conflict {
        command_id: CommandId,
        tag: u16,
        existing_name: String,
        existing_type: TlvValueType,
        new_name: String,
        new_type: TlvValueType,
    },
}

type RegistryKey = (CommandId, u16);

fn registry() -> &'static RwLock<HashMap<RegistryKey, OptionalParamDef>> {
    static REGISTRY: OnceLock<RwLock<HashMap<RegistryKey, OptionalParamDef>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Registers a recognized optional (TLV) parameter for `command_id`.
///
/// Idempotent when called again with an identical `(tag, name, value_type)`
/// triple for the same command; returns [`RegistrationError::Conflict`] if
/// `tag` is already registered for `command_id` under a different name or
/// type.
pub fn define_optional_param(
    command_id: CommandId,
    tag: u16,
    name: &str,
    value_type: TlvValueType,
) -> Result<(), RegistrationError> {
    let key = (command_id, tag);
    let mut map = registry().write().expect("TLV registry lock poisoned");

    if let Some(existing) = map.get(&key) {
        if existing.name == name && existing.value_type == value_type {
            return Ok(());
        }
        return Err(RegistrationError::Conflict {
            command_id,
            tag,
            existing_name: existing.name.clone(),
            existing_type: existing.value_type,
            new_name: name.to_string(),
            new_type: value_type,
        });
    }

    map.insert(
        key,
        OptionalParamDef {
            name: name.to_string(),
            value_type,
        },
    );
    tracing::debug!(?command_id, tag = format!("{tag:#06x}"), name, "registered vendor TLV");
    Ok(())
}

/// Looks up the recognized definition for `(command_id, tag)`, if any has
/// been registered via [`define_optional_param`].
pub fn lookup(command_id: CommandId, tag: u16) -> Option<OptionalParamDef> {
    registry()
        .read()
        .expect("TLV registry lock poisoned")
        .get(&(command_id, tag))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test picks a tag range unlikely to collide with others running
    // in the same process, since the registry is global and append-only.

    #[test]
    fn define_then_lookup() {
        define_optional_param(
            CommandId::SubmitSm,
            0x9000,
            "x_vendor_priority",
            TlvValueType::Integer { size: 1 },
        )
        .unwrap();

        let found = lookup(CommandId::SubmitSm, 0x9000).unwrap();
        assert_eq!(found.name, "x_vendor_priority");
        assert_eq!(found.value_type, TlvValueType::Integer { size: 1 });
    }

    #[test]
    fn redefining_identically_is_a_no_op() {
        define_optional_param(
            CommandId::DataSm,
            0x9001,
            "x_vendor_flag",
            TlvValueType::OctetString,
        )
        .unwrap();
        define_optional_param(
            CommandId::DataSm,
            0x9001,
            "x_vendor_flag",
            TlvValueType::OctetString,
        )
        .unwrap();
    }

    #[test]
    fn conflicting_redefinition_is_an_error() {
        define_optional_param(
            CommandId::DeliverSm,
            0x9002,
            "x_vendor_region",
            TlvValueType::COctetString { max_len: 16 },
        )
        .unwrap();

        let err = define_optional_param(
            CommandId::DeliverSm,
            0x9002,
            "x_vendor_region_v2",
            TlvValueType::COctetString { max_len: 32 },
        )
        .unwrap_err();

        assert!(matches!(err, RegistrationError::Conflict { .. }));
    }

    #[test]
    fn unregistered_tag_is_none() {
        assert!(lookup(CommandId::SubmitSm, 0xBEEF).is_none());
    }
}
