use crate::datatypes::{
    AddressRange, InterfaceVersion, NumericPlanIndicator, Password, SystemId, SystemType,
    TypeOfNumber,
};

/// The parameters an ESME presents when binding to an SMSC, shared across
/// bind_transmitter, bind_receiver, and bind_transceiver (SMPP v3.4 §4.1).
///
/// Carries only the bind-time identity/addressing fields; the session engine
/// supplies `sequence_number` and `command_status` itself.
#[derive(Clone, Debug, PartialEq)]
pub struct BindCredentials {
    pub system_id: SystemId,
    pub password: Option<Password>,
    pub system_type: SystemType,
    pub interface_version: InterfaceVersion,
    pub addr_ton: TypeOfNumber,
    pub addr_npi: NumericPlanIndicator,
    pub address_range: AddressRange,
}

impl BindCredentials {
    /// Creates credentials with SMPP v3.4 defaults for everything but
    /// `system_id` and `password`.
    pub fn new(system_id: &str, password: &str) -> Self {
        Self {
            system_id: SystemId::from(system_id),
            password: Some(Password::from(password)),
            system_type: SystemType::default(),
            interface_version: InterfaceVersion::SmppV34,
            addr_ton: TypeOfNumber::Unknown,
            addr_npi: NumericPlanIndicator::Unknown,
            address_range: AddressRange::from(""),
        }
    }

    pub fn with_system_type(mut self, system_type: &str) -> Self {
        self.system_type = SystemType::from(system_type);
        self
    }

    pub fn with_interface_version(mut self, interface_version: InterfaceVersion) -> Self {
        self.interface_version = interface_version;
        self
    }

    pub fn with_addr_ton(mut self, addr_ton: TypeOfNumber) -> Self {
        self.addr_ton = addr_ton;
        self
    }

    pub fn with_addr_npi(mut self, addr_npi: NumericPlanIndicator) -> Self {
        self.addr_npi = addr_npi;
        self
    }

    pub fn with_address_range(mut self, address_range: &str) -> Self {
        self.address_range = AddressRange::from(address_range);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_v34_and_unknown_addressing() {
        let creds = BindCredentials::new("system_id", "password");
        assert_eq!(creds.system_id.as_str().unwrap(), "system_id");
        assert_eq!(creds.password.unwrap().as_str().unwrap(), "password");
        assert_eq!(creds.interface_version, InterfaceVersion::SmppV34);
        assert_eq!(creds.addr_ton, TypeOfNumber::Unknown);
        assert_eq!(creds.addr_npi, NumericPlanIndicator::Unknown);
    }

    #[test]
    fn builder_methods_override_defaults() {
        let creds = BindCredentials::new("sid", "pw")
            .with_system_type("VMS")
            .with_addr_ton(TypeOfNumber::International)
            .with_addr_npi(NumericPlanIndicator::Isdn)
            .with_address_range("1234");
        assert_eq!(creds.system_type.as_str().unwrap(), "VMS");
        assert_eq!(creds.addr_ton, TypeOfNumber::International);
        assert_eq!(creds.addr_npi, NumericPlanIndicator::Isdn);
        assert_eq!(creds.address_range.as_str().unwrap(), "1234");
    }
}
