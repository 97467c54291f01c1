//! Option definitions: which value type each option code decodes to.
//!
//! The decoder never decides on its own how to interpret a payload. It asks
//! an [`OptionFactory`], normally an [`OptionRegistry`] passed explicitly to
//! [`DhcpPacket::parse_with`](crate::DhcpPacket::parse_with). Each call gets
//! its own table; there is no process-wide registry.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, OptionError, Result};
use crate::options::{DhcpOption, OptionCode, OptionValue, trim_trailing_nuls};
use crate::vendor::VendorOption;

/// IANA enterprise number of CableLabs, owner of the DOCSIS3 vendor space.
pub const VENDOR_ID_CABLE_LABS: u32 = 4491;

/// DOCSIS3 vendor suboption: option request list.
pub const DOCSIS3_V4_ORO: u8 = 1;

/// DOCSIS3 vendor suboption: TFTP server addresses.
pub const DOCSIS3_V4_TFTP_SERVERS: u8 = 2;

/// Namespace an option code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionSpace {
    /// Top-level DHCPv4 options.
    Dhcp4,
    /// Suboptions of a vendor option, keyed by enterprise number.
    Vendor(u32),
}

impl std::fmt::Display for OptionSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dhcp4 => write!(f, "dhcp4"),
            Self::Vendor(vendor_id) => write!(f, "vendor-{}", vendor_id),
        }
    }
}

/// Value type an option code decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    Binary,
    Uint8,
    Uint16,
    Uint32,
    String,
    Ipv4Address,
    Ipv4AddressList,
    /// Vendor-identifying vendor-specific information (RFC 3925).
    Vendor,
}

/// Turns a raw `(code, payload)` pair into a typed option.
///
/// Implementations report content they can't accept with
/// [`OptionError::SkipThis`], and truncation inside the payload's own
/// nested structure with [`OptionError::SkipRemaining`].
pub trait OptionFactory {
    fn interpret(
        &self,
        space: OptionSpace,
        code: u8,
        data: &[u8],
    ) -> std::result::Result<DhcpOption, OptionError>;
}

/// Table-driven [`OptionFactory`].
///
/// Codes without a definition decode as [`OptionValue::Binary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRegistry {
    definitions: HashMap<(OptionSpace, u8), OptionKind>,
}

impl Default for OptionRegistry {
    /// Standard DHCPv4 definitions plus the DOCSIS3 vendor space.
    fn default() -> Self {
        let mut definitions = HashMap::new();

        let standard = [
            (OptionCode::SubnetMask, OptionKind::Ipv4Address),
            (OptionCode::TimeOffset, OptionKind::Uint32),
            (OptionCode::Router, OptionKind::Ipv4AddressList),
            (OptionCode::TimeServer, OptionKind::Ipv4AddressList),
            (OptionCode::DnsServer, OptionKind::Ipv4AddressList),
            (OptionCode::Hostname, OptionKind::String),
            (OptionCode::MeritDump, OptionKind::String),
            (OptionCode::DomainName, OptionKind::String),
            (OptionCode::RootPath, OptionKind::String),
            (OptionCode::InterfaceMtu, OptionKind::Uint16),
            (OptionCode::BroadcastAddress, OptionKind::Ipv4Address),
            (OptionCode::NtpServers, OptionKind::Ipv4AddressList),
            (OptionCode::VendorEncapsulated, OptionKind::Binary),
            (OptionCode::RequestedIpAddress, OptionKind::Ipv4Address),
            (OptionCode::LeaseTime, OptionKind::Uint32),
            (OptionCode::OptionOverload, OptionKind::Uint8),
            (OptionCode::MessageType, OptionKind::Uint8),
            (OptionCode::ServerIdentifier, OptionKind::Ipv4Address),
            (OptionCode::ParameterRequestList, OptionKind::Binary),
            (OptionCode::Message, OptionKind::String),
            (OptionCode::MaxMessageSize, OptionKind::Uint16),
            (OptionCode::RenewalTime, OptionKind::Uint32),
            (OptionCode::RebindingTime, OptionKind::Uint32),
            (OptionCode::VendorClassIdentifier, OptionKind::String),
            (OptionCode::ClientIdentifier, OptionKind::Binary),
            (OptionCode::TftpServerName, OptionKind::String),
            (OptionCode::BootFileName, OptionKind::String),
            (OptionCode::ClientFqdn, OptionKind::Binary),
            (OptionCode::RelayAgentInfo, OptionKind::Binary),
            (OptionCode::VendorClass, OptionKind::Binary),
            (OptionCode::VendorSpecific, OptionKind::Vendor),
        ];
        for (code, kind) in standard {
            definitions.insert((OptionSpace::Dhcp4, code as u8), kind);
        }

        let docsis = OptionSpace::Vendor(VENDOR_ID_CABLE_LABS);
        definitions.insert((docsis, DOCSIS3_V4_ORO), OptionKind::Binary);
        definitions.insert((docsis, DOCSIS3_V4_TFTP_SERVERS), OptionKind::Ipv4AddressList);

        Self { definitions }
    }
}

impl OptionRegistry {
    /// A registry with no definitions; every option decodes as binary.
    pub fn empty() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Adds or replaces a definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for the pad and end sentinel codes,
    /// and for vendor definitions inside a vendor space (vendor options
    /// nest one level only).
    pub fn define(&mut self, space: OptionSpace, code: u8, kind: OptionKind) -> Result<()> {
        if code == OptionCode::Pad as u8 || code == OptionCode::End as u8 {
            return Err(Error::InvalidConfig(format!(
                "option code {} is reserved in {}",
                code, space
            )));
        }
        if kind == OptionKind::Vendor && matches!(space, OptionSpace::Vendor(_)) {
            return Err(Error::InvalidConfig(format!(
                "vendor option {} can't be nested in {}",
                code, space
            )));
        }
        self.definitions.insert((space, code), kind);
        Ok(())
    }

    /// Returns the kind a code decodes to, [`OptionKind::Binary`] if undefined.
    pub fn kind(&self, space: OptionSpace, code: u8) -> OptionKind {
        self.definitions
            .get(&(space, code))
            .copied()
            .unwrap_or(OptionKind::Binary)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn expect_len(code: u8, data: &[u8], expected: usize, kind: &str) -> std::result::Result<(), OptionError> {
    if data.len() != expected {
        return Err(OptionError::skip_this(
            code,
            format!("{} needs {} bytes, got {}", kind, expected, data.len()),
        ));
    }
    Ok(())
}

impl OptionFactory for OptionRegistry {
    fn interpret(
        &self,
        space: OptionSpace,
        code: u8,
        data: &[u8],
    ) -> std::result::Result<DhcpOption, OptionError> {
        let value = match self.kind(space, code) {
            OptionKind::Binary => OptionValue::Binary(data.to_vec()),
            OptionKind::Uint8 => {
                expect_len(code, data, 1, "uint8")?;
                OptionValue::Uint8(data[0])
            }
            OptionKind::Uint16 => {
                expect_len(code, data, 2, "uint16")?;
                OptionValue::Uint16(u16::from_be_bytes([data[0], data[1]]))
            }
            OptionKind::Uint32 => {
                expect_len(code, data, 4, "uint32")?;
                OptionValue::Uint32(u32::from_be_bytes([data[0], data[1], data[2], data[3]]))
            }
            OptionKind::String => {
                let text = trim_trailing_nuls(data);
                if text.is_empty() {
                    return Err(OptionError::skip_this(code, "empty value is not accepted"));
                }
                OptionValue::Text(text.to_vec())
            }
            OptionKind::Ipv4Address => {
                expect_len(code, data, 4, "ipv4-address")?;
                OptionValue::Address(Ipv4Addr::new(data[0], data[1], data[2], data[3]))
            }
            OptionKind::Ipv4AddressList => {
                if data.is_empty() || data.len() % 4 != 0 {
                    return Err(OptionError::skip_this(
                        code,
                        format!("invalid address list length {}", data.len()),
                    ));
                }
                let addrs: Vec<Ipv4Addr> = data
                    .chunks_exact(4)
                    .map(|chunk| Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]))
                    .collect();
                OptionValue::Addresses(addrs)
            }
            OptionKind::Vendor => OptionValue::Vendor(VendorOption::decode(code, data, self)?),
        };

        Ok(DhcpOption::new(code, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(code: u8, data: &[u8]) -> std::result::Result<DhcpOption, OptionError> {
        OptionRegistry::default().interpret(OptionSpace::Dhcp4, code, data)
    }

    #[test]
    fn test_default_definitions() {
        let registry = OptionRegistry::default();
        assert_eq!(registry.kind(OptionSpace::Dhcp4, 12), OptionKind::String);
        assert_eq!(registry.kind(OptionSpace::Dhcp4, 53), OptionKind::Uint8);
        assert_eq!(registry.kind(OptionSpace::Dhcp4, 125), OptionKind::Vendor);
        assert_eq!(registry.kind(OptionSpace::Dhcp4, 254), OptionKind::Binary);
        assert_eq!(
            registry.kind(OptionSpace::Vendor(VENDOR_ID_CABLE_LABS), DOCSIS3_V4_TFTP_SERVERS),
            OptionKind::Ipv4AddressList
        );
        assert_eq!(registry.kind(OptionSpace::Vendor(1), 2), OptionKind::Binary);
    }

    #[test]
    fn test_interpret_typed_values() {
        assert_eq!(interpret(53, &[2]).unwrap().value(), &OptionValue::Uint8(2));
        assert_eq!(
            interpret(51, &[0, 1, 0x51, 0x80]).unwrap().value(),
            &OptionValue::Uint32(86400)
        );
        assert_eq!(
            interpret(1, &[255, 255, 255, 0]).unwrap().value(),
            &OptionValue::Address(Ipv4Addr::new(255, 255, 255, 0))
        );
        assert_eq!(
            interpret(6, &[8, 8, 8, 8, 8, 8, 4, 4]).unwrap().value(),
            &OptionValue::Addresses(vec![Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)])
        );
        assert_eq!(
            interpret(200, &[1, 2, 3]).unwrap().value(),
            &OptionValue::Binary(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_text_trimming() {
        let option = interpret(12, b"two\0\0").unwrap();
        assert_eq!(option.value().as_text(), Some(&b"two"[..]));

        let option = interpret(15, b"em\0bed").unwrap();
        assert_eq!(option.value().as_text(), Some(&b"em\0bed"[..]));
    }

    #[test]
    fn test_invalid_content_skips_this_option() {
        assert!(matches!(interpret(12, &[0, 0, 0]), Err(OptionError::SkipThis { code: 12, .. })));
        assert!(matches!(interpret(12, &[]), Err(OptionError::SkipThis { .. })));
        assert!(matches!(interpret(51, &[0, 0, 0]), Err(OptionError::SkipThis { .. })));
        assert!(matches!(interpret(1, &[255, 255, 255]), Err(OptionError::SkipThis { .. })));
        assert!(matches!(interpret(3, &[]), Err(OptionError::SkipThis { .. })));
        assert!(matches!(interpret(6, &[8, 8, 8]), Err(OptionError::SkipThis { .. })));
    }

    #[test]
    fn test_truncated_vendor_skips_remaining() {
        assert!(matches!(
            interpret(125, &[0, 0, 0x11]),
            Err(OptionError::SkipRemaining(_))
        ));
    }

    #[test]
    fn test_define_rejects_sentinels_and_nesting() {
        let mut registry = OptionRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.define(OptionSpace::Dhcp4, 0, OptionKind::Binary).is_err());
        assert!(registry.define(OptionSpace::Dhcp4, 255, OptionKind::Binary).is_err());
        assert!(registry.define(OptionSpace::Vendor(9), 3, OptionKind::Vendor).is_err());
        assert!(registry.define(OptionSpace::Dhcp4, 224, OptionKind::String).is_ok());
        assert_eq!(registry.kind(OptionSpace::Dhcp4, 224), OptionKind::String);
        assert_eq!(registry.len(), 1);
    }
}
