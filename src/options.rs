//! DHCPv4 options as defined in RFC 2132.
//!
//! DHCP uses options to convey configuration parameters between servers and clients.
//! Each option has a code (1 byte), length (1 byte), and variable-length data.
//!
//! An option here is a code plus a typed [`OptionValue`]. Which type a code
//! decodes to is decided by an [`OptionFactory`](crate::registry::OptionFactory),
//! not by this module, so unknown codes simply stay [`OptionValue::Binary`].
//!
//! # References
//!
//! - RFC 2132: DHCP Options and BOOTP Vendor Extensions
//! - RFC 3925: Vendor-Identifying Vendor Options for DHCPv4

use std::fmt::Write;
use std::net::Ipv4Addr;

use crate::error::{Error, Result};
use crate::identifier::format_hex;
use crate::vendor::VendorOption;

/// Largest payload a single option TLV can carry.
pub const MAX_OPTION_PAYLOAD: usize = u8::MAX as usize;

/// DHCP option codes as defined in RFC 2132 and later RFCs.
///
/// Only codes with a standard definition in the default registry are
/// listed; any other code still decodes, as binary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OptionCode {
    /// Padding (no operation). Used for alignment.
    Pad = 0,
    /// Subnet mask (RFC 2132 §3.3).
    SubnetMask = 1,
    /// Time offset from UTC (RFC 2132 §3.4).
    TimeOffset = 2,
    /// Router/gateway addresses (RFC 2132 §3.5).
    Router = 3,
    /// Time server addresses (RFC 2132 §3.6).
    TimeServer = 4,
    /// DNS server addresses (RFC 2132 §3.8).
    DnsServer = 6,
    /// Client hostname (RFC 2132 §3.14).
    Hostname = 12,
    /// Merit dump file (RFC 2132 §3.16).
    MeritDump = 14,
    /// Domain name for DNS resolution (RFC 2132 §3.17).
    DomainName = 15,
    /// Root path (RFC 2132 §3.19).
    RootPath = 17,
    /// Interface MTU (RFC 2132 §5.1).
    InterfaceMtu = 26,
    /// Broadcast address (RFC 2132 §5.3).
    BroadcastAddress = 28,
    /// NTP server addresses (RFC 2132 §8.3).
    NtpServers = 42,
    /// Vendor specific information (RFC 2132 §8.4).
    VendorEncapsulated = 43,
    /// Requested IP address (RFC 2132 §9.1).
    RequestedIpAddress = 50,
    /// IP address lease time in seconds (RFC 2132 §9.2).
    LeaseTime = 51,
    /// Option overload - indicates sname/file fields contain options (RFC 2132 §9.3).
    OptionOverload = 52,
    /// DHCP message type (RFC 2132 §9.6).
    MessageType = 53,
    /// Server identifier (RFC 2132 §9.7).
    ServerIdentifier = 54,
    /// Parameter request list (RFC 2132 §9.8).
    ParameterRequestList = 55,
    /// Error message text (RFC 2132 §9.9).
    Message = 56,
    /// Maximum DHCP message size (RFC 2132 §9.10).
    MaxMessageSize = 57,
    /// Renewal time T1 (RFC 2132 §9.11).
    RenewalTime = 58,
    /// Rebinding time T2 (RFC 2132 §9.12).
    RebindingTime = 59,
    /// Vendor class identifier (RFC 2132 §9.13).
    VendorClassIdentifier = 60,
    /// Client identifier for unique identification (RFC 2132 §9.14).
    ClientIdentifier = 61,
    /// TFTP server name (RFC 2132 §9.4).
    TftpServerName = 66,
    /// Boot file name (RFC 2132 §9.5).
    BootFileName = 67,
    /// Client FQDN (RFC 4702).
    ClientFqdn = 81,
    /// Relay agent information (RFC 3046).
    RelayAgentInfo = 82,
    /// Vendor-identifying vendor class (RFC 3925).
    VendorClass = 124,
    /// Vendor-identifying vendor-specific information (RFC 3925).
    VendorSpecific = 125,
    /// End of options marker.
    End = 255,
}

impl TryFrom<u8> for OptionCode {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pad),
            1 => Ok(Self::SubnetMask),
            2 => Ok(Self::TimeOffset),
            3 => Ok(Self::Router),
            4 => Ok(Self::TimeServer),
            6 => Ok(Self::DnsServer),
            12 => Ok(Self::Hostname),
            14 => Ok(Self::MeritDump),
            15 => Ok(Self::DomainName),
            17 => Ok(Self::RootPath),
            26 => Ok(Self::InterfaceMtu),
            28 => Ok(Self::BroadcastAddress),
            42 => Ok(Self::NtpServers),
            43 => Ok(Self::VendorEncapsulated),
            50 => Ok(Self::RequestedIpAddress),
            51 => Ok(Self::LeaseTime),
            52 => Ok(Self::OptionOverload),
            53 => Ok(Self::MessageType),
            54 => Ok(Self::ServerIdentifier),
            55 => Ok(Self::ParameterRequestList),
            56 => Ok(Self::Message),
            57 => Ok(Self::MaxMessageSize),
            58 => Ok(Self::RenewalTime),
            59 => Ok(Self::RebindingTime),
            60 => Ok(Self::VendorClassIdentifier),
            61 => Ok(Self::ClientIdentifier),
            66 => Ok(Self::TftpServerName),
            67 => Ok(Self::BootFileName),
            81 => Ok(Self::ClientFqdn),
            82 => Ok(Self::RelayAgentInfo),
            124 => Ok(Self::VendorClass),
            125 => Ok(Self::VendorSpecific),
            255 => Ok(Self::End),
            other => Err(other),
        }
    }
}

/// DHCP message types (Option 53) as defined in RFC 2132 §9.6,
/// RFC 4388 (leasequery), RFC 6926 (bulk leasequery) and RFC 7724.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    /// Client broadcast to locate servers.
    Discover = 1,
    /// Server response to DISCOVER with IP offer.
    Offer = 2,
    /// Client request for offered parameters.
    Request = 3,
    /// Client indicates address is already in use.
    Decline = 4,
    /// Server acknowledgement with configuration.
    Ack = 5,
    /// Server negative acknowledgement.
    Nak = 6,
    /// Client releases IP address.
    Release = 7,
    /// Client requests config without IP allocation.
    Inform = 8,
    /// Server instructs client to reconfigure (RFC 3203).
    ForceRenew = 9,
    LeaseQuery = 10,
    LeaseUnassigned = 11,
    LeaseUnknown = 12,
    LeaseActive = 13,
    BulkLeaseQuery = 14,
    LeaseQueryDone = 15,
    ActiveLeaseQuery = 16,
    LeaseQueryStatus = 17,
    Tls = 18,
}

impl TryFrom<u8> for MessageType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Discover),
            2 => Ok(Self::Offer),
            3 => Ok(Self::Request),
            4 => Ok(Self::Decline),
            5 => Ok(Self::Ack),
            6 => Ok(Self::Nak),
            7 => Ok(Self::Release),
            8 => Ok(Self::Inform),
            9 => Ok(Self::ForceRenew),
            10 => Ok(Self::LeaseQuery),
            11 => Ok(Self::LeaseUnassigned),
            12 => Ok(Self::LeaseUnknown),
            13 => Ok(Self::LeaseActive),
            14 => Ok(Self::BulkLeaseQuery),
            15 => Ok(Self::LeaseQueryDone),
            16 => Ok(Self::ActiveLeaseQuery),
            17 => Ok(Self::LeaseQueryStatus),
            18 => Ok(Self::Tls),
            other => Err(other),
        }
    }
}

impl MessageType {
    /// Returns the BOOTP operation code a message of this type carries.
    ///
    /// The mapping is closed: types without an entry can't be used to
    /// build an outbound message.
    pub fn bootp_op(self) -> Option<u8> {
        use crate::header::{BOOTREPLY, BOOTREQUEST};

        match self {
            Self::Discover
            | Self::Request
            | Self::Decline
            | Self::Release
            | Self::Inform
            | Self::LeaseQuery
            | Self::BulkLeaseQuery => Some(BOOTREQUEST),
            Self::Offer
            | Self::Ack
            | Self::Nak
            | Self::LeaseUnassigned
            | Self::LeaseUnknown
            | Self::LeaseActive
            | Self::LeaseQueryDone => Some(BOOTREPLY),
            Self::ForceRenew | Self::ActiveLeaseQuery | Self::LeaseQueryStatus | Self::Tls => {
                None
            }
        }
    }

    /// Returns the conventional upper-case name, e.g. `DHCPDISCOVER`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Discover => "DHCPDISCOVER",
            Self::Offer => "DHCPOFFER",
            Self::Request => "DHCPREQUEST",
            Self::Decline => "DHCPDECLINE",
            Self::Ack => "DHCPACK",
            Self::Nak => "DHCPNAK",
            Self::Release => "DHCPRELEASE",
            Self::Inform => "DHCPINFORM",
            Self::ForceRenew => "DHCPFORCERENEW",
            Self::LeaseQuery => "DHCPLEASEQUERY",
            Self::LeaseUnassigned => "DHCPLEASEUNASSIGNED",
            Self::LeaseUnknown => "DHCPLEASEUNKNOWN",
            Self::LeaseActive => "DHCPLEASEACTIVE",
            Self::BulkLeaseQuery => "DHCPBULKLEASEQUERY",
            Self::LeaseQueryDone => "DHCPLEASEQUERYDONE",
            Self::ActiveLeaseQuery => "DHCPACTIVELEASEQUERY",
            Self::LeaseQueryStatus => "DHCPLEASEQUERYSTATUS",
            Self::Tls => "DHCPTLS",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the name of a raw message type code, or `UNKNOWN`.
pub fn message_type_name(code: u8) -> &'static str {
    MessageType::try_from(code)
        .map(MessageType::name)
        .unwrap_or("UNKNOWN")
}

/// Option overload flags (Option 52) as defined in RFC 2132 §9.3.
///
/// Indicates that the `sname` and/or `file` fields in the DHCP packet
/// header contain DHCP options instead of their normal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OverloadFlag {
    /// The `file` field contains options.
    File = 1,
    /// The `sname` field contains options.
    Sname = 2,
    /// Both `file` and `sname` fields contain options.
    Both = 3,
}

impl TryFrom<u8> for OverloadFlag {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::File),
            2 => Ok(Self::Sname),
            3 => Ok(Self::Both),
            other => Err(other),
        }
    }
}

/// Strips trailing NUL bytes, keeping embedded ones (RFC 2132 §2).
pub fn trim_trailing_nuls(data: &[u8]) -> &[u8] {
    let end = data
        .iter()
        .rposition(|byte| *byte != 0)
        .map_or(0, |index| index + 1);
    &data[..end]
}

/// Appends one `[code][length][payload]` TLV.
///
/// # Errors
///
/// Returns [`Error::OptionTooLong`] if the length byte can't describe
/// `payload`; nothing is written in that case.
pub(crate) fn write_tlv(buffer: &mut Vec<u8>, code: u8, payload: &[u8]) -> Result<()> {
    let len = u8::try_from(payload.len()).map_err(|_| Error::OptionTooLong {
        code,
        length: payload.len(),
        capacity: MAX_OPTION_PAYLOAD,
    })?;
    buffer.push(code);
    buffer.push(len);
    buffer.extend_from_slice(payload);
    Ok(())
}

/// The typed content of a DHCP option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Opaque bytes; the fallback for codes without a definition.
    Binary(Vec<u8>),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    /// Text. Trailing NULs are never put on the wire; embedded NULs are kept.
    Text(Vec<u8>),
    Address(Ipv4Addr),
    Addresses(Vec<Ipv4Addr>),
    /// Vendor-identifying vendor-specific information with suboptions.
    Vendor(VendorOption),
}

impl OptionValue {
    /// Encodes the value to the option payload (without code and length).
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::Binary(data) => data.clone(),
            Self::Uint8(value) => vec![*value],
            Self::Uint16(value) => value.to_be_bytes().to_vec(),
            Self::Uint32(value) => value.to_be_bytes().to_vec(),
            Self::Text(text) => trim_trailing_nuls(text).to_vec(),
            Self::Address(addr) => addr.octets().to_vec(),
            Self::Addresses(addrs) => addrs.iter().flat_map(|addr| addr.octets()).collect(),
            Self::Vendor(vendor) => vendor.payload(),
        }
    }

    /// Returns the text content without trailing NULs.
    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            Self::Text(text) => Some(trim_trailing_nuls(text)),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::Uint8(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Uint32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Address(addr) => Some(*addr),
            Self::Addresses(addrs) => addrs.first().copied(),
            _ => None,
        }
    }

    pub fn as_vendor(&self) -> Option<&VendorOption> {
        match self {
            Self::Vendor(vendor) => Some(vendor),
            _ => None,
        }
    }

    /// Checks that the value can be put on the wire as option `code`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyOption`] for text that is empty once trailing NULs
    ///   are stripped, and for an empty address list
    /// - [`Error::OptionTooLong`] for a payload over 255 bytes, or a vendor
    ///   suboption block over 250 bytes
    pub fn validate(&self, code: u8) -> Result<()> {
        match self {
            Self::Text(text) if trim_trailing_nuls(text).is_empty() => {
                return Err(Error::EmptyOption(code));
            }
            Self::Addresses(addrs) if addrs.is_empty() => {
                return Err(Error::EmptyOption(code));
            }
            Self::Vendor(vendor) => vendor.validate(code)?,
            _ => {}
        }

        let length = self.payload().len();
        if length > MAX_OPTION_PAYLOAD {
            return Err(Error::OptionTooLong {
                code,
                length,
                capacity: MAX_OPTION_PAYLOAD,
            });
        }
        Ok(())
    }

    fn deep_copy(&self) -> Self {
        match self {
            Self::Vendor(vendor) => Self::Vendor(vendor.deep_copy()),
            other => other.clone(),
        }
    }
}

/// A single DHCP option: a code and its typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpOption {
    code: u8,
    value: OptionValue,
}

impl DhcpOption {
    pub fn new(code: u8, value: OptionValue) -> Self {
        Self { code, value }
    }

    pub fn binary(code: u8, data: impl Into<Vec<u8>>) -> Self {
        Self::new(code, OptionValue::Binary(data.into()))
    }

    pub fn text(code: u8, text: impl Into<Vec<u8>>) -> Self {
        Self::new(code, OptionValue::Text(text.into()))
    }

    pub fn uint8(code: u8, value: u8) -> Self {
        Self::new(code, OptionValue::Uint8(value))
    }

    pub fn uint16(code: u8, value: u16) -> Self {
        Self::new(code, OptionValue::Uint16(value))
    }

    pub fn uint32(code: u8, value: u32) -> Self {
        Self::new(code, OptionValue::Uint32(value))
    }

    pub fn address(code: u8, addr: Ipv4Addr) -> Self {
        Self::new(code, OptionValue::Address(addr))
    }

    pub fn addresses(code: u8, addrs: Vec<Ipv4Addr>) -> Self {
        Self::new(code, OptionValue::Addresses(addrs))
    }

    /// Builds option 125 around a vendor option.
    pub fn vendor(vendor: VendorOption) -> Self {
        Self::new(OptionCode::VendorSpecific as u8, OptionValue::Vendor(vendor))
    }

    /// Builds the DHCP message type option (53).
    pub fn message_type(message_type: MessageType) -> Self {
        Self::uint8(OptionCode::MessageType as u8, message_type as u8)
    }

    /// Returns the option code.
    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut OptionValue {
        &mut self.value
    }

    /// Returns the encoded payload (the bytes after code and length).
    pub fn payload(&self) -> Vec<u8> {
        self.value.payload()
    }

    /// See [`OptionValue::validate`].
    pub fn validate(&self) -> Result<()> {
        self.value.validate(self.code)
    }

    /// Encodes the option to its wire format (code + length + data).
    ///
    /// The returned bytes can be directly appended to a DHCP packet's
    /// options section.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        self.write_to(&mut result)?;
        Ok(result)
    }

    /// Validates the option and appends its TLV to `buffer`.
    pub(crate) fn write_to(&self, buffer: &mut Vec<u8>) -> Result<()> {
        self.validate()?;
        write_tlv(buffer, self.code, &self.value.payload())
    }

    /// Returns a copy that shares no state with `self`, nested vendor
    /// suboptions included.
    pub fn deep_copy(&self) -> Self {
        Self {
            code: self.code,
            value: self.value.deep_copy(),
        }
    }

    /// Renders the option as one `type=NNN, len=NNN: value` line.
    ///
    /// Vendor options continue on further lines with their suboptions,
    /// indented two more spaces.
    pub fn to_text(&self, indent: usize) -> String {
        let len = self.payload().len();
        let mut output = format!("{:indent$}type={:03}, len={:03}:", "", self.code, len);

        match &self.value {
            OptionValue::Binary(data) => {
                let _ = write!(output, " {}", format_hex(data));
            }
            OptionValue::Uint8(value) => {
                let _ = write!(output, " {} (uint8)", value);
            }
            OptionValue::Uint16(value) => {
                let _ = write!(output, " {} (uint16)", value);
            }
            OptionValue::Uint32(value) => {
                let _ = write!(output, " {} (uint32)", value);
            }
            OptionValue::Text(text) => {
                let _ = write!(
                    output,
                    " \"{}\" (string)",
                    String::from_utf8_lossy(trim_trailing_nuls(text))
                );
            }
            OptionValue::Address(addr) => {
                let _ = write!(output, " {}", addr);
            }
            OptionValue::Addresses(addrs) => {
                for addr in addrs {
                    let _ = write!(output, " {}", addr);
                }
            }
            OptionValue::Vendor(vendor) => {
                output.push(' ');
                output.push_str(&vendor.to_text(indent + 2));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_conversions() {
        for value in 1..=18u8 {
            let msg_type = MessageType::try_from(value).unwrap();
            assert_eq!(msg_type as u8, value);
        }
        assert!(MessageType::try_from(0).is_err());
        assert!(MessageType::try_from(19).is_err());
    }

    #[test]
    fn test_message_type_bootp_op() {
        use crate::header::{BOOTREPLY, BOOTREQUEST};

        let expected = [
            (MessageType::Discover, BOOTREQUEST),
            (MessageType::Offer, BOOTREPLY),
            (MessageType::Request, BOOTREQUEST),
            (MessageType::Decline, BOOTREQUEST),
            (MessageType::Ack, BOOTREPLY),
            (MessageType::Nak, BOOTREPLY),
            (MessageType::Release, BOOTREQUEST),
            (MessageType::Inform, BOOTREQUEST),
            (MessageType::LeaseQuery, BOOTREQUEST),
            (MessageType::LeaseUnassigned, BOOTREPLY),
            (MessageType::LeaseUnknown, BOOTREPLY),
            (MessageType::LeaseActive, BOOTREPLY),
        ];
        for (message_type, op) in expected {
            assert_eq!(message_type.bootp_op(), Some(op), "{}", message_type);
        }
        assert_eq!(MessageType::Tls.bootp_op(), None);
    }

    #[test]
    fn test_message_type_names() {
        for code in 0..=255u8 {
            let name = message_type_name(code);
            match MessageType::try_from(code) {
                Ok(message_type) => assert_eq!(name, message_type.name()),
                Err(_) => assert_eq!(name, "UNKNOWN"),
            }
        }
        assert_eq!(message_type_name(1), "DHCPDISCOVER");
        assert_eq!(message_type_name(18), "DHCPTLS");
        assert_eq!(format!("{}", MessageType::Ack), "DHCPACK");
    }

    #[test]
    fn test_trim_trailing_nuls() {
        assert_eq!(trim_trailing_nuls(b"two\0\0"), b"two");
        assert_eq!(trim_trailing_nuls(b"em\0bed"), b"em\0bed");
        assert_eq!(trim_trailing_nuls(b"\0\0\0"), b"");
        assert_eq!(trim_trailing_nuls(b""), b"");
    }

    #[test]
    fn test_text_encoding_strips_trailing_nuls() {
        let option = DhcpOption::text(OptionCode::Hostname as u8, b"two\0\0".to_vec());
        assert_eq!(option.encode().unwrap(), vec![12, 3, b't', b'w', b'o']);

        let embedded = DhcpOption::text(OptionCode::DomainName as u8, b"em\0bed".to_vec());
        assert_eq!(embedded.encode().unwrap(), vec![15, 6, b'e', b'm', 0, b'b', b'e', b'd']);
    }

    #[test]
    fn test_option_encoding() {
        assert_eq!(
            DhcpOption::address(1, Ipv4Addr::new(255, 255, 255, 0)).encode().unwrap(),
            vec![1, 4, 255, 255, 255, 0]
        );
        assert_eq!(
            DhcpOption::uint32(51, 86400).encode().unwrap(),
            vec![51, 4, 0, 1, 0x51, 0x80]
        );
        assert_eq!(DhcpOption::uint16(26, 1500).encode().unwrap(), vec![26, 2, 0x05, 0xdc]);
        assert_eq!(
            DhcpOption::message_type(MessageType::Offer).encode().unwrap(),
            vec![53, 1, 2]
        );
    }

    #[test]
    fn test_long_payload_rejected() {
        let option = DhcpOption::text(OptionCode::Hostname as u8, "a".repeat(300));
        assert!(matches!(
            option.encode(),
            Err(Error::OptionTooLong { code: 12, length: 300, capacity: 255 })
        ));
        assert_eq!(option.payload().len(), 300);

        let fits = DhcpOption::binary(43, vec![7; 255]);
        let encoded = fits.encode().unwrap();
        assert_eq!(encoded[1], 255);
        assert_eq!(encoded.len(), 257);
    }

    #[test]
    fn test_address_list_limit() {
        let addrs = vec![Ipv4Addr::new(10, 0, 0, 1); 63];
        let option = DhcpOption::addresses(OptionCode::DnsServer as u8, addrs);
        assert_eq!(option.encode().unwrap()[1], 252);

        let addrs = vec![Ipv4Addr::new(10, 0, 0, 1); 64];
        let option = DhcpOption::addresses(OptionCode::DnsServer as u8, addrs);
        assert!(matches!(
            option.validate(),
            Err(Error::OptionTooLong { length: 256, .. })
        ));
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(matches!(
            DhcpOption::text(12, "").encode(),
            Err(Error::EmptyOption(12))
        ));
        assert!(matches!(
            DhcpOption::text(12, b"\0\0".to_vec()).validate(),
            Err(Error::EmptyOption(12))
        ));
        assert!(matches!(
            DhcpOption::addresses(6, vec![]).validate(),
            Err(Error::EmptyOption(6))
        ));
        // An empty opaque payload is valid on the wire.
        assert_eq!(DhcpOption::binary(80, vec![]).encode().unwrap(), vec![80, 0]);
    }

    #[test]
    fn test_option_to_text() {
        assert_eq!(
            DhcpOption::message_type(MessageType::Discover).to_text(2),
            "  type=053, len=001: 1 (uint8)"
        );
        assert_eq!(
            DhcpOption::text(87, "lorem ipsum").to_text(2),
            "  type=087, len=011: \"lorem ipsum\" (string)"
        );
        assert_eq!(
            DhcpOption::addresses(123, vec![Ipv4Addr::new(192, 0, 2, 3)]).to_text(2),
            "  type=123, len=004: 192.0.2.3"
        );
        assert_eq!(
            DhcpOption::uint32(156, 123456).to_text(2),
            "  type=156, len=004: 123456 (uint32)"
        );
        assert_eq!(
            DhcpOption::binary(61, vec![100, 101, 102, 103]).to_text(0),
            "type=061, len=004: 64:65:66:67"
        );
    }
}
