//! DHCPv4 message decoding and encoding per RFC 2131.
//!
//! A DHCP message consists of the fixed 236-byte header (see
//! [`header`](crate::header)) followed by a 4-byte magic cookie and
//! variable-length options. [`DhcpPacket`] ties the header, the options,
//! the client classes and the receive metadata together.
//!
//! # Decoding policy
//!
//! Decoding network input never panics. A buffer shorter than the fixed
//! header fails outright. After that, damage is contained where it's found:
//!
//! - a truncated top-level option ends the options area; everything
//!   decoded before it is kept and no error is reported,
//! - an option with invalid content is dropped on its own,
//! - truncation inside a vendor option's suboptions fails the decode with
//!   [`Error::TruncatedOptions`], which still carries what was decoded.
//!
//! # References
//!
//! - RFC 2131: Dynamic Host Configuration Protocol
//! - RFC 2132: DHCP Options and BOOTP Vendor Extensions

use std::fmt::Write;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::classes::ClientClasses;
use crate::container::OptionContainer;
use crate::error::{Error, Result, SkipRemaining};
use crate::header::{FLAG_BROADCAST, FixedHeader, HEADER_LEN, fill_field};
use crate::identifier::{ClientId, HwAddr};
use crate::options::{
    DhcpOption, MessageType, OptionCode, OptionValue, OverloadFlag, message_type_name,
    trim_trailing_nuls,
};
use crate::registry::{OptionFactory, OptionRegistry, OptionSpace};
use crate::scanner::{ScanEnd, scan_options};

/// DHCP magic cookie that identifies DHCP packets (vs BOOTP).
pub const DHCP_MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

/// Standard DHCP server port.
pub const DHCP_SERVER_PORT: u16 = 67;

/// Standard DHCP client port.
pub const DHCP_CLIENT_PORT: u16 = 68;

/// A DHCPv4 message.
///
/// Built either from bytes with [`parse`](Self::parse) /
/// [`parse_with`](Self::parse_with), or from a message type and
/// transaction id with [`new`](Self::new). The interface, transport
/// addresses, link-layer addresses and timestamp are metadata and never
/// appear on the wire.
#[derive(Debug, Clone)]
pub struct DhcpPacket {
    header: FixedHeader,
    options: OptionContainer,
    classes: ClientClasses,
    iface: String,
    iface_index: Option<u32>,
    local_addr: SocketAddrV4,
    remote_addr: SocketAddrV4,
    local_hw_addr: Option<HwAddr>,
    remote_hw_addr: Option<HwAddr>,
    timestamp: Option<DateTime<Utc>>,
}

impl DhcpPacket {
    fn with_header(header: FixedHeader) -> Self {
        Self {
            header,
            options: OptionContainer::new(),
            classes: ClientClasses::new(),
            iface: String::new(),
            iface_index: None,
            local_addr: SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DHCP_SERVER_PORT),
            remote_addr: SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DHCP_CLIENT_PORT),
            local_hw_addr: None,
            remote_hw_addr: None,
            timestamp: None,
        }
    }

    /// Creates an outbound message of the given type.
    ///
    /// The operation code is derived from the message type and the message
    /// type option (53) is added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMessageType`] for types with no BOOTP
    /// operation code.
    pub fn new(message_type: MessageType, xid: u32) -> Result<Self> {
        let op = message_type
            .bootp_op()
            .ok_or(Error::InvalidMessageType(message_type as u8))?;

        let mut packet = Self::with_header(FixedHeader {
            op,
            xid,
            ..Default::default()
        });
        packet.options.add(DhcpOption::message_type(message_type))?;
        Ok(packet)
    }

    /// Parses a DHCP packet from raw bytes using the standard option
    /// definitions.
    ///
    /// See [`parse_with`](Self::parse_with).
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &OptionRegistry::default())
    }

    /// Parses a DHCP packet, interpreting option payloads with `factory`.
    ///
    /// A buffer holding only the fixed header is accepted as a BOOTP
    /// message without options.
    ///
    /// # Errors
    ///
    /// - [`Error::TruncatedHeader`] if `data` is shorter than the fixed header
    /// - [`Error::InvalidPacket`] if the magic cookie is truncated or wrong
    /// - [`Error::TruncatedOptions`] if a vendor option's suboptions are
    ///   truncated; the partially decoded packet is attached
    pub fn parse_with<F: OptionFactory + ?Sized>(data: &[u8], factory: &F) -> Result<Self> {
        let header = FixedHeader::unpack(data)?;
        let mut packet = Self::with_header(header);

        let rest = &data[HEADER_LEN..];
        if rest.is_empty() {
            debug!("BOOTP message without options, xid=0x{:x}", packet.xid());
            return Ok(packet);
        }

        if rest.len() < DHCP_MAGIC_COOKIE.len() {
            return Err(Error::InvalidPacket(format!(
                "Truncated magic cookie: {} bytes",
                rest.len()
            )));
        }
        if rest[..DHCP_MAGIC_COOKIE.len()] != DHCP_MAGIC_COOKIE {
            return Err(Error::InvalidPacket("Invalid magic cookie".to_string()));
        }

        let options_area = &rest[DHCP_MAGIC_COOKIE.len()..];
        match packet.scan_all(options_area, factory) {
            Ok(()) => Ok(packet),
            Err(e) => Err(Error::TruncatedOptions {
                code: e.code,
                reason: e.reason,
                partial: Box::new(packet),
            }),
        }
    }

    fn scan_all<F: OptionFactory + ?Sized>(
        &mut self,
        options_area: &[u8],
        factory: &F,
    ) -> std::result::Result<(), SkipRemaining> {
        self.scan_area("options", options_area, factory)?;

        let overload = self
            .options
            .get(OptionCode::OptionOverload as u8)
            .and_then(|option| option.payload().first().copied())
            .and_then(|flag| OverloadFlag::try_from(flag).ok());

        if let Some(flag) = overload {
            if matches!(flag, OverloadFlag::File | OverloadFlag::Both) {
                let file = self.header.file;
                self.scan_area("file", &file, factory)?;
            }
            if matches!(flag, OverloadFlag::Sname | OverloadFlag::Both) {
                let sname = self.header.sname;
                self.scan_area("sname", &sname, factory)?;
            }
        }

        Ok(())
    }

    fn scan_area<F: OptionFactory + ?Sized>(
        &mut self,
        area: &str,
        data: &[u8],
        factory: &F,
    ) -> std::result::Result<(), SkipRemaining> {
        let end = scan_options(data, OptionSpace::Dhcp4, factory, &mut self.options)?;
        if let ScanEnd::Truncated { offset, code } = end {
            debug!(
                "xid=0x{:x}: {} truncated at option {} (offset {}), ignoring the rest",
                self.xid(),
                area,
                code,
                offset
            );
        }
        Ok(())
    }

    /// Encodes the packet to bytes for transmission.
    ///
    /// Options are written in ascending code order, followed by the End
    /// option. No padding is added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OptionTooLong`] or [`Error::EmptyOption`] for an
    /// option changed through [`option_mut`](Self::option_mut) into a
    /// value that no longer fits on the wire.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let options = self.options.serialize()?;
        let mut packet = Vec::with_capacity(HEADER_LEN + DHCP_MAGIC_COOKIE.len() + options.len());

        self.header.pack(&mut packet);
        packet.extend_from_slice(&DHCP_MAGIC_COOKIE);
        packet.extend_from_slice(&options);

        Ok(packet)
    }

    /// Returns the size of [`encode`](Self::encode)'s output.
    pub fn encoded_len(&self) -> Result<usize> {
        Ok(HEADER_LEN + DHCP_MAGIC_COOKIE.len() + self.options.serialize()?.len())
    }

    /// Returns the raw fixed header.
    pub fn header(&self) -> &FixedHeader {
        &self.header
    }

    pub fn op(&self) -> u8 {
        self.header.op
    }

    pub fn htype(&self) -> u8 {
        self.header.htype
    }

    pub fn hlen(&self) -> u8 {
        self.header.hlen
    }

    pub fn hops(&self) -> u8 {
        self.header.hops
    }

    pub fn set_hops(&mut self, hops: u8) {
        self.header.hops = hops;
    }

    /// Returns the transaction id.
    pub fn xid(&self) -> u32 {
        self.header.xid
    }

    pub fn set_xid(&mut self, xid: u32) {
        self.header.xid = xid;
    }

    pub fn secs(&self) -> u16 {
        self.header.secs
    }

    pub fn set_secs(&mut self, secs: u16) {
        self.header.secs = secs;
    }

    pub fn flags(&self) -> u16 {
        self.header.flags
    }

    pub fn set_flags(&mut self, flags: u16) {
        self.header.flags = flags;
    }

    /// Returns true if the broadcast flag (bit 15) is set.
    ///
    /// When set, servers must broadcast replies instead of unicasting.
    pub fn is_broadcast(&self) -> bool {
        (self.header.flags & FLAG_BROADCAST) != 0
    }

    pub fn set_broadcast(&mut self, broadcast: bool) {
        if broadcast {
            self.header.flags |= FLAG_BROADCAST;
        } else {
            self.header.flags &= !FLAG_BROADCAST;
        }
    }

    pub fn ciaddr(&self) -> Ipv4Addr {
        self.header.ciaddr
    }

    pub fn set_ciaddr(&mut self, addr: Ipv4Addr) {
        self.header.ciaddr = addr;
    }

    pub fn yiaddr(&self) -> Ipv4Addr {
        self.header.yiaddr
    }

    pub fn set_yiaddr(&mut self, addr: Ipv4Addr) {
        self.header.yiaddr = addr;
    }

    pub fn siaddr(&self) -> Ipv4Addr {
        self.header.siaddr
    }

    pub fn set_siaddr(&mut self, addr: Ipv4Addr) {
        self.header.siaddr = addr;
    }

    pub fn giaddr(&self) -> Ipv4Addr {
        self.header.giaddr
    }

    pub fn set_giaddr(&mut self, addr: Ipv4Addr) {
        self.header.giaddr = addr;
    }

    /// Returns true if a relay agent forwarded the message.
    ///
    /// That is the case when giaddr is neither 0.0.0.0 nor the broadcast
    /// address.
    pub fn is_relayed(&self) -> bool {
        let giaddr = self.header.giaddr;
        giaddr != Ipv4Addr::UNSPECIFIED && giaddr != Ipv4Addr::BROADCAST
    }

    /// Returns the client hardware address from htype, hlen and chaddr.
    pub fn hw_addr(&self) -> HwAddr {
        HwAddr::from_chaddr(self.header.htype, self.header.chaddr_bytes())
    }

    /// Sets htype, hlen and chaddr from `hw_addr`.
    pub fn set_hw_addr(&mut self, hw_addr: &HwAddr) {
        self.header.htype = hw_addr.htype();
        self.header.hlen = hw_addr.hlen();
        self.header.chaddr.fill(0);
        self.header.chaddr[..hw_addr.bytes().len()].copy_from_slice(hw_addr.bytes());
    }

    /// Returns the server host name without trailing zero padding.
    pub fn sname(&self) -> &[u8] {
        trim_trailing_nuls(&self.header.sname)
    }

    /// # Errors
    ///
    /// Returns [`Error::FieldTooLong`] for content over 64 bytes.
    pub fn set_sname(&mut self, sname: &[u8]) -> Result<()> {
        fill_field(&mut self.header.sname, sname, "sname")
    }

    /// Returns the boot file name without trailing zero padding.
    pub fn file(&self) -> &[u8] {
        trim_trailing_nuls(&self.header.file)
    }

    /// # Errors
    ///
    /// Returns [`Error::FieldTooLong`] for content over 128 bytes.
    pub fn set_file(&mut self, file: &[u8]) -> Result<()> {
        fill_field(&mut self.header.file, file, "file")
    }

    /// Returns the raw value of the message type option (53).
    pub fn message_type_code(&self) -> Option<u8> {
        let option = self.options.get(OptionCode::MessageType as u8)?;
        match option.value() {
            OptionValue::Uint8(value) => Some(*value),
            OptionValue::Binary(data) if data.len() == 1 => Some(data[0]),
            _ => None,
        }
    }

    /// Returns the DHCP message type (Option 53) if present and known.
    ///
    /// Returns `None` for BOOTP packets which don't have this option.
    pub fn message_type(&self) -> Option<MessageType> {
        self.message_type_code()
            .and_then(|code| MessageType::try_from(code).ok())
    }

    /// Sets the message type option, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Same as [`OptionContainer::replace`].
    pub fn set_message_type(&mut self, message_type: MessageType) -> Result<()> {
        self.options
            .replace(DhcpOption::message_type(message_type))?;
        Ok(())
    }

    /// Returns the message type name, `UNKNOWN` if missing or unknown.
    pub fn name(&self) -> &'static str {
        self.message_type_code()
            .map_or("UNKNOWN", message_type_name)
    }

    /// Adds an option.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateOption`] if an option with the same code
    /// is already present, [`Error::ReservedOptionCode`] for codes 0 and 255.
    pub fn add_option(&mut self, option: impl Into<Arc<DhcpOption>>) -> Result<()> {
        self.options.add(option)
    }

    pub fn option(&self, code: u8) -> Option<&DhcpOption> {
        self.options.get(code)
    }

    /// Returns a shared handle to the option.
    ///
    /// Every caller gets the same instance. It stays valid after the option
    /// is removed from the packet or the packet is dropped.
    pub fn option_shared(&self, code: u8) -> Option<Arc<DhcpOption>> {
        self.options.get_shared(code)
    }

    /// Returns a private deep copy of the option.
    pub fn option_copy(&self, code: u8) -> Option<DhcpOption> {
        self.options.get_copy(code)
    }

    /// Returns the option for modification. Shared handles handed out
    /// earlier keep the old value.
    pub fn option_mut(&mut self, code: u8) -> Option<&mut DhcpOption> {
        self.options.get_mut(code)
    }

    /// Removes an option. Returns `true` if it was present.
    pub fn remove_option(&mut self, code: u8) -> bool {
        self.options.remove(code)
    }

    pub fn options(&self) -> &OptionContainer {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionContainer {
        &mut self.options
    }

    /// Returns the requested IP address (Option 50) if present.
    ///
    /// Clients include this in DISCOVER to request a specific IP,
    /// and in REQUEST to confirm the offered IP.
    pub fn requested_ip(&self) -> Option<Ipv4Addr> {
        self.options
            .get(OptionCode::RequestedIpAddress as u8)
            .and_then(|option| option.value().as_address())
    }

    /// Returns the server identifier (Option 54) if present.
    pub fn server_identifier(&self) -> Option<Ipv4Addr> {
        self.options
            .get(OptionCode::ServerIdentifier as u8)
            .and_then(|option| option.value().as_address())
    }

    /// Returns the client identifier (Option 61) if present and well formed.
    pub fn client_identifier(&self) -> Option<ClientId> {
        self.options
            .get(OptionCode::ClientIdentifier as u8)
            .and_then(|option| ClientId::new(option.payload()).ok())
    }

    /// Returns the client hostname (Option 12) if present.
    pub fn hostname(&self) -> Option<String> {
        self.options
            .get(OptionCode::Hostname as u8)
            .map(|option| String::from_utf8_lossy(trim_trailing_nuls(&option.payload())).into_owned())
    }

    /// Returns the parameter request list (Option 55) if present.
    ///
    /// This is a list of option codes the client wants in the response.
    pub fn parameter_request_list(&self) -> Option<Vec<u8>> {
        self.options
            .get(OptionCode::ParameterRequestList as u8)
            .map(DhcpOption::payload)
    }

    /// Returns the relay agent information (Option 82) if present.
    pub fn relay_agent_info(&self) -> Option<Vec<u8>> {
        self.options
            .get(OptionCode::RelayAgentInfo as u8)
            .map(DhcpOption::payload)
    }

    pub fn classes(&self) -> &ClientClasses {
        &self.classes
    }

    /// Adds the message to a class.
    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.insert(class);
    }

    /// Marks a class for evaluation later in processing.
    pub fn add_deferred_class(&mut self, class: impl Into<String>) {
        self.classes.insert_deferred(class);
    }

    /// Adds the message to `subclass`, spawned from template `class`.
    pub fn add_subclass(&mut self, class: impl Into<String>, subclass: impl Into<String>) {
        self.classes.insert_subclass(class, subclass);
    }

    pub fn in_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Returns the name of the interface the message arrived on.
    pub fn iface(&self) -> &str {
        &self.iface
    }

    pub fn set_iface(&mut self, iface: impl Into<String>) {
        self.iface = iface.into();
    }

    pub fn iface_index(&self) -> Option<u32> {
        self.iface_index
    }

    pub fn set_iface_index(&mut self, index: u32) {
        self.iface_index = Some(index);
    }

    pub fn local_addr(&self) -> SocketAddrV4 {
        self.local_addr
    }

    pub fn set_local_addr(&mut self, addr: SocketAddrV4) {
        self.local_addr = addr;
    }

    pub fn remote_addr(&self) -> SocketAddrV4 {
        self.remote_addr
    }

    pub fn set_remote_addr(&mut self, addr: SocketAddrV4) {
        self.remote_addr = addr;
    }

    /// Link-layer address of the interface the message was received on.
    pub fn local_hw_addr(&self) -> Option<&HwAddr> {
        self.local_hw_addr.as_ref()
    }

    pub fn set_local_hw_addr(&mut self, hw_addr: HwAddr) {
        self.local_hw_addr = Some(hw_addr);
    }

    /// Link-layer source address of the received frame.
    ///
    /// Unlike [`hw_addr`](Self::hw_addr) this comes from the frame, not
    /// from the DHCP header, so it's the relay's address for relayed
    /// messages.
    pub fn remote_hw_addr(&self) -> Option<&HwAddr> {
        self.remote_hw_addr.as_ref()
    }

    pub fn set_remote_hw_addr(&mut self, hw_addr: HwAddr) {
        self.remote_hw_addr = Some(hw_addr);
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Records the current time as the message timestamp, unless one was
    /// already recorded, and returns it.
    pub fn stamp(&mut self) -> DateTime<Utc> {
        *self.timestamp.get_or_insert_with(Utc::now)
    }

    /// Builds a log label from a hardware address, client identifier and
    /// transaction id.
    ///
    /// ```
    /// use dhcpcodec::DhcpPacket;
    ///
    /// assert_eq!(
    ///     DhcpPacket::make_label(None, None, 0),
    ///     "[no hwaddr info], cid=[no info], tid=0x0"
    /// );
    /// ```
    pub fn make_label(hw_addr: Option<&HwAddr>, client_id: Option<&ClientId>, xid: u32) -> String {
        format!(
            "{}, tid=0x{:x}",
            Self::make_label_without_tid(hw_addr, client_id),
            xid
        )
    }

    /// Same as [`make_label`](Self::make_label) without the transaction id.
    pub fn make_label_without_tid(hw_addr: Option<&HwAddr>, client_id: Option<&ClientId>) -> String {
        format!(
            "[{}], cid=[{}]",
            hw_addr.map_or_else(|| "no hwaddr info".to_string(), |hw| hw.to_text(true)),
            client_id.map_or_else(|| "no info".to_string(), ClientId::to_text)
        )
    }

    /// Returns the label identifying this message in logs.
    ///
    /// A client identifier option too short to be valid is shown as
    /// `no info` and flagged with a ` (malformed client-id)` suffix.
    pub fn label(&self) -> String {
        let option = self.options.get(OptionCode::ClientIdentifier as u8);
        let client_id = option.and_then(|option| ClientId::new(option.payload()).ok());

        let mut label = Self::make_label(Some(&self.hw_addr()), client_id.as_ref(), self.xid());
        if option.is_some() && client_id.is_none() {
            label.push_str(" (malformed client-id)");
        }
        label
    }

    /// Renders the addresses, message type, transaction id and options.
    pub fn to_text(&self) -> String {
        let mut output = format!(
            "local_address={}, remote_address={}, msg_type=",
            self.local_addr, self.remote_addr
        );

        match self.message_type_code() {
            Some(code) => {
                let _ = write!(output, "{} ({})", message_type_name(code), code);
            }
            None => output.push_str("(missing)"),
        }
        let _ = write!(output, ", transid=0x{:x}", self.xid());

        if self.options.is_empty() {
            output.push_str(", message contains no options");
        } else {
            output.push_str(",\noptions:");
            for option in self.options.iter() {
                let _ = write!(output, "\n{}", option.to_text(2));
            }
        }

        output
    }
}
