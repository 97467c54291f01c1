//! # dhcpcodec
//!
//! A DHCPv4 message codec implementing RFC 2131 (DHCP), RFC 2132 (DHCP
//! Options) and RFC 3925 (vendor-identifying vendor options).
//!
//! ## Features
//!
//! - Fixed header encode/decode with bit-exact offsets
//! - Code-unique option container, encoded in ascending code order
//! - Vendor options (125) with suboptions in per-vendor option spaces
//! - Option overload (52): options carried in `sname` and `file`
//! - Injected option definitions instead of a global table
//! - Client classification tags, log labels and text dumps
//! - A read-only UDP inspector built on Tokio
//!
//! ## Quick Start
//!
//! ```
//! use dhcpcodec::{DhcpOption, DhcpPacket, MessageType};
//!
//! let mut packet = DhcpPacket::new(MessageType::Discover, 0x1234)?;
//! packet.add_option(DhcpOption::text(12, "printer"))?;
//!
//! let decoded = DhcpPacket::parse(&packet.encode()?)?;
//! assert_eq!(decoded.hostname().as_deref(), Some("printer"));
//! # Ok::<(), dhcpcodec::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`DhcpPacket`] - Message aggregate: header, options, classes, metadata
//! - [`FixedHeader`] - The 236-byte fixed header
//! - [`OptionContainer`] - Options keyed by code
//! - [`OptionRegistry`] - Which value type each option code decodes to
//! - [`VendorOption`] - Option 125 and its suboptions
//! - [`ClientClasses`] - Classification tags
//! - [`Config`] - Extra option definitions and inspector settings
//! - [`Inspector`] - Listens on UDP and logs decoded messages

pub mod capture;
pub mod classes;
pub mod config;
pub mod container;
pub mod error;
pub mod header;
pub mod identifier;
pub mod options;
pub mod packet;
pub mod registry;
pub mod scanner;
pub mod vendor;

pub use capture::Inspector;
pub use classes::ClientClasses;
pub use config::{Config, OptionDefinition};
pub use container::OptionContainer;
pub use error::{Error, OptionError, Result, SkipRemaining};
pub use header::FixedHeader;
pub use identifier::{ClientId, HwAddr};
pub use options::{DhcpOption, MessageType, OptionCode, OptionValue};
pub use packet::DhcpPacket;
pub use registry::{OptionFactory, OptionKind, OptionRegistry, OptionSpace};
pub use vendor::VendorOption;
