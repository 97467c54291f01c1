//! Error types for the DHCP codec.
//!
//! All fallible operations in this crate return [`Result<T>`], which uses
//! the [`Error`] enum for error variants. Option interpretation has its own
//! two-level error, [`OptionError`], which never leaves the decoder except
//! through [`Error::TruncatedOptions`].

use crate::packet::DhcpPacket;

/// Errors that can occur while decoding, building or inspecting messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File system or network I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error (config files).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hex input given on the command line could not be decoded.
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The buffer is shorter than the fixed DHCPv4 header.
    ///
    /// This is the only decode failure that leaves nothing usable behind.
    #[error("Truncated DHCPv4 packet: {length} bytes (minimum {minimum})")]
    TruncatedHeader { length: usize, minimum: usize },

    /// Malformed DHCP packet received.
    ///
    /// Raised for a truncated or invalid magic cookie.
    #[error("Invalid DHCP packet: {0}")]
    InvalidPacket(String),

    /// An option's own nested structure was truncated.
    ///
    /// Decoding stopped at option `code`. The options decoded before it are
    /// kept in `partial`, so the caller may decide to process the message
    /// anyway; see [`Error::into_partial_packet`].
    #[error("Skipped remaining options at option {code}: {reason}")]
    TruncatedOptions {
        code: u8,
        reason: String,
        partial: Box<DhcpPacket>,
    },

    /// An option with this code is already present in the container.
    #[error("Option {0} already present")]
    DuplicateOption(u8),

    /// Pad (0) and End (255) are sentinels and can't be stored as options.
    #[error("Option code {0} is reserved")]
    ReservedOptionCode(u8),

    /// An option value too large for its length byte.
    ///
    /// For a vendor option `capacity` is the room left for suboptions
    /// after the enterprise number and data-len byte.
    #[error("Option {code} payload of {length} bytes exceeds {capacity}")]
    OptionTooLong {
        code: u8,
        length: usize,
        capacity: usize,
    },

    /// A text or address-list option with no content.
    #[error("Option {0} has no content")]
    EmptyOption(u8),

    /// Hardware address longer than the 16-byte chaddr field.
    #[error("Hardware address of {0} bytes exceeds 16 bytes")]
    HardwareAddressTooLong(usize),

    /// Client identifier outside the 2..=255 byte range.
    #[error("Invalid client identifier length {0}")]
    InvalidClientId(usize),

    /// Content longer than a fixed-size header field.
    #[error("{field} of {length} bytes exceeds capacity {capacity}")]
    FieldTooLong {
        field: &'static str,
        length: usize,
        capacity: usize,
    },

    /// The message type has no BOOTP operation code.
    #[error("Invalid message type: {0}")]
    InvalidMessageType(u8),

    /// Text that should hold a hardware address or client id didn't parse.
    #[error("Invalid address text: {0}")]
    InvalidAddressText(String),

    /// Invalid codec configuration.
    ///
    /// Returned by [`Config::validate`](crate::Config::validate) and when
    /// registering option definitions that would break decoding (sentinel
    /// codes, nested vendor spaces).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Socket creation or configuration error.
    ///
    /// Typically occurs when binding to port 67 without administrator privileges.
    #[error("Socket error: {0}")]
    Socket(String),
}

impl Error {
    /// Returns the partially decoded packet carried by
    /// [`Error::TruncatedOptions`], if any.
    pub fn into_partial_packet(self) -> Option<DhcpPacket> {
        match self {
            Self::TruncatedOptions { partial, .. } => Some(*partial),
            _ => None,
        }
    }
}

/// A specialized Result type for DHCP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Truncation found while decoding one option's nested structure.
///
/// Unlike truncation of the option framing itself, this is never swallowed
/// by the scanner that handed the option out; it stops the whole decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("option {code}: {reason}")]
pub struct SkipRemaining {
    /// Code of the option whose content was being decoded.
    pub code: u8,
    pub reason: String,
}

impl SkipRemaining {
    pub fn new(code: u8, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

/// Outcome of interpreting one option payload that didn't produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    /// The payload is well framed but its content is invalid.
    /// Only this option is dropped.
    #[error("invalid content in option {code}: {reason}")]
    SkipThis { code: u8, reason: String },

    /// Decoding of the option's nested structure ran out of bytes.
    #[error(transparent)]
    SkipRemaining(#[from] SkipRemaining),
}

impl OptionError {
    pub fn skip_this(code: u8, reason: impl Into<String>) -> Self {
        Self::SkipThis {
            code,
            reason: reason.into(),
        }
    }
}
