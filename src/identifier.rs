//! Client identification: hardware addresses and client identifiers.

use crate::error::{Error, Result};
use crate::header::MAX_CHADDR_LEN;

/// Hardware type for Ethernet (most common).
pub const HTYPE_ETHERNET: u8 = 1;

/// Hardware address length for Ethernet (6 bytes).
pub const HLEN_ETHERNET: u8 = 6;

/// Smallest client identifier accepted (type byte plus one byte of data).
pub const MIN_CLIENT_ID_LEN: usize = 2;

/// Largest client identifier an option can carry.
pub const MAX_CLIENT_ID_LEN: usize = 255;

/// Formats bytes as a colon-separated lowercase hex string.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(":")
}

fn parse_hex(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(':')
        .map(|part| {
            if part.is_empty() || part.len() > 2 {
                return Err(Error::InvalidAddressText(text.to_string()));
            }
            u8::from_str_radix(part, 16).map_err(|_| Error::InvalidAddressText(text.to_string()))
        })
        .collect()
}

/// A link-layer address together with its hardware type.
///
/// Used for the chaddr header field and for the link-layer source and
/// destination recorded when a message is received.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HwAddr {
    htype: u8,
    bytes: Vec<u8>,
}

impl HwAddr {
    /// Creates a hardware address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HardwareAddressTooLong`] if `bytes` doesn't fit in
    /// the 16-byte chaddr field.
    pub fn new(htype: u8, bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.len() > MAX_CHADDR_LEN {
            return Err(Error::HardwareAddressTooLong(bytes.len()));
        }
        Ok(Self { htype, bytes })
    }

    /// Builds the address held in a chaddr field; `bytes` is at most 16 long.
    pub(crate) fn from_chaddr(htype: u8, bytes: &[u8]) -> Self {
        Self {
            htype,
            bytes: bytes[..bytes.len().min(MAX_CHADDR_LEN)].to_vec(),
        }
    }

    /// Parses `aa:bb:cc:dd:ee:ff` notation.
    pub fn from_text(text: &str, htype: u8) -> Result<Self> {
        Self::new(htype, parse_hex(text)?)
    }

    pub fn htype(&self) -> u8 {
        self.htype
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the hardware length as carried in the hlen field.
    pub fn hlen(&self) -> u8 {
        self.bytes.len() as u8
    }

    /// Renders the address, optionally prefixed with `hwtype=N `.
    pub fn to_text(&self, include_htype: bool) -> String {
        if include_htype {
            format!("hwtype={} {}", self.htype, format_hex(&self.bytes))
        } else {
            format_hex(&self.bytes)
        }
    }
}

impl std::fmt::Display for HwAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(true))
    }
}

/// Client identifier carried in option 61.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Vec<u8>);

impl ClientId {
    /// # Errors
    ///
    /// Returns [`Error::InvalidClientId`] for identifiers shorter than
    /// [`MIN_CLIENT_ID_LEN`] or longer than [`MAX_CLIENT_ID_LEN`].
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if !(MIN_CLIENT_ID_LEN..=MAX_CLIENT_ID_LEN).contains(&bytes.len()) {
            return Err(Error::InvalidClientId(bytes.len()));
        }
        Ok(Self(bytes))
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(parse_hex(text)?)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_text(&self) -> String {
        format_hex(&self.0)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hwaddr_text() {
        let hwaddr = HwAddr::new(123, vec![2, 4, 6, 8, 10, 12]).unwrap();
        assert_eq!(hwaddr.to_text(true), "hwtype=123 02:04:06:08:0a:0c");
        assert_eq!(hwaddr.to_text(false), "02:04:06:08:0a:0c");
        assert_eq!(hwaddr.hlen(), 6);

        let empty = HwAddr::new(HTYPE_ETHERNET, Vec::new()).unwrap();
        assert_eq!(empty.to_string(), "hwtype=1 ");
    }

    #[test]
    fn test_hwaddr_length_limit() {
        assert!(HwAddr::new(1, vec![0u8; 16]).is_ok());
        assert!(matches!(
            HwAddr::new(1, vec![0u8; 17]),
            Err(Error::HardwareAddressTooLong(17))
        ));
    }

    #[test]
    fn test_hwaddr_from_text() {
        let hwaddr = HwAddr::from_text("01:02:03:04:05:06", 123).unwrap();
        assert_eq!(hwaddr.bytes(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(hwaddr.htype(), 123);

        assert!(HwAddr::from_text("01:zz", 1).is_err());
        assert!(HwAddr::from_text("01::02", 1).is_err());
        assert!(HwAddr::from_text("", 1).unwrap().bytes().is_empty());
    }

    #[test]
    fn test_client_id_limits() {
        assert!(ClientId::new(Vec::new()).is_err());
        assert!(ClientId::new(vec![1]).is_err());
        assert!(ClientId::new(vec![1, 2]).is_ok());
        assert!(ClientId::new(vec![0u8; 255]).is_ok());
        assert!(ClientId::new(vec![0u8; 256]).is_err());

        let cid = ClientId::from_text("01:02:03:04").unwrap();
        assert_eq!(cid.to_string(), "01:02:03:04");
    }
}
