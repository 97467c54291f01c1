//! The fixed 236-byte BOOTP/DHCP header (RFC 2131 §2).
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |     op (1)    |   htype (1)   |   hlen (1)    |   hops (1)    |
//! +---------------+---------------+---------------+---------------+
//! |                            xid (4)                            |
//! +-------------------------------+-------------------------------+
//! |           secs (2)            |           flags (2)           |
//! +-------------------------------+-------------------------------+
//! |                          ciaddr (4)                           |
//! +---------------------------------------------------------------+
//! |                          yiaddr (4)                           |
//! +---------------------------------------------------------------+
//! |                          siaddr (4)                           |
//! +---------------------------------------------------------------+
//! |                          giaddr (4)                           |
//! +---------------------------------------------------------------+
//! |                          chaddr (16)                          |
//! +---------------------------------------------------------------+
//! |                          sname (64)                           |
//! +---------------------------------------------------------------+
//! |                          file (128)                           |
//! +---------------------------------------------------------------+
//! ```
//!
//! Multi-byte fields are big-endian.

use std::net::Ipv4Addr;

use crate::error::{Error, Result};
use crate::identifier::HTYPE_ETHERNET;

/// BOOTP/DHCP operation code for client requests.
pub const BOOTREQUEST: u8 = 1;

/// BOOTP/DHCP operation code for server replies.
pub const BOOTREPLY: u8 = 2;

/// Broadcast bit of the flags field.
pub const FLAG_BROADCAST: u16 = 0x8000;

pub const MAX_CHADDR_LEN: usize = 16;
pub const MAX_SNAME_LEN: usize = 64;
pub const MAX_FILE_LEN: usize = 128;

const OP_OFFSET: usize = 0;
const HTYPE_OFFSET: usize = 1;
const HLEN_OFFSET: usize = 2;
const HOPS_OFFSET: usize = 3;
const XID_OFFSET: usize = 4;
const SECS_OFFSET: usize = 8;
const FLAGS_OFFSET: usize = 10;
const CIADDR_OFFSET: usize = 12;
const YIADDR_OFFSET: usize = 16;
const SIADDR_OFFSET: usize = 20;
const GIADDR_OFFSET: usize = 24;
const CHADDR_OFFSET: usize = 28;
const SNAME_OFFSET: usize = CHADDR_OFFSET + MAX_CHADDR_LEN;
const FILE_OFFSET: usize = SNAME_OFFSET + MAX_SNAME_LEN;

/// Size of the fixed header, magic cookie excluded.
pub const HEADER_LEN: usize = FILE_OFFSET + MAX_FILE_LEN;

/// The fixed fields of a DHCPv4 message.
///
/// `chaddr`, `sname` and `file` always hold their full capacity; only the
/// first `hlen` bytes of `chaddr` are meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHeader {
    /// Operation code: [`BOOTREQUEST`] (1) or [`BOOTREPLY`] (2).
    pub op: u8,

    /// Hardware address type. [`HTYPE_ETHERNET`] (1) for Ethernet.
    pub htype: u8,

    /// Hardware address length, at most [`MAX_CHADDR_LEN`].
    pub hlen: u8,

    /// Hop count, incremented by relay agents.
    pub hops: u8,

    /// Transaction ID chosen by client, echoed in replies.
    pub xid: u32,

    /// Seconds elapsed since client began address acquisition.
    pub secs: u16,

    /// Flags. Bit 15 (0x8000) = broadcast flag.
    pub flags: u16,

    /// Client IP address (set by client in RENEWING/REBINDING states).
    pub ciaddr: Ipv4Addr,

    /// "Your" IP address - the address being assigned to the client.
    pub yiaddr: Ipv4Addr,

    /// Server IP address (next server in BOOTP, or DHCP server).
    pub siaddr: Ipv4Addr,

    /// Gateway IP address - set by relay agents.
    pub giaddr: Ipv4Addr,

    pub chaddr: [u8; MAX_CHADDR_LEN],

    /// Server host name (or option overflow area if Option 52 is set).
    pub sname: [u8; MAX_SNAME_LEN],

    /// Boot file name (or option overflow area if Option 52 is set).
    pub file: [u8; MAX_FILE_LEN],
}

impl Default for FixedHeader {
    fn default() -> Self {
        Self {
            op: BOOTREQUEST,
            htype: HTYPE_ETHERNET,
            hlen: 0,
            hops: 0,
            xid: 0,
            secs: 0,
            flags: 0,
            ciaddr: Ipv4Addr::UNSPECIFIED,
            yiaddr: Ipv4Addr::UNSPECIFIED,
            siaddr: Ipv4Addr::UNSPECIFIED,
            giaddr: Ipv4Addr::UNSPECIFIED,
            chaddr: [0u8; MAX_CHADDR_LEN],
            sname: [0u8; MAX_SNAME_LEN],
            file: [0u8; MAX_FILE_LEN],
        }
    }
}

fn read_ipv4(data: &[u8], offset: usize) -> Ipv4Addr {
    Ipv4Addr::new(
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    )
}

impl FixedHeader {
    /// Decodes the fixed header from the start of `data`.
    ///
    /// Bytes past [`HEADER_LEN`] are ignored. An hlen above 16 is clamped
    /// to 16 so the hardware address never reads past chaddr.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedHeader`] if `data` is shorter than
    /// [`HEADER_LEN`].
    pub fn unpack(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(Error::TruncatedHeader {
                length: data.len(),
                minimum: HEADER_LEN,
            });
        }

        let mut chaddr = [0u8; MAX_CHADDR_LEN];
        chaddr.copy_from_slice(&data[CHADDR_OFFSET..SNAME_OFFSET]);

        let mut sname = [0u8; MAX_SNAME_LEN];
        sname.copy_from_slice(&data[SNAME_OFFSET..FILE_OFFSET]);

        let mut file = [0u8; MAX_FILE_LEN];
        file.copy_from_slice(&data[FILE_OFFSET..HEADER_LEN]);

        Ok(Self {
            op: data[OP_OFFSET],
            htype: data[HTYPE_OFFSET],
            hlen: data[HLEN_OFFSET].min(MAX_CHADDR_LEN as u8),
            hops: data[HOPS_OFFSET],
            xid: u32::from_be_bytes([
                data[XID_OFFSET],
                data[XID_OFFSET + 1],
                data[XID_OFFSET + 2],
                data[XID_OFFSET + 3],
            ]),
            secs: u16::from_be_bytes([data[SECS_OFFSET], data[SECS_OFFSET + 1]]),
            flags: u16::from_be_bytes([data[FLAGS_OFFSET], data[FLAGS_OFFSET + 1]]),
            ciaddr: read_ipv4(data, CIADDR_OFFSET),
            yiaddr: read_ipv4(data, YIADDR_OFFSET),
            siaddr: read_ipv4(data, SIADDR_OFFSET),
            giaddr: read_ipv4(data, GIADDR_OFFSET),
            chaddr,
            sname,
            file,
        })
    }

    /// Appends exactly [`HEADER_LEN`] bytes to `buffer`.
    pub fn pack(&self, buffer: &mut Vec<u8>) {
        buffer.reserve(HEADER_LEN);

        buffer.push(self.op);
        buffer.push(self.htype);
        buffer.push(self.hlen.min(MAX_CHADDR_LEN as u8));
        buffer.push(self.hops);

        buffer.extend_from_slice(&self.xid.to_be_bytes());
        buffer.extend_from_slice(&self.secs.to_be_bytes());
        buffer.extend_from_slice(&self.flags.to_be_bytes());

        buffer.extend_from_slice(&self.ciaddr.octets());
        buffer.extend_from_slice(&self.yiaddr.octets());
        buffer.extend_from_slice(&self.siaddr.octets());
        buffer.extend_from_slice(&self.giaddr.octets());

        buffer.extend_from_slice(&self.chaddr);
        buffer.extend_from_slice(&self.sname);
        buffer.extend_from_slice(&self.file);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(HEADER_LEN);
        self.pack(&mut buffer);
        buffer
    }

    /// Returns the meaningful part of chaddr (respecting hlen).
    pub fn chaddr_bytes(&self) -> &[u8] {
        &self.chaddr[..(self.hlen as usize).min(MAX_CHADDR_LEN)]
    }
}

/// Copies `content` into a fixed-size field, zero-filling the tail.
pub(crate) fn fill_field<const N: usize>(
    field: &mut [u8; N],
    content: &[u8],
    name: &'static str,
) -> Result<()> {
    if content.len() > N {
        return Err(Error::FieldTooLong {
            field: name,
            length: content.len(),
            capacity: N,
        });
    }
    field.fill(0);
    field[..content.len()].copy_from_slice(content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> FixedHeader {
        let mut header = FixedHeader {
            op: BOOTREQUEST,
            htype: 6,
            hlen: 6,
            hops: 13,
            xid: 0x12345678,
            secs: 42,
            flags: FLAG_BROADCAST,
            ciaddr: Ipv4Addr::new(192, 0, 2, 1),
            yiaddr: Ipv4Addr::new(1, 2, 3, 4),
            siaddr: Ipv4Addr::new(192, 0, 2, 255),
            giaddr: Ipv4Addr::new(255, 255, 255, 255),
            ..Default::default()
        };
        header.chaddr[..6].copy_from_slice(&[0, 1, 2, 3, 4, 5]);
        header
    }

    #[test]
    fn test_header_len() {
        assert_eq!(HEADER_LEN, 236);
    }

    #[test]
    fn test_pack_layout() {
        let bytes = sample_header().to_bytes();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(
            &bytes[..28],
            &[
                1, 6, 6, 13, 0x12, 0x34, 0x56, 0x78, 0, 42, 0x80, 0x00, 192, 0, 2, 1, 1, 2, 3,
                4, 192, 0, 2, 255, 255, 255, 255, 255,
            ]
        );
        assert_eq!(&bytes[28..44], &[0, 1, 2, 3, 4, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(bytes[44..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_unpack_pack_identity() {
        let mut bytes = sample_header().to_bytes();
        bytes[44..52].copy_from_slice(b"testname");
        bytes[108..116].copy_from_slice(b"bootfile");

        let header = FixedHeader::unpack(&bytes).unwrap();
        assert_eq!(header.xid, 0x12345678);
        assert_eq!(header.secs, 42);
        assert_eq!(header.giaddr, Ipv4Addr::BROADCAST);
        assert_eq!(header.chaddr_bytes(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(&header.sname[..8], b"testname");
        assert_eq!(&header.file[..8], b"bootfile");
        assert_eq!(header.to_bytes(), bytes);
    }

    #[test]
    fn test_unpack_rejects_short_buffer() {
        let bytes = vec![0u8; HEADER_LEN - 1];
        assert!(matches!(
            FixedHeader::unpack(&bytes),
            Err(Error::TruncatedHeader { length: 235, minimum: 236 })
        ));
        assert!(FixedHeader::unpack(&[0u8; HEADER_LEN]).is_ok());
    }

    #[test]
    fn test_unpack_clamps_hlen() {
        let mut bytes = sample_header().to_bytes();
        bytes[2] = 200;
        let header = FixedHeader::unpack(&bytes).unwrap();
        assert_eq!(header.hlen, 16);
        assert_eq!(header.chaddr_bytes().len(), 16);
    }

    #[test]
    fn test_fill_field() {
        let mut sname = [0xffu8; MAX_SNAME_LEN];
        fill_field(&mut sname, b"abc", "sname").unwrap();
        assert_eq!(&sname[..3], b"abc");
        assert!(sname[3..].iter().all(|byte| *byte == 0));

        let too_long = [1u8; MAX_SNAME_LEN + 1];
        assert!(matches!(
            fill_field(&mut sname, &too_long, "sname"),
            Err(Error::FieldTooLong { capacity: 64, .. })
        ));
    }
}
