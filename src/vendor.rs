//! Vendor-identifying vendor-specific information (option 125, RFC 3925).
//!
//! Wire layout of the payload:
//!
//! ```text
//! +---------------------+----------+------------------------+
//! | enterprise-number 4 | data-len | suboption TLVs ...     |
//! +---------------------+----------+------------------------+
//! ```
//!
//! Further `data-len` blocks may follow the first one; their suboptions go
//! into the same container. Suboptions are interpreted in the vendor's own
//! [`OptionSpace::Vendor`] space.

use std::fmt::Write;

use crate::container::OptionContainer;
use crate::error::{Error, Result, SkipRemaining};
use crate::options::MAX_OPTION_PAYLOAD;
use crate::registry::{OptionFactory, OptionSpace};
use crate::scanner::{ScanEnd, scan_options};

const ENTERPRISE_ID_LEN: usize = 4;

/// Largest suboption block that fits in one option after the enterprise
/// number and the data-len byte.
const MAX_DATA_LEN: usize = MAX_OPTION_PAYLOAD - ENTERPRISE_ID_LEN - 1;

/// A vendor option: an enterprise number and the suboptions it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorOption {
    vendor_id: u32,
    suboptions: OptionContainer,
}

impl VendorOption {
    pub fn new(vendor_id: u32) -> Self {
        Self {
            vendor_id,
            suboptions: OptionContainer::new(),
        }
    }

    /// Decodes the payload of option `code`.
    ///
    /// Any truncation inside the payload is reported as [`SkipRemaining`]:
    /// a vendor block whose framing is broken leaves the rest of the
    /// enclosing options area untrustworthy.
    pub fn decode<F: OptionFactory + ?Sized>(
        code: u8,
        data: &[u8],
        factory: &F,
    ) -> std::result::Result<Self, SkipRemaining> {
        if data.len() < ENTERPRISE_ID_LEN {
            return Err(SkipRemaining::new(
                code,
                format!("vendor option needs {} bytes, got {}", ENTERPRISE_ID_LEN, data.len()),
            ));
        }

        let vendor_id = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let space = OptionSpace::Vendor(vendor_id);
        let mut vendor = Self::new(vendor_id);

        let mut index = ENTERPRISE_ID_LEN;
        while index < data.len() {
            let data_len = data[index] as usize;
            index += 1;

            if index + data_len > data.len() {
                return Err(SkipRemaining::new(
                    code,
                    format!(
                        "vendor {} data-len {} exceeds remaining {} bytes",
                        vendor_id,
                        data_len,
                        data.len() - index
                    ),
                ));
            }

            let block = &data[index..index + data_len];
            let end = scan_options(block, space, factory, &mut vendor.suboptions)?;
            if let ScanEnd::Truncated { offset, code: subcode } = end {
                return Err(SkipRemaining::new(
                    code,
                    format!(
                        "vendor {} suboption {} truncated at offset {}",
                        vendor_id, subcode, offset
                    ),
                ));
            }

            index += data_len;
        }

        Ok(vendor)
    }

    /// Returns the enterprise number.
    pub fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub fn suboptions(&self) -> &OptionContainer {
        &self.suboptions
    }

    pub fn suboptions_mut(&mut self) -> &mut OptionContainer {
        &mut self.suboptions
    }

    /// Checks that the suboptions are valid and fit in one data-len block.
    ///
    /// # Errors
    ///
    /// The first suboption error, or [`Error::OptionTooLong`] for option
    /// `code` when the suboptions exceed 250 bytes.
    pub fn validate(&self, code: u8) -> Result<()> {
        let length = self.suboption_bytes()?.len();
        if length > MAX_DATA_LEN {
            return Err(Error::OptionTooLong {
                code,
                length,
                capacity: MAX_DATA_LEN,
            });
        }
        Ok(())
    }

    fn suboption_bytes(&self) -> Result<Vec<u8>> {
        let mut tlvs = Vec::new();
        self.suboptions.write_tlvs(&mut tlvs)?;
        Ok(tlvs)
    }

    /// Encodes the payload: enterprise number, data-len, suboption TLVs.
    ///
    /// Only meaningful for a vendor option that passes
    /// [`validate`](Self::validate); encoding checks that first.
    pub fn payload(&self) -> Vec<u8> {
        let mut tlvs = Vec::new();
        for option in self.suboptions.iter() {
            let data = option.payload();
            tlvs.push(option.code());
            tlvs.push(data.len().min(MAX_OPTION_PAYLOAD) as u8);
            tlvs.extend_from_slice(&data);
        }

        let mut payload = Vec::with_capacity(ENTERPRISE_ID_LEN + 1 + tlvs.len());
        payload.extend_from_slice(&self.vendor_id.to_be_bytes());
        payload.push(tlvs.len().min(MAX_OPTION_PAYLOAD) as u8);
        payload.extend_from_slice(&tlvs);
        payload
    }

    pub fn deep_copy(&self) -> Self {
        Self {
            vendor_id: self.vendor_id,
            suboptions: self.suboptions.deep_copy(),
        }
    }

    /// Renders the enterprise number and data-len, then one line per
    /// suboption at `indent`.
    pub fn to_text(&self, indent: usize) -> String {
        let data_len = self.payload().len() - ENTERPRISE_ID_LEN - 1;
        let mut output = format!("{} (uint32) {} (uint8)", self.vendor_id, data_len);

        if !self.suboptions.is_empty() {
            output.push_str(",\noptions:");
            for option in self.suboptions.iter() {
                let _ = write!(output, "\n{}", option.to_text(indent));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::options::{DhcpOption, OptionValue};
    use crate::registry::{DOCSIS3_V4_TFTP_SERVERS, OptionRegistry, VENDOR_ID_CABLE_LABS};

    fn decode(data: &[u8]) -> std::result::Result<VendorOption, SkipRemaining> {
        VendorOption::decode(125, data, &OptionRegistry::default())
    }

    #[test]
    fn test_decode_docsis3() {
        let data = [0, 0, 0x11, 0x8b, 10, 1, 2, 2, 5, 2, 4, 10, 0, 0, 1];
        let vendor = decode(&data).unwrap();
        assert_eq!(vendor.vendor_id(), VENDOR_ID_CABLE_LABS);
        assert_eq!(vendor.suboptions().len(), 2);
        assert_eq!(
            vendor.suboptions().get(1).unwrap().value(),
            &OptionValue::Binary(vec![2, 5])
        );
        assert_eq!(
            vendor.suboptions().get(DOCSIS3_V4_TFTP_SERVERS).unwrap().value(),
            &OptionValue::Addresses(vec![Ipv4Addr::new(10, 0, 0, 1)])
        );
        assert_eq!(vendor.payload(), data.to_vec());
    }

    #[test]
    fn test_decode_enterprise_only() {
        let vendor = decode(&[0, 0, 0, 9]).unwrap();
        assert_eq!(vendor.vendor_id(), 9);
        assert!(vendor.suboptions().is_empty());
    }

    #[test]
    fn test_short_enterprise_number() {
        let err = decode(&[0, 0, 0x11]).unwrap_err();
        assert_eq!(err.code, 125);
    }

    #[test]
    fn test_data_len_overrun() {
        assert!(decode(&[0, 0, 0, 9, 5, 1, 1, 0]).is_err());
    }

    #[test]
    fn test_truncated_suboption() {
        assert!(decode(&[0, 0, 0, 9, 3, 1, 4, 0]).is_err());
    }

    #[test]
    fn test_invalid_suboption_content_is_skipped() {
        // Suboption 2 in the DOCSIS3 space must be a multiple of 4.
        let vendor = decode(&[0, 0, 0x11, 0x8b, 5, 2, 3, 1, 2, 3]).unwrap();
        assert!(vendor.suboptions().is_empty());
    }

    #[test]
    fn test_to_text() {
        let mut vendor = VendorOption::new(VENDOR_ID_CABLE_LABS);
        assert_eq!(vendor.to_text(2), "4491 (uint32) 0 (uint8)");

        vendor
            .suboptions_mut()
            .add(DhcpOption::binary(1, vec![1, 2]))
            .unwrap();
        assert_eq!(
            vendor.to_text(2),
            "4491 (uint32) 4 (uint8),\noptions:\n  type=001, len=002: 01:02"
        );
    }

    #[test]
    fn test_oversized_suboptions_rejected() {
        let mut vendor = VendorOption::new(9);
        vendor
            .suboptions_mut()
            .add(DhcpOption::binary(1, vec![0xaa; 200]))
            .unwrap();
        vendor
            .suboptions_mut()
            .add(DhcpOption::binary(2, vec![0xbb; 100]))
            .unwrap();

        assert!(matches!(
            vendor.validate(125),
            Err(Error::OptionTooLong { code: 125, length: 304, capacity: 250 })
        ));
        assert!(DhcpOption::vendor(vendor).encode().is_err());
    }

    #[test]
    fn test_largest_block_round_trips() {
        let mut vendor = VendorOption::new(9);
        vendor
            .suboptions_mut()
            .add(DhcpOption::binary(1, vec![0xaa; 248]))
            .unwrap();
        assert!(vendor.validate(125).is_ok());

        let payload = vendor.payload();
        assert_eq!(payload.len(), 255);
        assert_eq!(payload[4], 250);
        assert_eq!(decode(&payload).unwrap(), vendor);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let mut vendor = VendorOption::new(1);
        vendor.suboptions_mut().add(DhcpOption::binary(3, vec![7])).unwrap();
        let mut copy = vendor.deep_copy();
        copy.suboptions_mut().remove(3);
        assert!(vendor.suboptions().contains(3));
        assert!(!copy.suboptions().contains(3));
    }
}
