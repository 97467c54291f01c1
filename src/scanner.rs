//! TLV walk over an options area.
//!
//! Used for the main options section, the overloaded `sname` and `file`
//! fields, and the suboption blocks inside vendor options.

use tracing::debug;

use crate::container::OptionContainer;
use crate::error::{OptionError, SkipRemaining};
use crate::registry::{OptionFactory, OptionSpace};

/// Pad option; a single byte with no length.
pub const PAD: u8 = 0;

/// End option; terminates the options area.
pub const END: u8 = 255;

/// How a scan that didn't fail stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// The END option or the end of the buffer was reached cleanly.
    /// `offset` is where scanning stopped: just past the END byte, or
    /// `data.len()`.
    Complete { offset: usize },
    /// A TLV header or payload ran past the end of the buffer.
    /// `offset` is the start of the truncated option.
    Truncated { offset: usize, code: u8 },
}

impl ScanEnd {
    pub fn offset(&self) -> usize {
        match self {
            Self::Complete { offset } | Self::Truncated { offset, .. } => *offset,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

/// Walks `data` as a sequence of TLVs in `space`, adding each option the
/// factory accepts to `options`.
///
/// Truncated framing stops the walk but keeps everything decoded so far;
/// the caller sees it as [`ScanEnd::Truncated`]. Options rejected with
/// [`OptionError::SkipThis`] are dropped individually. If a code appears
/// twice the first occurrence is kept.
///
/// # Errors
///
/// Returns [`SkipRemaining`] when the factory reports truncation inside an
/// option's nested structure. Options decoded before it stay in `options`.
pub fn scan_options<F: OptionFactory + ?Sized>(
    data: &[u8],
    space: OptionSpace,
    factory: &F,
    options: &mut OptionContainer,
) -> Result<ScanEnd, SkipRemaining> {
    let mut index = 0;

    while index < data.len() {
        let code = data[index];

        if code == PAD {
            index += 1;
            continue;
        }

        if code == END {
            return Ok(ScanEnd::Complete { offset: index + 1 });
        }

        if index + 1 >= data.len() {
            debug!("{}: option {} length missing at offset {}", space, code, index);
            return Ok(ScanEnd::Truncated {
                offset: index,
                code,
            });
        }

        let length = data[index + 1] as usize;

        if index + 2 + length > data.len() {
            debug!(
                "{}: option {} data truncated ({} bytes declared, {} available)",
                space,
                code,
                length,
                data.len() - index - 2
            );
            return Ok(ScanEnd::Truncated {
                offset: index,
                code,
            });
        }

        let option_data = &data[index + 2..index + 2 + length];
        match factory.interpret(space, code, option_data) {
            Ok(option) => {
                if let Err(e) = options.add(option) {
                    debug!("{}: ignoring option {}: {}", space, code, e);
                }
            }
            Err(OptionError::SkipThis { reason, .. }) => {
                debug!("{}: skipping option {}: {}", space, code, reason);
            }
            Err(OptionError::SkipRemaining(e)) => return Err(e),
        }

        index += 2 + length;
    }

    Ok(ScanEnd::Complete { offset: index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValue;
    use crate::registry::OptionRegistry;

    fn scan(data: &[u8]) -> (Result<ScanEnd, SkipRemaining>, OptionContainer) {
        let mut options = OptionContainer::new();
        let result = scan_options(data, OptionSpace::Dhcp4, &OptionRegistry::default(), &mut options);
        (result, options)
    }

    #[test]
    fn test_pad_and_end() {
        let (result, options) = scan(&[0, 0, 53, 1, 1, 0, 255, 12, 3, b'a', b'b', b'c']);
        assert_eq!(result, Ok(ScanEnd::Complete { offset: 7 }));
        assert_eq!(options.len(), 1);
        assert!(!options.contains(12));
    }

    #[test]
    fn test_end_as_last_byte() {
        let (result, _) = scan(&[53, 1, 1, 255]);
        assert_eq!(result.unwrap().offset(), 4);
    }

    #[test]
    fn test_missing_end_is_complete() {
        let (result, options) = scan(&[53, 1, 1]);
        assert_eq!(result, Ok(ScanEnd::Complete { offset: 3 }));
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn test_truncated_length_keeps_earlier_options() {
        let (result, options) = scan(&[53, 1, 1, 12]);
        assert_eq!(result, Ok(ScanEnd::Truncated { offset: 3, code: 12 }));
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn test_truncated_payload_keeps_earlier_options() {
        let (result, options) = scan(&[53, 1, 1, 12, 10, b'a', b'b']);
        let end = result.unwrap();
        assert!(end.is_truncated());
        assert_eq!(end.offset(), 3);
        assert!(options.contains(53));
        assert!(!options.contains(12));
    }

    #[test]
    fn test_invalid_content_skips_only_that_option() {
        let (result, options) = scan(&[12, 2, 0, 0, 51, 2, 0, 0, 53, 1, 3]);
        assert!(result.is_ok());
        assert_eq!(options.len(), 1);
        assert_eq!(options.get(53).unwrap().value(), &OptionValue::Uint8(3));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let (result, options) = scan(&[12, 3, b'o', b'n', b'e', 12, 3, b't', b'w', b'o']);
        assert!(result.is_ok());
        assert_eq!(options.get(12).unwrap().value().as_text(), Some(&b"one"[..]));
    }

    #[test]
    fn test_nested_truncation_escalates() {
        let (result, options) = scan(&[53, 1, 1, 125, 2, 0, 0, 12, 1, b'x']);
        let err = result.unwrap_err();
        assert_eq!(err.code, 125);
        assert!(options.contains(53));
        assert!(!options.contains(12));
    }
}
