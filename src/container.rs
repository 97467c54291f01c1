//! Ordered collection of options, one per code.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::options::{DhcpOption, OptionCode};

/// Options keyed by code, iterated and encoded in ascending code order.
///
/// Options are stored behind [`Arc`] so a caller can hold on to one after
/// the packet is gone ([`get_shared`](Self::get_shared)). Mutation through
/// [`get_mut`](Self::get_mut) copies on write, so a shared handle never
/// observes changes made through the container. Values changed that way
/// are checked again when the container is serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionContainer {
    options: BTreeMap<u8, Arc<DhcpOption>>,
}

impl OptionContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option.
    ///
    /// # Errors
    ///
    /// - [`Error::ReservedOptionCode`] for pad (0) and end (255)
    /// - [`Error::DuplicateOption`] if the code is already present
    /// - [`Error::OptionTooLong`] or [`Error::EmptyOption`] if the value
    ///   can't be encoded (see [`DhcpOption::validate`])
    pub fn add<O: Into<Arc<DhcpOption>>>(&mut self, option: O) -> Result<()> {
        let option = option.into();
        let code = option.code();

        if self.options.contains_key(&code) {
            return Err(Error::DuplicateOption(code));
        }
        Self::check(&option)?;

        self.options.insert(code, option);
        Ok(())
    }

    /// Inserts `option`, replacing any option with the same code.
    /// Returns the replaced option.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add), except that duplicates are replaced.
    pub fn replace<O: Into<Arc<DhcpOption>>>(
        &mut self,
        option: O,
    ) -> Result<Option<Arc<DhcpOption>>> {
        let option = option.into();
        Self::check(&option)?;
        Ok(self.options.insert(option.code(), option))
    }

    fn check(option: &DhcpOption) -> Result<()> {
        let code = option.code();
        if code == OptionCode::Pad as u8 || code == OptionCode::End as u8 {
            return Err(Error::ReservedOptionCode(code));
        }
        option.validate()
    }

    pub fn get(&self, code: u8) -> Option<&DhcpOption> {
        self.options.get(&code).map(Arc::as_ref)
    }

    /// Returns a handle that stays valid independently of this container.
    pub fn get_shared(&self, code: u8) -> Option<Arc<DhcpOption>> {
        self.options.get(&code).cloned()
    }

    /// Returns a deep copy of the option.
    pub fn get_copy(&self, code: u8) -> Option<DhcpOption> {
        self.get(code).map(DhcpOption::deep_copy)
    }

    /// Returns the option for in-place modification.
    ///
    /// If the option is shared, it's cloned first.
    pub fn get_mut(&mut self, code: u8) -> Option<&mut DhcpOption> {
        self.options.get_mut(&code).map(Arc::make_mut)
    }

    /// Removes the option. Returns `true` if one was present.
    pub fn remove(&mut self, code: u8) -> bool {
        self.options.remove(&code).is_some()
    }

    pub fn contains(&self, code: u8) -> bool {
        self.options.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterates options in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &DhcpOption> {
        self.options.values().map(Arc::as_ref)
    }

    /// Appends every option as a TLV, without the END option.
    ///
    /// # Errors
    ///
    /// The first option that fails [`DhcpOption::validate`]; `buffer` may
    /// then hold the options before it.
    pub fn write_tlvs(&self, buffer: &mut Vec<u8>) -> Result<()> {
        for option in self.iter() {
            option.write_to(buffer)?;
        }
        Ok(())
    }

    /// Encodes every option followed by the END option.
    ///
    /// # Errors
    ///
    /// Same as [`write_tlvs`](Self::write_tlvs).
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_tlvs(&mut buffer)?;
        buffer.push(OptionCode::End as u8);
        Ok(buffer)
    }

    /// Returns a container whose options share nothing with this one.
    pub fn deep_copy(&self) -> Self {
        Self {
            options: self
                .options
                .iter()
                .map(|(code, option)| (*code, Arc::new(option.deep_copy())))
                .collect(),
        }
    }
}
