//! SEQUENCE support: presence bitmaps and extension groups (X.691 Section 19)
//!
//! A record encodes, in order: its extension bit (if extensible), one
//! presence bit per OPTIONAL/DEFAULT root component, the root components,
//! and finally the extension additions. Additions are grouped per release
//! (`[[ ... ]]`); each group is one open type so a decoder that predates the
//! group can skip it by length.

use std::any::type_name;

use crate::per::{PerError, PerResult, UperDecoder, UperEncoder};

/// Extensible record, with the number of extension groups its schema
/// version declares
pub trait Extensible {
    const EXT_GROUPS: usize;
}

/// Presence bits of the OPTIONAL/DEFAULT components of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceBitmap<const N: usize>(pub [bool; N]);

impl<const N: usize> PresenceBitmap<N> {
    pub fn new(bits: [bool; N]) -> Self {
        Self(bits)
    }

    pub fn encode(&self, encoder: &mut UperEncoder) {
        for bit in self.0 {
            encoder.write_bit(bit);
        }
    }

    pub fn decode(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let mut bits = [false; N];
        for bit in bits.iter_mut() {
            *bit = decoder.read_bit()?;
        }
        Ok(Self(bits))
    }

    pub fn get(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn into_inner(self) -> [bool; N] {
        self.0
    }
}

/// Extension group flags of a record being encoded
///
/// Always emits the full group count of the record's schema version, so
/// trailing absent groups are still flagged with zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionGroupsEncoder {
    record: &'static str,
    present: Vec<bool>,
}

impl ExtensionGroupsEncoder {
    pub fn for_record<T: Extensible>() -> Self {
        Self {
            record: type_name::<T>(),
            present: vec![false; T::EXT_GROUPS],
        }
    }

    pub fn set(&mut self, group: usize, present: bool) -> PerResult<()> {
        let count = self.present.len();
        let flag = self.present.get_mut(group).ok_or_else(|| {
            PerError::EncodeError(format!(
                "{}: extension group {group} not declared ({count} groups)",
                self.record
            ))
        })?;
        *flag = present;
        Ok(())
    }

    /// Value of the record's extension bit
    pub fn any(&self) -> bool {
        self.present.iter().any(|p| *p)
    }

    pub fn is_present(&self, group: usize) -> bool {
        self.present.get(group).copied().unwrap_or(false)
    }

    /// Write the group count and the presence flags
    pub fn encode(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        if self.present.is_empty() {
            return Err(PerError::EncodeError(format!(
                "{}: no extension groups declared",
                self.record
            )));
        }
        encoder.encode_normally_small_non_negative(self.present.len() as u64 - 1)?;
        for flag in &self.present {
            encoder.write_bit(*flag);
        }
        Ok(())
    }

    /// Write one group as an open type if it is flagged present
    pub fn encode_group(
        &self,
        encoder: &mut UperEncoder,
        group: usize,
        encode: impl FnOnce(&mut UperEncoder) -> PerResult<()>,
    ) -> PerResult<()> {
        if !self.is_present(group) {
            return Ok(());
        }
        encoder.encode_open_type(encode)
    }
}

/// Extension group flags read from the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionGroupsDecoder {
    record: &'static str,
    known: usize,
    present: Vec<bool>,
}

impl ExtensionGroupsDecoder {
    /// Read the group count and flags following a set extension bit
    ///
    /// The sender may know more or fewer groups than `T` declares.
    pub fn decode<T: Extensible>(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let count = decoder
            .decode_normally_small_non_negative()?
            .checked_add(1)
            .and_then(|c| usize::try_from(c).ok())
            .ok_or_else(|| PerError::InconsistentExtension("group count overflows".to_string()))?;
        if count > decoder.remaining_bits() {
            return Err(PerError::BufferUnderflow {
                needed: count,
                available: decoder.remaining_bits(),
            });
        }
        let mut present = Vec::with_capacity(count);
        for _ in 0..count {
            present.push(decoder.read_bit()?);
        }
        if !present.iter().any(|p| *p) {
            log::debug!("{}: extension bit set without any group present", type_name::<T>());
        }
        Ok(Self {
            record: type_name::<T>(),
            known: T::EXT_GROUPS,
            present,
        })
    }

    /// Number of groups the sender declared
    pub fn count(&self) -> usize {
        self.present.len()
    }

    pub fn is_present(&self, group: usize) -> bool {
        self.present.get(group).copied().unwrap_or(false)
    }

    /// Decode one known group from its open type if it is flagged present
    pub fn decode_group<V>(
        &self,
        decoder: &mut UperDecoder<'_>,
        group: usize,
        decode: impl FnOnce(&mut UperDecoder<'_>) -> PerResult<V>,
    ) -> PerResult<Option<V>> {
        if !self.is_present(group) {
            return Ok(None);
        }
        decoder.decode_open_type(decode).map(Some)
    }

    /// Skip every present group this schema version does not know
    ///
    /// Must run after the known groups, unknown ones always follow them.
    pub fn skip_unknown(&self, decoder: &mut UperDecoder<'_>) -> PerResult<usize> {
        let mut skipped = 0;
        for (group, _) in self
            .present
            .iter()
            .enumerate()
            .skip(self.known)
            .filter(|(_, present)| **present)
        {
            let len = decoder.skip_open_type()?;
            log::warn!(
                "{}: skipped unknown extension group {} ({} octets)",
                self.record,
                group,
                len
            );
            skipped += 1;
        }
        Ok(skipped)
    }
}
