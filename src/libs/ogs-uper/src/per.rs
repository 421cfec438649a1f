//! PER (Packed Encoding Rules) encoding/decoding
//!
//! Implementation of Unaligned PER (UPER) as used by the LTE and NR RRC
//! protocols, based on ITU-T X.691. Nothing is octet aligned unless a caller
//! asks for it (end of a top-level PDU) or the value is carried inside an
//! open type, which is an octet string by definition.

use bitvec::prelude::*;
use bytes::Bytes;
use thiserror::Error;

use crate::config::CodecConfig;

/// Fragment unit of the general length determinant (X.691 11.9.3.8)
pub const FRAGMENT_UNIT: usize = 16384;

/// Largest fragment multiplier (4 x 16K)
const MAX_FRAGMENT_MULTIPLIER: usize = 4;

/// Largest value carried in the short form of a normally small number
const NORMALLY_SMALL_MAX: u64 = 63;

/// Which side of the codec an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EncodeFailure,
    DecodeFailure,
}

/// PER codec errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PerError {
    #[error("Buffer underflow: need {needed} bits, have {available}")]
    BufferUnderflow { needed: usize, available: usize },
    #[error("Decoded value {value} not in range {min}..={max}")]
    ValueOutOfRange { value: i64, min: i64, max: i64 },
    #[error("Invalid choice index: {index} (max {max})")]
    InvalidChoiceIndex { index: usize, max: usize },
    #[error("Invalid enumerated index: {index} (max {max})")]
    InvalidEnumIndex { index: usize, max: usize },
    #[error("Decoded count {count} not in range {min}..={max}")]
    CountOutOfRange { count: usize, min: usize, max: usize },
    #[error("Inconsistent extension: {0}")]
    InconsistentExtension(String),
    #[error("Non-zero padding bits")]
    NonZeroPadding,
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Invalid constraint: value {value} not in range {min}..={max}")]
    ConstraintViolation { value: i64, min: i64, max: i64 },
    #[error("Size {size} not in range {min}..={max}")]
    SizeViolation { size: usize, min: usize, max: usize },
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),
    #[error("PDU too large: {size} octets (max {max})")]
    PduTooLarge { size: usize, max: usize },
    #[error("Encode error: {0}")]
    EncodeError(String),
}

impl PerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PerError::ConstraintViolation { .. }
            | PerError::SizeViolation { .. }
            | PerError::UnsupportedValue(_)
            | PerError::PduTooLarge { .. }
            | PerError::EncodeError(_) => ErrorKind::EncodeFailure,
            _ => ErrorKind::DecodeFailure,
        }
    }

    pub fn is_decode_failure(&self) -> bool {
        self.kind() == ErrorKind::DecodeFailure
    }

    pub fn is_encode_failure(&self) -> bool {
        self.kind() == ErrorKind::EncodeFailure
    }
}

pub type PerResult<T> = Result<T, PerError>;

/// Constraint definition for constrained integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub min: i64,
    pub max: i64,
    pub extensible: bool,
}

impl Constraint {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max, extensible: false }
    }

    pub const fn extensible(min: i64, max: i64) -> Self {
        Self { min, max, extensible: true }
    }

    /// Number of values in the range
    pub fn range(&self) -> u128 {
        if self.max >= self.min {
            (self.max as i128 - self.min as i128) as u128 + 1
        } else {
            0
        }
    }

    /// Bits needed to encode values in this range: ceil(log2(range))
    pub fn bits_needed(&self) -> usize {
        let range = self.range();
        if range <= 1 {
            0
        } else {
            128 - (range - 1).leading_zeros() as usize
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Minimal big-endian octets of an unsigned number, at least one octet
fn minimal_unsigned_octets(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take(7).take_while(|b| **b == 0).count();
    bytes[skip..].to_vec()
}

/// Minimal big-endian two's complement octets, at least one octet
fn minimal_signed_octets(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut skip = 0;
    while skip < 7 {
        let redundant = (bytes[skip] == 0x00 && bytes[skip + 1] & 0x80 == 0)
            || (bytes[skip] == 0xFF && bytes[skip + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        skip += 1;
    }
    bytes[skip..].to_vec()
}

/// UPER (Unaligned PER) Encoder
///
/// Write cursor over a growable MSB-first bit buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UperEncoder {
    buffer: BitVec<u8, Msb0>,
}

impl UperEncoder {
    pub fn new() -> Self {
        Self {
            buffer: BitVec::new(),
        }
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            buffer: BitVec::with_capacity(bits),
        }
    }

    /// Get the encoded bytes, the last octet zero padded
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.buffer.into_vec())
    }

    /// View of the bits written so far
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.buffer
    }

    /// Get current bit position
    pub fn bit_position(&self) -> usize {
        self.buffer.len()
    }

    /// Number of octets the written bits occupy
    pub fn byte_len(&self) -> usize {
        self.buffer.len().div_ceil(8)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Align to octet boundary with zero bits, returns the padding width
    pub fn align(&mut self) -> usize {
        let remainder = self.buffer.len() % 8;
        if remainder == 0 {
            return 0;
        }
        let padding = 8 - remainder;
        self.buffer.resize(self.buffer.len() + padding, false);
        padding
    }

    /// Write a single bit
    pub fn write_bit(&mut self, bit: bool) {
        self.buffer.push(bit);
    }

    /// Write the low `num_bits` of a value (MSB first)
    pub fn write_bits(&mut self, value: u64, num_bits: usize) {
        debug_assert!(num_bits <= 64, "write_bits called with {num_bits} bits");
        for i in (0..num_bits.min(64)).rev() {
            self.buffer.push((value >> i) & 1 == 1);
        }
    }

    /// Write raw bytes at the current bit offset
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_bitslice(bytes.view_bits::<Msb0>());
    }

    /// Append a bit sequence verbatim
    pub fn write_bitslice(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.buffer.extend_from_bitslice(bits);
    }

    /// Encode constrained whole number (X.691 Section 10.5)
    pub fn encode_constrained_whole_number(
        &mut self,
        value: i64,
        constraint: &Constraint,
    ) -> PerResult<()> {
        if !constraint.contains(value) {
            return Err(PerError::ConstraintViolation {
                value,
                min: constraint.min,
                max: constraint.max,
            });
        }

        let bits = constraint.bits_needed();
        if bits == 0 {
            // Single value range, nothing on the wire
            return Ok(());
        }
        let offset = (value as i128 - constraint.min as i128) as u64;
        self.write_bits(offset, bits);
        Ok(())
    }

    /// Encode INTEGER, honouring an extensible constraint (X.691 Section 12)
    pub fn encode_integer(&mut self, value: i64, constraint: &Constraint) -> PerResult<()> {
        if constraint.extensible {
            let in_root = constraint.contains(value);
            self.write_bit(!in_root);
            if !in_root {
                return self.encode_unconstrained_whole_number(value);
            }
        }
        self.encode_constrained_whole_number(value, constraint)
    }

    /// Encode semi-constrained whole number, INTEGER (lb..MAX) (X.691 Section 10.7)
    pub fn encode_semi_constrained_whole_number(&mut self, value: i64, lb: i64) -> PerResult<()> {
        if value < lb {
            return Err(PerError::ConstraintViolation {
                value,
                min: lb,
                max: i64::MAX,
            });
        }
        let octets = minimal_unsigned_octets((value as i128 - lb as i128) as u64);
        self.encode_length_determinant(octets.len())?;
        self.write_bytes(&octets);
        Ok(())
    }

    /// Encode unconstrained whole number (X.691 Section 10.8)
    pub fn encode_unconstrained_whole_number(&mut self, value: i64) -> PerResult<()> {
        let octets = minimal_signed_octets(value);
        self.encode_length_determinant(octets.len())?;
        self.write_bytes(&octets);
        Ok(())
    }

    /// Encode normally small non-negative whole number (X.691 Section 10.6)
    pub fn encode_normally_small_non_negative(&mut self, value: u64) -> PerResult<()> {
        if value <= NORMALLY_SMALL_MAX {
            self.write_bit(false);
            self.write_bits(value, 6);
        } else {
            self.write_bit(true);
            let octets = minimal_unsigned_octets(value);
            self.encode_length_determinant(octets.len())?;
            self.write_bytes(&octets);
        }
        Ok(())
    }

    /// Encode unconstrained length determinant (X.691 Section 10.9.3.6-7)
    ///
    /// Only the single-fragment forms; larger payloads go through
    /// [`UperEncoder::encode_fragmented`].
    pub fn encode_length_determinant(&mut self, length: usize) -> PerResult<()> {
        if length < 128 {
            // 0xxxxxxx
            self.write_bit(false);
            self.write_bits(length as u64, 7);
        } else if length < FRAGMENT_UNIT {
            // 10xxxxxx xxxxxxxx
            self.write_bits(0b10, 2);
            self.write_bits(length as u64, 14);
        } else {
            return Err(PerError::SizeViolation {
                size: length,
                min: 0,
                max: FRAGMENT_UNIT - 1,
            });
        }
        Ok(())
    }

    /// Encode a length-prefixed run of `count` units, fragmenting in 16K
    /// multiples when needed (X.691 Section 10.9.3.8)
    ///
    /// `emit` writes the units of each fragment.
    pub fn encode_fragmented(
        &mut self,
        count: usize,
        mut emit: impl FnMut(&mut Self, std::ops::Range<usize>),
    ) -> PerResult<()> {
        let mut start = 0;
        loop {
            let remaining = count - start;
            if remaining < FRAGMENT_UNIT {
                self.encode_length_determinant(remaining)?;
                emit(self, start..count);
                return Ok(());
            }
            let multiplier = (remaining / FRAGMENT_UNIT).min(MAX_FRAGMENT_MULTIPLIER);
            self.write_bits(0b11, 2);
            self.write_bits(multiplier as u64, 6);
            let end = start + multiplier * FRAGMENT_UNIT;
            emit(self, start..end);
            start = end;
        }
    }

    /// Encode constrained length determinant
    ///
    /// Upper bounds of 64K and above use the unconstrained form.
    pub fn encode_constrained_length(
        &mut self,
        length: usize,
        min: usize,
        max: usize,
    ) -> PerResult<()> {
        if length < min || length > max {
            return Err(PerError::SizeViolation { size: length, min, max });
        }
        if max < 65536 {
            let constraint = Constraint::new(min as i64, max as i64);
            self.encode_constrained_whole_number(length as i64, &constraint)
        } else {
            self.encode_length_determinant(length)
        }
    }

    /// Encode an ENUMERATED index (X.691 Section 14)
    pub fn encode_enumerated_index(
        &mut self,
        index: usize,
        root_count: usize,
        extensible: bool,
    ) -> PerResult<()> {
        self.encode_extensible_index(index, root_count, extensible)
    }

    /// Encode CHOICE index (X.691 Section 23)
    pub fn encode_choice_index(
        &mut self,
        index: usize,
        num_alternatives: usize,
        extensible: bool,
    ) -> PerResult<()> {
        self.encode_extensible_index(index, num_alternatives, extensible)
    }

    fn encode_extensible_index(
        &mut self,
        index: usize,
        root_count: usize,
        extensible: bool,
    ) -> PerResult<()> {
        let in_root = index < root_count;
        if !in_root && !extensible {
            return Err(PerError::ConstraintViolation {
                value: index as i64,
                min: 0,
                max: root_count as i64 - 1,
            });
        }
        if extensible {
            self.write_bit(!in_root);
        }
        if in_root {
            let constraint = Constraint::new(0, root_count as i64 - 1);
            self.encode_constrained_whole_number(index as i64, &constraint)
        } else {
            self.encode_normally_small_non_negative((index - root_count) as u64)
        }
    }

    /// Encode an open type (X.691 Section 11.2)
    ///
    /// The value is encoded into a scratch encoder first because its octet
    /// length has to precede it on the wire. This costs one allocation and
    /// one copy per open type; extension groups and extension CHOICE
    /// alternatives are the only users.
    pub fn encode_open_type(
        &mut self,
        encode: impl FnOnce(&mut UperEncoder) -> PerResult<()>,
    ) -> PerResult<()> {
        let mut scratch = UperEncoder::new();
        encode(&mut scratch)?;
        scratch.align();
        if scratch.is_empty() {
            // An empty encoding is carried as a single zero octet
            scratch.write_bits(0, 8);
        }
        let octets = scratch.into_bytes();
        self.encode_octets_fragmented(&octets)
    }

    /// Write octets behind a general length determinant
    pub fn encode_octets_fragmented(&mut self, octets: &[u8]) -> PerResult<()> {
        self.encode_fragmented(octets.len(), |enc, range| enc.write_bytes(&octets[range]))
    }
}

/// UPER (Unaligned PER) Decoder
///
/// Read cursor over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct UperDecoder<'a> {
    data: &'a BitSlice<u8, Msb0>,
    position: usize,
    config: CodecConfig,
}

impl<'a> UperDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, CodecConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: CodecConfig) -> Self {
        Self {
            data: BitSlice::from_slice(data),
            position: 0,
            config,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get current bit position
    pub fn bit_position(&self) -> usize {
        self.position
    }

    /// Get remaining bits
    pub fn remaining_bits(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    fn ensure(&self, needed: usize) -> PerResult<()> {
        let available = self.remaining_bits();
        if needed > available {
            return Err(PerError::BufferUnderflow { needed, available });
        }
        Ok(())
    }

    /// Skip to the next octet boundary
    ///
    /// With `strict_padding` the skipped bits must be zero.
    pub fn align(&mut self) -> PerResult<()> {
        let remainder = self.position % 8;
        if remainder == 0 {
            return Ok(());
        }
        let padding = 8 - remainder;
        self.ensure(padding)?;
        if self.config.strict_padding && self.data[self.position..self.position + padding].any() {
            return Err(PerError::NonZeroPadding);
        }
        self.position += padding;
        Ok(())
    }

    /// Check that every bit left in the buffer is zero
    pub fn check_zero_padding(&self) -> PerResult<()> {
        if self.data[self.position.min(self.data.len())..].any() {
            return Err(PerError::NonZeroPadding);
        }
        Ok(())
    }

    /// Read a single bit
    pub fn read_bit(&mut self) -> PerResult<bool> {
        self.ensure(1)?;
        let bit = self.data[self.position];
        self.position += 1;
        Ok(bit)
    }

    /// Read multiple bits as a value (MSB first)
    pub fn read_bits(&mut self, num_bits: usize) -> PerResult<u64> {
        if num_bits > 64 {
            return Err(PerError::DecodeError(format!(
                "cannot read {num_bits} bits into a 64-bit value"
            )));
        }
        self.ensure(num_bits)?;
        let value = self.data[self.position..self.position + num_bits]
            .iter()
            .by_vals()
            .fold(0u64, |acc, bit| (acc << 1) | bit as u64);
        self.position += num_bits;
        Ok(value)
    }

    /// Read raw bytes from the current bit offset
    pub fn read_bytes(&mut self, num_bytes: usize) -> PerResult<Vec<u8>> {
        let needed = num_bytes.checked_mul(8).ok_or_else(|| {
            PerError::DecodeError(format!("byte count {num_bytes} overflows"))
        })?;
        self.ensure(needed)?;
        let bytes = self.data[self.position..self.position + needed]
            .chunks(8)
            .map(|chunk| chunk.iter().by_vals().fold(0u8, |acc, bit| (acc << 1) | bit as u8))
            .collect();
        self.position += needed;
        Ok(bytes)
    }

    /// Read a bit sequence verbatim
    pub fn read_bitvec(&mut self, num_bits: usize) -> PerResult<BitVec<u8, Msb0>> {
        self.ensure(num_bits)?;
        let bits = self.data[self.position..self.position + num_bits].to_bitvec();
        self.position += num_bits;
        Ok(bits)
    }

    pub fn skip_bits(&mut self, num_bits: usize) -> PerResult<()> {
        self.ensure(num_bits)?;
        self.position += num_bits;
        Ok(())
    }

    /// Decode constrained whole number (X.691 Section 10.5)
    pub fn decode_constrained_whole_number(&mut self, constraint: &Constraint) -> PerResult<i64> {
        if constraint.range() == 0 {
            return Err(PerError::DecodeError(format!(
                "empty constraint {}..={}",
                constraint.min, constraint.max
            )));
        }
        let bits = constraint.bits_needed();
        if bits == 0 {
            return Ok(constraint.min);
        }

        let offset = self.read_bits(bits)?;
        let value = constraint.min as i128 + offset as i128;
        if value > constraint.max as i128 {
            return Err(PerError::ValueOutOfRange {
                value: value.min(i64::MAX as i128) as i64,
                min: constraint.min,
                max: constraint.max,
            });
        }
        Ok(value as i64)
    }

    /// Decode INTEGER, honouring an extensible constraint (X.691 Section 12)
    pub fn decode_integer(&mut self, constraint: &Constraint) -> PerResult<i64> {
        if constraint.extensible && self.read_bit()? {
            return self.decode_unconstrained_whole_number();
        }
        self.decode_constrained_whole_number(constraint)
    }

    /// Decode semi-constrained whole number (X.691 Section 10.7)
    pub fn decode_semi_constrained_whole_number(&mut self, lb: i64) -> PerResult<i64> {
        let offset = self.decode_unsigned_octets()?;
        let value = lb as i128 + offset as i128;
        if value > i64::MAX as i128 {
            return Err(PerError::DecodeError(format!(
                "semi-constrained value overflows: {lb} + {offset}"
            )));
        }
        Ok(value as i64)
    }

    /// Decode unconstrained whole number (X.691 Section 10.8)
    pub fn decode_unconstrained_whole_number(&mut self) -> PerResult<i64> {
        let len = self.decode_length_determinant()?;
        if len == 0 || len > 8 {
            return Err(PerError::DecodeError(format!(
                "unsupported integer length: {len} octets"
            )));
        }
        let bytes = self.read_bytes(len)?;
        let negative = bytes[0] & 0x80 != 0;
        let mut value: i64 = if negative { -1 } else { 0 };
        for byte in bytes {
            value = (value << 8) | byte as i64;
        }
        Ok(value)
    }

    /// Decode normally small non-negative whole number (X.691 Section 10.6)
    pub fn decode_normally_small_non_negative(&mut self) -> PerResult<u64> {
        let large = self.read_bit()?;
        if !large {
            self.read_bits(6)
        } else {
            self.decode_unsigned_octets()
        }
    }

    fn decode_unsigned_octets(&mut self) -> PerResult<u64> {
        let len = self.decode_length_determinant()?;
        if len == 0 || len > 8 {
            return Err(PerError::DecodeError(format!(
                "unsupported integer length: {len} octets"
            )));
        }
        let bytes = self.read_bytes(len)?;
        Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
    }

    /// Decode unconstrained length determinant (single fragment forms)
    pub fn decode_length_determinant(&mut self) -> PerResult<usize> {
        if !self.read_bit()? {
            return Ok(self.read_bits(7)? as usize);
        }
        if !self.read_bit()? {
            return Ok(self.read_bits(14)? as usize);
        }
        Err(PerError::DecodeError(
            "fragmented length determinant not allowed here".to_string(),
        ))
    }

    /// Decode a length-prefixed, possibly fragmented run of units
    ///
    /// `consume` reads the units of each fragment. Returns the total count.
    pub fn decode_fragmented(
        &mut self,
        mut consume: impl FnMut(&mut Self, usize) -> PerResult<()>,
    ) -> PerResult<usize> {
        let mut total = 0usize;
        loop {
            if !self.read_bit()? {
                let count = self.read_bits(7)? as usize;
                consume(self, count)?;
                return Ok(total + count);
            }
            if !self.read_bit()? {
                let count = self.read_bits(14)? as usize;
                consume(self, count)?;
                return Ok(total + count);
            }
            let multiplier = self.read_bits(6)? as usize;
            if multiplier == 0 || multiplier > MAX_FRAGMENT_MULTIPLIER {
                return Err(PerError::DecodeError(format!(
                    "invalid fragment multiplier {multiplier}"
                )));
            }
            let count = multiplier * FRAGMENT_UNIT;
            consume(self, count)?;
            total += count;
        }
    }

    /// Decode constrained length determinant
    pub fn decode_constrained_length(&mut self, min: usize, max: usize) -> PerResult<usize> {
        let length = if max < 65536 {
            let constraint = Constraint::new(min as i64, max as i64);
            match self.decode_constrained_whole_number(&constraint) {
                Ok(v) => v as usize,
                Err(PerError::ValueOutOfRange { value, .. }) => {
                    return Err(PerError::CountOutOfRange {
                        count: value as usize,
                        min,
                        max,
                    })
                }
                Err(e) => return Err(e),
            }
        } else {
            self.decode_length_determinant()?
        };
        if length < min || length > max {
            return Err(PerError::CountOutOfRange { count: length, min, max });
        }
        Ok(length)
    }

    /// Decode an ENUMERATED index (X.691 Section 14)
    ///
    /// Extension indices are returned as `root_count + n`; mapping them to a
    /// known value is up to the caller.
    pub fn decode_enumerated_index(&mut self, root_count: usize, extensible: bool) -> PerResult<usize> {
        self.decode_extensible_index(root_count, extensible)
            .map_err(|e| match e {
                PerError::InvalidChoiceIndex { index, max } => PerError::InvalidEnumIndex { index, max },
                other => other,
            })
    }

    /// Decode CHOICE index (X.691 Section 23)
    pub fn decode_choice_index(
        &mut self,
        num_alternatives: usize,
        extensible: bool,
    ) -> PerResult<usize> {
        self.decode_extensible_index(num_alternatives, extensible)
    }

    fn decode_extensible_index(&mut self, root_count: usize, extensible: bool) -> PerResult<usize> {
        if extensible && self.read_bit()? {
            let ext_index = self.decode_normally_small_non_negative()?;
            return usize::try_from(ext_index)
                .ok()
                .and_then(|i| i.checked_add(root_count))
                .ok_or_else(|| PerError::DecodeError(format!("extension index {ext_index} overflows")));
        }
        if root_count == 0 {
            return Err(PerError::InvalidChoiceIndex { index: 0, max: 0 });
        }
        let bits = Constraint::new(0, root_count as i64 - 1).bits_needed();
        let index = self.read_bits(bits)? as usize;
        if index >= root_count {
            return Err(PerError::InvalidChoiceIndex {
                index,
                max: root_count - 1,
            });
        }
        Ok(index)
    }

    /// Read the octets of an open type (X.691 Section 11.2)
    pub fn read_open_type(&mut self) -> PerResult<Vec<u8>> {
        let mut octets = Vec::new();
        self.decode_fragmented(|dec, count| {
            dec.check_open_type_limit(octets.len() + count)?;
            octets.extend(dec.read_bytes(count)?);
            Ok(())
        })?;
        Ok(octets)
    }

    fn check_open_type_limit(&self, total: usize) -> PerResult<()> {
        let limit = self.config.max_open_type_bytes;
        if total > limit {
            return Err(PerError::InconsistentExtension(format!(
                "open type of {total} octets exceeds limit {limit}"
            )));
        }
        Ok(())
    }

    /// Decode a value carried in an open type
    ///
    /// The inner decoder sees exactly the octets of the open type; bits the
    /// inner value does not consume are padding.
    pub fn decode_open_type<T>(
        &mut self,
        decode: impl FnOnce(&mut UperDecoder<'_>) -> PerResult<T>,
    ) -> PerResult<T> {
        let octets = self.read_open_type()?;
        let mut inner = UperDecoder::with_config(&octets, self.config);
        let value = decode(&mut inner)?;
        if self.config.strict_padding {
            inner.check_zero_padding()?;
        }
        Ok(value)
    }

    /// Skip an open type without looking inside, returns its octet length
    pub fn skip_open_type(&mut self) -> PerResult<usize> {
        let mut skipped = 0usize;
        self.decode_fragmented(|dec, count| {
            skipped += count;
            dec.check_open_type_limit(skipped)?;
            let bits = count.checked_mul(8).ok_or_else(|| {
                PerError::DecodeError(format!("open type length {count} overflows"))
            })?;
            dec.skip_bits(bits)
        })
    }
}

/// Trait for types that can be encoded with UPER
pub trait UperEncode {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()>;
}

/// Trait for types that can be decoded with UPER
pub trait UperDecode: Sized {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self>;
}

/// BOOLEAN (X.691 Section 11)
impl UperEncode for bool {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encoder.write_bit(*self);
        Ok(())
    }
}

impl UperDecode for bool {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        decoder.read_bit()
    }
}

/// NULL: no bits on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null;

impl UperEncode for Null {
    fn encode_uper(&self, _encoder: &mut UperEncoder) -> PerResult<()> {
        Ok(())
    }
}

impl UperDecode for Null {
    fn decode_uper(_decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        Ok(Null)
    }
}

impl<T: UperEncode + ?Sized> UperEncode for Box<T> {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        (**self).encode_uper(encoder)
    }
}

impl<T: UperDecode> UperDecode for Box<T> {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        T::decode_uper(decoder).map(Box::new)
    }
}
