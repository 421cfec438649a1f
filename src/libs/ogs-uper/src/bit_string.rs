//! BIT STRING codec (X.691 Section 16)
//!
//! Bits are kept in wire order. Numeric accessors follow the usual RRC
//! convention: bit index 0 is the least significant bit, i.e. the LAST bit
//! on the wire, and `to_u64` reads the string as a big-endian number.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::json::{ToJson, Value};
use crate::per::{PerError, PerResult, UperDecode, UperDecoder, UperEncode, UperEncoder};

type Bits = BitVec<u8, Msb0>;

fn bit_at(bits: &BitSlice<u8, Msb0>, index: usize) -> bool {
    index < bits.len() && bits[bits.len() - 1 - index]
}

fn set_bit_at(bits: &mut BitSlice<u8, Msb0>, index: usize, value: bool) -> PerResult<()> {
    let len = bits.len();
    if index >= len {
        return Err(PerError::UnsupportedValue(format!(
            "bit {index} out of range for a {len}-bit string"
        )));
    }
    bits.set(len - 1 - index, value);
    Ok(())
}

fn bits_to_u64(bits: &BitSlice<u8, Msb0>) -> Option<u64> {
    if bits.len() > 64 {
        return None;
    }
    Some(bits.iter().by_vals().fold(0u64, |acc, bit| (acc << 1) | bit as u64))
}

/// Number of bits needed to write `value`, zero for zero
fn significant_bits(value: u64) -> usize {
    64 - value.leading_zeros() as usize
}

fn bits_from_u64(value: u64, len: usize) -> PerResult<Bits> {
    if significant_bits(value) > len {
        return Err(PerError::UnsupportedValue(format!(
            "{value} does not fit in {len} bits"
        )));
    }
    let mut bits = Bits::repeat(false, len);
    for i in 0..len.min(64) {
        bits.set(len - 1 - i, (value >> i) & 1 == 1);
    }
    Ok(bits)
}

fn parse_bits(text: &str) -> PerResult<Bits> {
    text.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(PerError::UnsupportedValue(format!(
                "invalid character {other:?} in bit string"
            ))),
        })
        .collect()
}

fn fmt_bits(bits: &BitSlice<u8, Msb0>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for bit in bits.iter().by_vals() {
        f.write_str(if bit { "1" } else { "0" })?;
    }
    Ok(())
}

fn check_size(len: usize, min: usize, max: usize) -> PerResult<()> {
    if len < min || len > max {
        return Err(PerError::SizeViolation { size: len, min, max });
    }
    Ok(())
}

/// `BIT STRING (SIZE (N))`: no length on the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedBitString<const N: usize>(Bits);

impl<const N: usize> Default for FixedBitString<N> {
    fn default() -> Self {
        Self(Bits::repeat(false, N))
    }
}

impl<const N: usize> FixedBitString<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_u64(value: u64) -> PerResult<Self> {
        bits_from_u64(value, N).map(Self)
    }

    pub fn from_bitslice(bits: &BitSlice<u8, Msb0>) -> PerResult<Self> {
        check_size(bits.len(), N, N)?;
        Ok(Self(bits.to_bitvec()))
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn get(&self, index: usize) -> bool {
        bit_at(&self.0, index)
    }

    pub fn set(&mut self, index: usize, value: bool) -> PerResult<()> {
        set_bit_at(&mut self.0, index, value)
    }

    /// Big-endian value, `None` above 64 bits
    pub fn to_u64(&self) -> Option<u64> {
        bits_to_u64(&self.0)
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }
}

impl<const N: usize> FromStr for FixedBitString<N> {
    type Err = PerError;

    fn from_str(s: &str) -> PerResult<Self> {
        let bits = parse_bits(s)?;
        check_size(bits.len(), N, N)?;
        Ok(Self(bits))
    }
}

impl<const N: usize> fmt::Display for FixedBitString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bits(&self.0, f)
    }
}

impl<const N: usize> UperEncode for FixedBitString<N> {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encoder.write_bitslice(&self.0);
        Ok(())
    }
}

impl<const N: usize> UperDecode for FixedBitString<N> {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        decoder.read_bitvec(N).map(Self)
    }
}

impl<const N: usize> ToJson for FixedBitString<N> {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

/// `BIT STRING (SIZE (LB..UB))`, or `(SIZE (LB..UB, ...))` when `EXT`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedBitString<const LB: usize, const UB: usize, const EXT: bool = false>(Bits);

impl<const LB: usize, const UB: usize, const EXT: bool> Default for BoundedBitString<LB, UB, EXT> {
    fn default() -> Self {
        Self(Bits::repeat(false, LB))
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> BoundedBitString<LB, UB, EXT> {
    fn check_len(len: usize) -> PerResult<()> {
        if EXT {
            Ok(())
        } else {
            check_size(len, LB, UB)
        }
    }

    /// All-zero string of `len` bits
    pub fn with_len(len: usize) -> PerResult<Self> {
        Self::check_len(len)?;
        Ok(Self(Bits::repeat(false, len)))
    }

    /// Shortest string holding `value`, never below `LB` bits
    pub fn from_u64(value: u64) -> PerResult<Self> {
        let len = significant_bits(value).max(LB);
        Self::check_len(len)?;
        bits_from_u64(value, len).map(Self)
    }

    pub fn from_bitslice(bits: &BitSlice<u8, Msb0>) -> PerResult<Self> {
        Self::check_len(bits.len())?;
        Ok(Self(bits.to_bitvec()))
    }

    /// Change the length, clearing every bit
    pub fn resize(&mut self, len: usize) -> PerResult<()> {
        Self::check_len(len)?;
        self.0 = Bits::repeat(false, len);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> bool {
        bit_at(&self.0, index)
    }

    pub fn set(&mut self, index: usize, value: bool) -> PerResult<()> {
        set_bit_at(&mut self.0, index, value)
    }

    pub fn to_u64(&self) -> Option<u64> {
        bits_to_u64(&self.0)
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> FromStr for BoundedBitString<LB, UB, EXT> {
    type Err = PerError;

    fn from_str(s: &str) -> PerResult<Self> {
        let bits = parse_bits(s)?;
        Self::check_len(bits.len())?;
        Ok(Self(bits))
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> fmt::Display
    for BoundedBitString<LB, UB, EXT>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bits(&self.0, f)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> UperEncode
    for BoundedBitString<LB, UB, EXT>
{
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        let len = self.0.len();
        let in_root = (LB..=UB).contains(&len);
        if EXT {
            encoder.write_bit(!in_root);
            if !in_root {
                return encoder.encode_fragmented(len, |enc, range| enc.write_bitslice(&self.0[range]));
            }
        }
        if LB != UB {
            encoder.encode_constrained_length(len, LB, UB)?;
        } else {
            check_size(len, LB, UB)?;
        }
        encoder.write_bitslice(&self.0);
        Ok(())
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> UperDecode
    for BoundedBitString<LB, UB, EXT>
{
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        if EXT && decoder.read_bit()? {
            return decode_fragmented_bits(decoder).map(Self);
        }
        let len = if LB == UB {
            LB
        } else {
            decoder.decode_constrained_length(LB, UB)?
        };
        decoder.read_bitvec(len).map(Self)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> ToJson for BoundedBitString<LB, UB, EXT> {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

fn decode_fragmented_bits(decoder: &mut UperDecoder<'_>) -> PerResult<Bits> {
    let mut bits = Bits::new();
    decoder.decode_fragmented(|dec, count| {
        bits.extend_from_bitslice(&dec.read_bitvec(count)?);
        Ok(())
    })?;
    Ok(bits)
}

/// Unconstrained `BIT STRING`: general length determinant, then the bits
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString(Bits);

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_len(len: usize) -> Self {
        Self(Bits::repeat(false, len))
    }

    /// Shortest string holding `value`, at least one bit
    pub fn from_u64(value: u64) -> Self {
        let len = significant_bits(value).max(1);
        let mut bits = Bits::repeat(false, len);
        for i in 0..len {
            bits.set(len - 1 - i, (value >> i) & 1 == 1);
        }
        Self(bits)
    }

    pub fn from_bitslice(bits: &BitSlice<u8, Msb0>) -> Self {
        Self(bits.to_bitvec())
    }

    pub fn resize(&mut self, len: usize) {
        self.0 = Bits::repeat(false, len);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> bool {
        bit_at(&self.0, index)
    }

    pub fn set(&mut self, index: usize, value: bool) -> PerResult<()> {
        set_bit_at(&mut self.0, index, value)
    }

    pub fn to_u64(&self) -> Option<u64> {
        bits_to_u64(&self.0)
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }
}

impl FromStr for BitString {
    type Err = PerError;

    fn from_str(s: &str) -> PerResult<Self> {
        parse_bits(s).map(Self)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bits(&self.0, f)
    }
}

impl UperEncode for BitString {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encoder.encode_fragmented(self.0.len(), |enc, range| enc.write_bitslice(&self.0[range]))
    }
}

impl UperDecode for BitString {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        decode_fragmented_bits(decoder).map(Self)
    }
}

impl ToJson for BitString {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}
