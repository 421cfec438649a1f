//! OCTET STRING codec (X.691 Section 17)
//!
//! In UPER the octets are written at the current bit offset, never aligned.

use std::ops::Deref;

use crate::json::{ToJson, Value};
use crate::per::{PerError, PerResult, UperDecode, UperDecoder, UperEncode, UperEncoder};

fn decode_hex(text: &str) -> PerResult<Vec<u8>> {
    hex::decode(text).map_err(|e| PerError::UnsupportedValue(format!("invalid hex string: {e}")))
}

/// `OCTET STRING (SIZE (N))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedOctetString<const N: usize>(pub [u8; N]);

impl<const N: usize> Default for FixedOctetString<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> FixedOctetString<N> {
    pub fn from_slice(octets: &[u8]) -> PerResult<Self> {
        let array = <[u8; N]>::try_from(octets).map_err(|_| PerError::SizeViolation {
            size: octets.len(),
            min: N,
            max: N,
        })?;
        Ok(Self(array))
    }

    pub fn from_hex(text: &str) -> PerResult<Self> {
        Self::from_slice(&decode_hex(text)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl<const N: usize> Deref for FixedOctetString<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> UperEncode for FixedOctetString<N> {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encoder.write_bytes(&self.0);
        Ok(())
    }
}

impl<const N: usize> UperDecode for FixedOctetString<N> {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let octets = decoder.read_bytes(N)?;
        Self::from_slice(&octets)
    }
}

impl<const N: usize> ToJson for FixedOctetString<N> {
    fn to_json(&self) -> Value {
        Value::String(self.to_hex())
    }
}

/// `OCTET STRING (SIZE (LB..UB))`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedOctetString<const LB: usize, const UB: usize>(Vec<u8>);

impl<const LB: usize, const UB: usize> BoundedOctetString<LB, UB> {
    pub fn new(octets: Vec<u8>) -> PerResult<Self> {
        if octets.len() < LB || octets.len() > UB {
            return Err(PerError::SizeViolation {
                size: octets.len(),
                min: LB,
                max: UB,
            });
        }
        Ok(Self(octets))
    }

    pub fn from_hex(text: &str) -> PerResult<Self> {
        Self::new(decode_hex(text)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl<const LB: usize, const UB: usize> Deref for BoundedOctetString<LB, UB> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const LB: usize, const UB: usize> UperEncode for BoundedOctetString<LB, UB> {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        if LB != UB {
            encoder.encode_constrained_length(self.0.len(), LB, UB)?;
        }
        encoder.write_bytes(&self.0);
        Ok(())
    }
}

impl<const LB: usize, const UB: usize> UperDecode for BoundedOctetString<LB, UB> {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let len = if LB == UB {
            LB
        } else {
            decoder.decode_constrained_length(LB, UB)?
        };
        decoder.read_bytes(len).map(Self)
    }
}

impl<const LB: usize, const UB: usize> ToJson for BoundedOctetString<LB, UB> {
    fn to_json(&self) -> Value {
        Value::String(self.to_hex())
    }
}

/// Unconstrained `OCTET STRING`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OctetString(pub Vec<u8>);

impl OctetString {
    pub fn from_hex(text: &str) -> PerResult<Self> {
        decode_hex(text).map(Self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl Deref for OctetString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(octets: Vec<u8>) -> Self {
        Self(octets)
    }
}

impl UperEncode for OctetString {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encoder.encode_octets_fragmented(&self.0)
    }
}

impl UperDecode for OctetString {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let mut octets = Vec::new();
        decoder.decode_fragmented(|dec, count| {
            octets.extend(dec.read_bytes(count)?);
            Ok(())
        })?;
        Ok(Self(octets))
    }
}

impl ToJson for OctetString {
    fn to_json(&self) -> Value {
        Value::String(self.to_hex())
    }
}
