//! SEQUENCE OF codec (X.691 Section 20)
//!
//! `SEQUENCE (SIZE (lb..ub)) OF T`: a constrained count when the bounds
//! differ, nothing when the size is fixed, then the items back to back.

use std::ops::Deref;

use crate::json::{ToJson, Value};
use crate::per::{Constraint, PerError, PerResult, UperDecode, UperDecoder, UperEncode, UperEncoder};

/// Codec for list items that are not self-describing Rust types, such as
/// INTEGER items whose range belongs to the list declaration
pub trait ItemCodec<T> {
    fn encode_item(&self, encoder: &mut UperEncoder, item: &T) -> PerResult<()>;
    fn decode_item(&self, decoder: &mut UperDecoder<'_>) -> PerResult<T>;
}

/// Constrained INTEGER items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerItem(pub Constraint);

impl ItemCodec<i64> for IntegerItem {
    fn encode_item(&self, encoder: &mut UperEncoder, item: &i64) -> PerResult<()> {
        encoder.encode_integer(*item, &self.0)
    }

    fn decode_item(&self, decoder: &mut UperDecoder<'_>) -> PerResult<i64> {
        decoder.decode_integer(&self.0)
    }
}

/// Encode a list with runtime size bounds
pub fn encode_seq_of<T>(
    encoder: &mut UperEncoder,
    items: &[T],
    lb: usize,
    ub: usize,
    mut encode_item: impl FnMut(&mut UperEncoder, &T) -> PerResult<()>,
) -> PerResult<()> {
    if lb == ub {
        if items.len() != lb {
            return Err(PerError::SizeViolation {
                size: items.len(),
                min: lb,
                max: ub,
            });
        }
    } else {
        encoder.encode_constrained_length(items.len(), lb, ub)?;
    }
    for item in items {
        encode_item(encoder, item)?;
    }
    Ok(())
}

/// Decode a list with runtime size bounds
pub fn decode_seq_of<T>(
    decoder: &mut UperDecoder<'_>,
    lb: usize,
    ub: usize,
    mut decode_item: impl FnMut(&mut UperDecoder<'_>) -> PerResult<T>,
) -> PerResult<Vec<T>> {
    let count = if lb == ub {
        lb
    } else {
        decoder.decode_constrained_length(lb, ub)?
    };
    // A forged count must not drive the allocation
    let mut items = Vec::with_capacity(count.min(decoder.remaining_bits()));
    for _ in 0..count {
        items.push(decode_item(decoder)?);
    }
    Ok(items)
}

pub fn encode_seq_of_with<T>(
    encoder: &mut UperEncoder,
    items: &[T],
    lb: usize,
    ub: usize,
    codec: &impl ItemCodec<T>,
) -> PerResult<()> {
    encode_seq_of(encoder, items, lb, ub, |enc, item| codec.encode_item(enc, item))
}

pub fn decode_seq_of_with<T>(
    decoder: &mut UperDecoder<'_>,
    lb: usize,
    ub: usize,
    codec: &impl ItemCodec<T>,
) -> PerResult<Vec<T>> {
    decode_seq_of(decoder, lb, ub, |dec| codec.decode_item(dec))
}

/// `SEQUENCE (SIZE (LB..UB)) OF T`
///
/// The size constraint is checked on construction and on every push.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedList<T, const LB: usize, const UB: usize>(Vec<T>);

impl<T, const LB: usize, const UB: usize> BoundedList<T, LB, UB> {
    pub fn new(items: Vec<T>) -> PerResult<Self> {
        if items.len() < LB || items.len() > UB {
            return Err(PerError::SizeViolation {
                size: items.len(),
                min: LB,
                max: UB,
            });
        }
        Ok(Self(items))
    }

    pub fn push(&mut self, item: T) -> PerResult<()> {
        if self.0.len() >= UB {
            return Err(PerError::SizeViolation {
                size: self.0.len() + 1,
                min: LB,
                max: UB,
            });
        }
        self.0.push(item);
        Ok(())
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T, const LB: usize, const UB: usize> Deref for BoundedList<T, LB, UB> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const LB: usize, const UB: usize> TryFrom<Vec<T>> for BoundedList<T, LB, UB> {
    type Error = PerError;

    fn try_from(items: Vec<T>) -> PerResult<Self> {
        Self::new(items)
    }
}

impl<T: UperEncode, const LB: usize, const UB: usize> UperEncode for BoundedList<T, LB, UB> {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encode_seq_of(encoder, &self.0, LB, UB, |enc, item| item.encode_uper(enc))
    }
}

impl<T: UperDecode, const LB: usize, const UB: usize> UperDecode for BoundedList<T, LB, UB> {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        decode_seq_of(decoder, LB, UB, T::decode_uper).map(Self)
    }
}

impl<T: ToJson, const LB: usize, const UB: usize> ToJson for BoundedList<T, LB, UB> {
    fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(ToJson::to_json).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_one_to_three() {
        for count in 1..=3 {
            let list = BoundedList::<bool, 1, 3>::new(vec![true; count]).unwrap();
            let mut encoder = UperEncoder::new();
            list.encode_uper(&mut encoder).unwrap();
            assert_eq!(encoder.bit_position(), 2 + count);

            let bytes = encoder.into_bytes();
            let mut decoder = UperDecoder::new(&bytes);
            assert_eq!(BoundedList::<bool, 1, 3>::decode_uper(&mut decoder).unwrap(), list);
        }

        assert!(BoundedList::<bool, 1, 3>::new(vec![]).is_err());
        assert!(BoundedList::<bool, 1, 3>::new(vec![false; 4]).is_err());
    }

    #[test]
    fn test_forged_count_rejected() {
        // count offset 3 means four items in a SIZE (1..3) list
        let data = [0b1111_1100u8];
        let mut decoder = UperDecoder::new(&data);
        let err = BoundedList::<bool, 1, 3>::decode_uper(&mut decoder).unwrap_err();
        assert_eq!(err, PerError::CountOutOfRange { count: 4, min: 1, max: 3 });
        assert!(err.is_decode_failure());
    }

    #[test]
    fn test_push_beyond_upper_bound() {
        let mut list = BoundedList::<bool, 0, 2>::new(vec![]).unwrap();
        list.push(true).unwrap();
        list.push(false).unwrap();
        assert_eq!(
            list.push(true),
            Err(PerError::SizeViolation { size: 3, min: 0, max: 2 })
        );
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_fixed_size_has_no_count() {
        let list = BoundedList::<bool, 4, 4>::new(vec![true, false, true, true]).unwrap();
        let mut encoder = UperEncoder::new();
        list.encode_uper(&mut encoder).unwrap();
        assert_eq!(encoder.bit_position(), 4);
        assert_eq!(&encoder.into_bytes()[..], &[0b1011_0000]);

        let mut encoder = UperEncoder::new();
        assert!(encode_seq_of(&mut encoder, &[true], 4, 4, |enc, item| item.encode_uper(enc)).is_err());
    }

    #[test]
    fn test_integer_items_count_width() {
        let codec = IntegerItem(Constraint::new(0, 3));
        let items: Vec<i64> = (0..33).map(|i| i % 4).collect();

        let mut encoder = UperEncoder::new();
        encode_seq_of_with(&mut encoder, &items, 0, 40, &codec).unwrap();
        // 6 bits of count for SIZE (0..40), then 2 bits per item
        assert_eq!(encoder.bit_position(), 6 + 33 * 2);

        let bytes = encoder.into_bytes();
        let mut decoder = UperDecoder::new(&bytes);
        assert_eq!(decoder.read_bits(6).unwrap(), 33);

        let mut decoder = UperDecoder::new(&bytes);
        assert_eq!(decode_seq_of_with(&mut decoder, 0, 40, &codec).unwrap(), items);
    }

    #[test]
    fn test_truncated_list() {
        let codec = IntegerItem(Constraint::new(0, 255));
        // count 3, only one item present
        let data = [0b0011_0000u8, 0x70];
        let mut decoder = UperDecoder::new(&data);
        assert!(matches!(
            decode_seq_of_with(&mut decoder, 0, 8, &codec),
            Err(PerError::BufferUnderflow { .. })
        ));
    }
}
