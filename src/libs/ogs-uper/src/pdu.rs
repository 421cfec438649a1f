//! Top-level PDU encoding
//!
//! A complete message is padded to a whole number of octets; an empty
//! encoding becomes a single zero octet (X.691 Section 11.1).

use bytes::Bytes;

use crate::config::CodecConfig;
use crate::per::{PerError, PerResult, UperDecode, UperDecoder, UperEncode, UperEncoder};

/// Encode a complete PDU with the default configuration
pub fn encode_pdu<T: UperEncode + ?Sized>(value: &T) -> PerResult<Bytes> {
    encode_pdu_with_config(value, &CodecConfig::default())
}

pub fn encode_pdu_with_config<T: UperEncode + ?Sized>(
    value: &T,
    config: &CodecConfig,
) -> PerResult<Bytes> {
    let mut encoder = UperEncoder::new();
    if let Err(e) = value.encode_uper(&mut encoder) {
        log::debug!(
            "{} encode failed at bit {}: {}",
            std::any::type_name::<T>(),
            encoder.bit_position(),
            e
        );
        return Err(e);
    }
    encoder.align();
    if encoder.is_empty() {
        encoder.write_bits(0, 8);
    }
    let size = encoder.byte_len();
    if size > config.max_pdu_bytes {
        return Err(PerError::PduTooLarge {
            size,
            max: config.max_pdu_bytes,
        });
    }
    log::trace!("{} encoded in {} octets", std::any::type_name::<T>(), size);
    Ok(encoder.into_bytes())
}

/// Decode a complete PDU with the default configuration
pub fn decode_pdu<T: UperDecode>(data: &[u8]) -> PerResult<T> {
    decode_pdu_with_config(data, &CodecConfig::default())
}

pub fn decode_pdu_with_config<T: UperDecode>(data: &[u8], config: &CodecConfig) -> PerResult<T> {
    if data.len() > config.max_pdu_bytes {
        return Err(PerError::DecodeError(format!(
            "PDU of {} octets exceeds limit {}",
            data.len(),
            config.max_pdu_bytes
        )));
    }
    let mut decoder = UperDecoder::with_config(data, *config);
    let value = match T::decode_uper(&mut decoder) {
        Ok(value) => value,
        Err(e) => {
            log::debug!(
                "{} decode failed at bit {}: {}",
                std::any::type_name::<T>(),
                decoder.bit_position(),
                e
            );
            return Err(e);
        }
    };
    if config.strict_padding {
        decoder.check_zero_padding()?;
    }
    Ok(value)
}

/// Encode, decode and re-encode a value, checking that both encodings and
/// the decoded value agree
pub fn check_round_trip<T>(value: &T) -> PerResult<Bytes>
where
    T: UperEncode + UperDecode + PartialEq + std::fmt::Debug,
{
    let first = encode_pdu(value)?;
    let decoded: T = decode_pdu(&first)?;
    if &decoded != value {
        return Err(PerError::DecodeError(format!(
            "decoded value differs: {decoded:?} != {value:?}"
        )));
    }
    let second = encode_pdu(&decoded)?;
    if first != second {
        return Err(PerError::EncodeError(format!(
            "re-encoding differs: {} != {}",
            hex::encode(&first),
            hex::encode(&second)
        )));
    }
    Ok(first)
}
