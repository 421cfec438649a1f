//! ENUMERATED codec (X.691 Section 14)
//!
//! Schema enums are plain C-like Rust enums described by the [`Enumerated`]
//! trait: a constant table of known values and their ASN.1 names, the size
//! of the extension root and whether the type carries an extension marker.
//! The [`uper_enumerated!`](crate::uper_enumerated) macro generates the enum,
//! the trait impl and the codec/dump impls from a one-line-per-value list.

use crate::per::{PerError, PerResult, UperDecoder, UperEncoder};

/// Description of an ENUMERATED type
pub trait Enumerated: Sized + Copy + PartialEq + 'static {
    /// ASN.1 names of every value known to this schema version, root first
    const NAMES: &'static [&'static str];
    /// Values matching `NAMES` position by position
    const ALL: &'static [Self];
    /// Number of values in the extension root
    const ROOT_COUNT: usize;
    /// Whether the type has an extension marker
    const EXTENSIBLE: bool;
    /// Type name used in logs
    const TYPE_NAME: &'static str;

    /// Sentinel for extension values this schema version does not know
    fn unknown() -> Option<Self> {
        None
    }

    /// Position in the value table, `None` for the unknown sentinel
    fn index(self) -> Option<usize> {
        Self::ALL.iter().position(|v| *v == self)
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn as_str(self) -> &'static str {
        self.index()
            .and_then(|i| Self::NAMES.get(i).copied())
            .unwrap_or("unknown")
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .and_then(Self::from_index)
    }

    /// True for values added after the extension marker
    fn is_extension(self) -> bool {
        self.index().is_some_and(|i| i >= Self::ROOT_COUNT)
    }
}

/// Encode an ENUMERATED value
///
/// The unknown sentinel has no codepoint and cannot be encoded.
pub fn encode_enumerated<E: Enumerated>(encoder: &mut UperEncoder, value: E) -> PerResult<()> {
    let index = value.index().ok_or_else(|| {
        PerError::UnsupportedValue(format!("{}: unknown value has no codepoint", E::TYPE_NAME))
    })?;
    encoder.encode_enumerated_index(index, E::ROOT_COUNT, E::EXTENSIBLE)
}

/// Decode an ENUMERATED value
///
/// Extension values newer than this schema map to the unknown sentinel.
pub fn decode_enumerated<E: Enumerated>(decoder: &mut UperDecoder<'_>) -> PerResult<E> {
    let index = decoder.decode_enumerated_index(E::ROOT_COUNT, E::EXTENSIBLE)?;
    if let Some(value) = E::from_index(index) {
        return Ok(value);
    }
    match E::unknown() {
        Some(unknown) => {
            log::warn!("{}: unknown extension value {} ignored", E::TYPE_NAME, index);
            Ok(unknown)
        }
        None => Err(PerError::InvalidEnumIndex {
            index,
            max: E::NAMES.len().saturating_sub(1),
        }),
    }
}

/// Define an ENUMERATED type
///
/// ```
/// ogs_uper::uper_enumerated! {
///     /// PHICH-Config phich-Resource
///     pub enum PhichResource { OneSixth = "oneSixth", Half = "half", One = "one", Two = "two" }
/// }
///
/// ogs_uper::uper_enumerated! {
///     pub enum Speed (extensible) { Low = "low", High = "high" } additions { Max = "max" }
/// }
/// ```
///
/// Extensible enums get an extra `Unknown` variant standing for extension
/// values the local schema does not know.
#[macro_export]
macro_rules! uper_enumerated {
    (@codec $name:ident) => {
        impl $crate::per::UperEncode for $name {
            fn encode_uper(&self, encoder: &mut $crate::per::UperEncoder) -> $crate::per::PerResult<()> {
                $crate::enumerated::encode_enumerated(encoder, *self)
            }
        }

        impl $crate::per::UperDecode for $name {
            fn decode_uper(decoder: &mut $crate::per::UperDecoder<'_>) -> $crate::per::PerResult<Self> {
                $crate::enumerated::decode_enumerated(decoder)
            }
        }

        impl $crate::json::ToJson for $name {
            fn to_json(&self) -> $crate::json::Value {
                $crate::json::Value::String(
                    $crate::enumerated::Enumerated::as_str(*self).to_string(),
                )
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::enumerated::Enumerated::as_str(*self))
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($var:ident = $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($var),+
        }

        impl $crate::enumerated::Enumerated for $name {
            const NAMES: &'static [&'static str] = &[$($text),+];
            const ALL: &'static [Self] = &[$(Self::$var),+];
            const ROOT_COUNT: usize = Self::ALL.len();
            const EXTENSIBLE: bool = false;
            const TYPE_NAME: &'static str = stringify!($name);
        }

        $crate::uper_enumerated!(@codec $name);
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident (extensible) { $($var:ident = $text:literal),+ $(,)? }
        $(additions { $($evar:ident = $etext:literal),+ $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($var,)+
            $($($evar,)+)?
            Unknown,
        }

        impl $crate::enumerated::Enumerated for $name {
            const NAMES: &'static [&'static str] = &[$($text,)+ $($($etext,)+)?];
            const ALL: &'static [Self] = &[$(Self::$var,)+ $($(Self::$evar,)+)?];
            const ROOT_COUNT: usize = [$(stringify!($var)),+].len();
            const EXTENSIBLE: bool = true;
            const TYPE_NAME: &'static str = stringify!($name);

            fn unknown() -> Option<Self> {
                Some(Self::Unknown)
            }
        }

        $crate::uper_enumerated!(@codec $name);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::ToJson;
    use crate::per::{UperDecode, UperEncode};

    crate::uper_enumerated! {
        enum Criticality { Reject = "reject", Ignore = "ignore", Notify = "notify" }
    }

    crate::uper_enumerated! {
        enum Granularity (extensible) { Coarse = "coarse", Fine = "fine" } additions { Finest = "finest" }
    }

    #[test]
    fn test_enum_table() {
        assert_eq!(Criticality::ROOT_COUNT, 3);
        assert!(!Criticality::EXTENSIBLE);
        assert_eq!(Criticality::Notify.index(), Some(2));
        assert_eq!(Criticality::from_name("ignore"), Some(Criticality::Ignore));
        assert_eq!(Criticality::from_name("accept"), None);
        assert_eq!(Criticality::Reject.to_string(), "reject");

        assert_eq!(Granularity::ROOT_COUNT, 2);
        assert_eq!(Granularity::NAMES, &["coarse", "fine", "finest"]);
        assert!(Granularity::Finest.is_extension());
        assert_eq!(Granularity::Unknown.index(), None);
        assert_eq!(Granularity::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_enum_three_values_uses_two_bits() {
        let mut encoder = UperEncoder::new();
        Criticality::Notify.encode_uper(&mut encoder).unwrap();
        assert_eq!(encoder.bit_position(), 2);

        let bytes = encoder.into_bytes();
        let mut decoder = UperDecoder::new(&bytes);
        assert_eq!(Criticality::decode_uper(&mut decoder).unwrap(), Criticality::Notify);
    }

    #[test]
    fn test_enum_out_of_range_index_fails() {
        let data = [255u8];
        let mut decoder = UperDecoder::new(&data);
        let err = Criticality::decode_uper(&mut decoder).unwrap_err();
        assert_eq!(err, PerError::InvalidEnumIndex { index: 3, max: 2 });
        assert!(err.is_decode_failure());
    }

    #[test]
    fn test_extensible_enum_wire_format() {
        let mut encoder = UperEncoder::new();
        Granularity::Fine.encode_uper(&mut encoder).unwrap();
        // ext bit 0, one bit of root index
        assert_eq!(encoder.bit_position(), 2);
        Granularity::Finest.encode_uper(&mut encoder).unwrap();
        // ext bit 1, normally small 0
        assert_eq!(encoder.bit_position(), 2 + 8);

        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0b0110_0000, 0b0000_0000]);
        let mut decoder = UperDecoder::new(&bytes);
        assert_eq!(Granularity::decode_uper(&mut decoder).unwrap(), Granularity::Fine);
        assert_eq!(Granularity::decode_uper(&mut decoder).unwrap(), Granularity::Finest);
    }

    #[test]
    fn test_unknown_extension_value_maps_to_sentinel() {
        // ext bit 1, normally small 5: an addition this schema has never seen
        let mut encoder = UperEncoder::new();
        encoder.encode_enumerated_index(7, 2, true).unwrap();
        encoder.write_bit(true);
        let bytes = encoder.into_bytes();

        let mut decoder = UperDecoder::new(&bytes);
        assert_eq!(Granularity::decode_uper(&mut decoder).unwrap(), Granularity::Unknown);
        assert!(decoder.read_bit().unwrap());
        assert_eq!(Granularity::Unknown.to_json(), crate::json::Value::from("unknown"));
    }

    #[test]
    fn test_unknown_sentinel_cannot_be_encoded() {
        let mut encoder = UperEncoder::new();
        let err = Granularity::Unknown.encode_uper(&mut encoder).unwrap_err();
        assert!(err.is_encode_failure());
        assert_eq!(encoder.bit_position(), 0);
    }
}
