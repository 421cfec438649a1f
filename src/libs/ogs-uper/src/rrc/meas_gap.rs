//! MeasGapConfig (3GPP TS 36.331 Section 6.3.5)

use crate::choice::{choice_json, decode_choice, encode_choice, invalid_alternative, Choice, SetupRelease};
use crate::json::{Map, ToJson, Value};
use crate::per::{Constraint, PerResult, UperDecode, UperDecoder, UperEncode, UperEncoder};

/// gapOffset - gap pattern and its subframe offset
/// ASN.1: gapOffset CHOICE { gp0 INTEGER (0..39), gp1 INTEGER (0..79), ...,
///     gp2-r14 .. gp-nonUniform4-r14, gp4-r15 .. gp11-r15 }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapOffset {
    Gp0(u16),
    Gp1(u16),
    Gp2R14(u16),
    Gp3R14(u16),
    GpNcsg0R14(u16),
    GpNcsg1R14(u16),
    GpNcsg2R14(u16),
    GpNcsg3R14(u16),
    GpNonUniform1R14(u16),
    GpNonUniform2R14(u16),
    GpNonUniform3R14(u16),
    GpNonUniform4R14(u16),
    Gp4R15(u16),
    Gp5R15(u16),
    Gp6R15(u16),
    Gp7R15(u16),
    Gp8R15(u16),
    Gp9R15(u16),
    Gp10R15(u16),
    Gp11R15(u16),
    /// Alternative added after Rel-15
    Unknown,
}

/// Largest offset of each alternative, in declaration order
pub(crate) const MAX_OFFSET: [u16; 20] = [
    39, 79, 39, 79, 39, 79, 39, 79, 1279, 2559, 5119, 10239, 19, 159, 19, 39, 79, 159, 19, 159,
];

impl GapOffset {
    /// Build the alternative at `index` in declaration order
    pub fn from_parts(index: usize, offset: u16) -> Option<Self> {
        let value = match index {
            0 => GapOffset::Gp0(offset),
            1 => GapOffset::Gp1(offset),
            2 => GapOffset::Gp2R14(offset),
            3 => GapOffset::Gp3R14(offset),
            4 => GapOffset::GpNcsg0R14(offset),
            5 => GapOffset::GpNcsg1R14(offset),
            6 => GapOffset::GpNcsg2R14(offset),
            7 => GapOffset::GpNcsg3R14(offset),
            8 => GapOffset::GpNonUniform1R14(offset),
            9 => GapOffset::GpNonUniform2R14(offset),
            10 => GapOffset::GpNonUniform3R14(offset),
            11 => GapOffset::GpNonUniform4R14(offset),
            12 => GapOffset::Gp4R15(offset),
            13 => GapOffset::Gp5R15(offset),
            14 => GapOffset::Gp6R15(offset),
            15 => GapOffset::Gp7R15(offset),
            16 => GapOffset::Gp8R15(offset),
            17 => GapOffset::Gp9R15(offset),
            18 => GapOffset::Gp10R15(offset),
            19 => GapOffset::Gp11R15(offset),
            _ => return None,
        };
        Some(value)
    }

    pub fn offset(&self) -> Option<u16> {
        match self {
            GapOffset::Gp0(v)
            | GapOffset::Gp1(v)
            | GapOffset::Gp2R14(v)
            | GapOffset::Gp3R14(v)
            | GapOffset::GpNcsg0R14(v)
            | GapOffset::GpNcsg1R14(v)
            | GapOffset::GpNcsg2R14(v)
            | GapOffset::GpNcsg3R14(v)
            | GapOffset::GpNonUniform1R14(v)
            | GapOffset::GpNonUniform2R14(v)
            | GapOffset::GpNonUniform3R14(v)
            | GapOffset::GpNonUniform4R14(v)
            | GapOffset::Gp4R15(v)
            | GapOffset::Gp5R15(v)
            | GapOffset::Gp6R15(v)
            | GapOffset::Gp7R15(v)
            | GapOffset::Gp8R15(v)
            | GapOffset::Gp9R15(v)
            | GapOffset::Gp10R15(v)
            | GapOffset::Gp11R15(v) => Some(*v),
            GapOffset::Unknown => None,
        }
    }

    fn constraint(index: usize) -> Constraint {
        Constraint::new(0, MAX_OFFSET.get(index).copied().unwrap_or(0) as i64)
    }
}

impl Default for GapOffset {
    fn default() -> Self {
        GapOffset::Gp0(0)
    }
}

impl Choice for GapOffset {
    const NAMES: &'static [&'static str] = &[
        "gp0",
        "gp1",
        "gp2-r14",
        "gp3-r14",
        "gp-ncsg0-r14",
        "gp-ncsg1-r14",
        "gp-ncsg2-r14",
        "gp-ncsg3-r14",
        "gp-nonUniform1-r14",
        "gp-nonUniform2-r14",
        "gp-nonUniform3-r14",
        "gp-nonUniform4-r14",
        "gp4-r15",
        "gp5-r15",
        "gp6-r15",
        "gp7-r15",
        "gp8-r15",
        "gp9-r15",
        "gp10-r15",
        "gp11-r15",
    ];
    const ROOT_ALTERNATIVES: usize = 2;
    const EXTENSIBLE: bool = true;

    fn alternative(&self) -> Option<usize> {
        let index = match self {
            GapOffset::Gp0(_) => 0,
            GapOffset::Gp1(_) => 1,
            GapOffset::Gp2R14(_) => 2,
            GapOffset::Gp3R14(_) => 3,
            GapOffset::GpNcsg0R14(_) => 4,
            GapOffset::GpNcsg1R14(_) => 5,
            GapOffset::GpNcsg2R14(_) => 6,
            GapOffset::GpNcsg3R14(_) => 7,
            GapOffset::GpNonUniform1R14(_) => 8,
            GapOffset::GpNonUniform2R14(_) => 9,
            GapOffset::GpNonUniform3R14(_) => 10,
            GapOffset::GpNonUniform4R14(_) => 11,
            GapOffset::Gp4R15(_) => 12,
            GapOffset::Gp5R15(_) => 13,
            GapOffset::Gp6R15(_) => 14,
            GapOffset::Gp7R15(_) => 15,
            GapOffset::Gp8R15(_) => 16,
            GapOffset::Gp9R15(_) => 17,
            GapOffset::Gp10R15(_) => 18,
            GapOffset::Gp11R15(_) => 19,
            GapOffset::Unknown => return None,
        };
        Some(index)
    }

    fn unknown() -> Option<Self> {
        Some(GapOffset::Unknown)
    }
}

impl UperEncode for GapOffset {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encode_choice(encoder, self, |enc| {
            // encode_choice has already rejected Unknown
            let index = self.alternative().unwrap_or_default();
            let offset = self.offset().unwrap_or_default();
            enc.encode_constrained_whole_number(offset as i64, &Self::constraint(index))
        })
    }
}

impl UperDecode for GapOffset {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        decode_choice(decoder, |dec, index| {
            let offset = dec.decode_constrained_whole_number(&Self::constraint(index))? as u16;
            Self::from_parts(index, offset).ok_or_else(|| invalid_alternative::<Self>(index))
        })
    }
}

impl ToJson for GapOffset {
    fn to_json(&self) -> Value {
        choice_json(self, self.offset().map(Value::from).unwrap_or(Value::Null))
    }
}

/// setup branch of MeasGapConfig
/// ASN.1: SEQUENCE { gapOffset }
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasGapSetup {
    pub gap_offset: GapOffset,
}

impl UperEncode for MeasGapSetup {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        self.gap_offset.encode_uper(encoder)
    }
}

impl UperDecode for MeasGapSetup {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        Ok(Self {
            gap_offset: GapOffset::decode_uper(decoder)?,
        })
    }
}

impl ToJson for MeasGapSetup {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("gapOffset".into(), self.gap_offset.to_json());
        Value::Object(map)
    }
}

/// MeasGapConfig ::= CHOICE { release NULL, setup SEQUENCE { gapOffset } }
pub type MeasGapConfig = SetupRelease<MeasGapSetup>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;
    use crate::pdu::{check_round_trip, decode_pdu, encode_pdu};

    #[test]
    fn test_root_alternative_inline() {
        let config = MeasGapConfig::Setup(MeasGapSetup {
            gap_offset: GapOffset::Gp1(77),
        });
        // setup 1, ext 0, gp1 1, offset in 7 bits
        let bytes = check_round_trip(&config).unwrap();
        assert_eq!(&bytes[..], &[0b1011_0011, 0b0100_0000]);
    }

    #[test]
    fn test_extension_alternative() {
        let mut config = MeasGapConfig::default();
        config.set_setup().gap_offset = GapOffset::GpNonUniform4R14(10239);
        let bytes = check_round_trip(&config).unwrap();
        let decoded = decode_pdu::<MeasGapConfig>(&bytes).unwrap();
        assert_eq!(decoded.setup().map(|s| s.gap_offset.offset()), Some(Some(10239)));
        assert_eq!(GapOffset::GpNonUniform4R14(0).alternative(), Some(11));
        assert_eq!(GapOffset::Gp11R15(3).name(), "gp11-r15");
    }

    #[test]
    fn test_alternative_matches_from_parts() {
        for (index, max) in MAX_OFFSET.iter().enumerate() {
            let value = GapOffset::from_parts(index, *max).unwrap();
            assert_eq!(value.alternative(), Some(index));
            assert_eq!(value.offset(), Some(*max));
        }
        assert_eq!(GapOffset::from_parts(MAX_OFFSET.len(), 0), None);
        assert_eq!(GapOffset::Unknown.alternative(), None);
    }

    #[test]
    fn test_offset_above_pattern_range() {
        let config = MeasGapConfig::Setup(MeasGapSetup {
            gap_offset: GapOffset::Gp0(40),
        });
        assert!(encode_pdu(&config).unwrap_err().is_encode_failure());
    }

    #[test]
    fn test_future_alternative_is_unknown() {
        // setup, ext 1, extension index 25 - 2, two octets of payload
        let mut encoder = UperEncoder::new();
        encoder.write_bit(true);
        encoder.encode_choice_index(25, 2, true).unwrap();
        encoder.encode_octets_fragmented(&[0x12, 0x34]).unwrap();
        let bytes = encoder.into_bytes();

        let config = decode_pdu::<MeasGapConfig>(&bytes).unwrap();
        assert_eq!(config.setup().map(|s| s.gap_offset), Some(GapOffset::Unknown));
        assert!(encode_pdu(&config).unwrap_err().is_encode_failure());
    }

    #[test]
    fn test_release_and_dump() {
        let release = MeasGapConfig::Release;
        assert_eq!(&check_round_trip(&release).unwrap()[..], &[0x00]);

        let setup = MeasGapConfig::Setup(MeasGapSetup {
            gap_offset: GapOffset::Gp2R14(5),
        });
        assert_eq!(
            setup.to_json(),
            json!({ "setup": { "gapOffset": { "gp2-r14": 5 } } })
        );
    }
}
