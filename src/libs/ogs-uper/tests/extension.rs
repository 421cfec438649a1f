//! Forward and backward compatibility of extension groups, checked
//! against RACH-ConfigCommon and a Rel-8 reading of the same record

mod common;

use ogs_uper::rrc::meas_gap::{GapOffset, MeasGapConfig};
use ogs_uper::rrc::rach::*;
use ogs_uper::sequence::{ExtensionGroupsDecoder, Extensible};
use ogs_uper::{
    decode_pdu, decode_pdu_with_config, encode_pdu, CodecConfig, PerError, PerResult, UperDecode,
    UperDecoder, UperEncode, UperEncoder,
};

use common::rel8_rach;

/// RACH-ConfigCommon as known before any extension group existed
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rel8RachConfigCommon {
    preamble_info: PreambleInfo,
    power_ramping_parameters: PowerRampingParameters,
    ra_supervision_info: RaSupervisionInfo,
    max_harq_msg3_tx: u8,
}

impl Extensible for Rel8RachConfigCommon {
    const EXT_GROUPS: usize = 0;
}

impl UperDecode for Rel8RachConfigCommon {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let extended = decoder.read_bit()?;
        let value = Self {
            preamble_info: PreambleInfo::decode_uper(decoder)?,
            power_ramping_parameters: PowerRampingParameters::decode_uper(decoder)?,
            ra_supervision_info: RaSupervisionInfo::decode_uper(decoder)?,
            max_harq_msg3_tx: decoder
                .decode_constrained_whole_number(&RachConfigCommon::MAX_HARQ_MSG3_TX)?
                as u8,
        };
        if extended {
            let groups = ExtensionGroupsDecoder::decode::<Self>(decoder)?;
            groups.skip_unknown(decoder)?;
        }
        Ok(value)
    }
}

fn encode_root(rach: &RachConfigCommon, encoder: &mut UperEncoder) {
    rach.preamble_info.encode_uper(encoder).unwrap();
    rach.power_ramping_parameters.encode_uper(encoder).unwrap();
    rach.ra_supervision_info.encode_uper(encoder).unwrap();
    encoder
        .encode_constrained_whole_number(
            rach.max_harq_msg3_tx as i64,
            &RachConfigCommon::MAX_HARQ_MSG3_TX,
        )
        .unwrap();
}

fn skip_root(decoder: &mut UperDecoder<'_>) -> Rel8RachConfigCommon {
    Rel8RachConfigCommon {
        preamble_info: PreambleInfo::decode_uper(decoder).unwrap(),
        power_ramping_parameters: PowerRampingParameters::decode_uper(decoder).unwrap(),
        ra_supervision_info: RaSupervisionInfo::decode_uper(decoder).unwrap(),
        max_harq_msg3_tx: decoder
            .decode_constrained_whole_number(&RachConfigCommon::MAX_HARQ_MSG3_TX)
            .unwrap() as u8,
    }
}

#[test]
fn test_unextended_record_reads_the_same_everywhere() {
    let rach = rel8_rach();
    let bytes = encode_pdu(&rach).unwrap();
    assert_eq!(bytes[0] & 0x80, 0);

    let legacy = decode_pdu::<Rel8RachConfigCommon>(&bytes).unwrap();
    let current = decode_pdu::<RachConfigCommon>(&bytes).unwrap();
    assert_eq!(current, rach);
    assert_eq!(legacy.preamble_info, current.preamble_info);
    assert_eq!(legacy.max_harq_msg3_tx, current.max_harq_msg3_tx);
}

#[test]
fn test_first_of_two_groups_layout() {
    let mut rach = rel8_rach();
    rach.preamble_trans_max_ce_r13 = Some(PreambleTransMax::N20);
    let bytes = encode_pdu(&rach).unwrap();

    let mut decoder = UperDecoder::new(&bytes);
    assert!(decoder.read_bit().unwrap());
    skip_root(&mut decoder);
    // two groups declared, only the first present
    assert_eq!(decoder.decode_normally_small_non_negative().unwrap(), 1);
    assert_eq!(decoder.read_bits(2).unwrap(), 0b10);
    let group = decoder.read_open_type().unwrap();
    // presence 10, preambleTransMax n20 (index 7)
    assert_eq!(group, vec![0b1001_1100]);
    assert!(decoder.remaining_bits() < 8);
    decoder.check_zero_padding().unwrap();

    assert_eq!(decode_pdu::<RachConfigCommon>(&bytes).unwrap(), rach);
}

#[test]
fn test_legacy_reader_skips_every_group() {
    common::init_logging();
    let mut rach = rel8_rach();
    rach.preamble_trans_max_ce_r13 = Some(PreambleTransMax::N3);
    rach.edt_small_tbs_subset_r15 = true;
    let bytes = encode_pdu(&rach).unwrap();

    let legacy = decode_pdu::<Rel8RachConfigCommon>(&bytes).unwrap();
    assert_eq!(legacy.ra_supervision_info, rach.ra_supervision_info);
    assert_eq!(legacy.max_harq_msg3_tx, 4);
}

#[test]
fn test_newer_sender_with_three_groups() {
    common::init_logging();
    let rach = rel8_rach();
    let mut encoder = UperEncoder::new();
    encoder.write_bit(true);
    encode_root(&rach, &mut encoder);
    encoder.encode_normally_small_non_negative(2).unwrap();
    encoder.write_bits(0b011, 3);
    encoder
        .encode_open_type(|enc| {
            enc.write_bit(true);
            Ok(())
        })
        .unwrap();
    encoder
        .encode_open_type(|enc| {
            enc.write_bytes(&[0xCA, 0xFE]);
            Ok(())
        })
        .unwrap();
    let bytes = encoder.into_bytes();

    let decoded = decode_pdu::<RachConfigCommon>(&bytes).unwrap();
    assert!(decoded.edt_small_tbs_subset_r15);
    assert_eq!(decoded.preamble_trans_max_ce_r13, None);
    assert_eq!(decoded.power_ramping_parameters, rach.power_ramping_parameters);
}

#[test]
fn test_unknown_gap_offset_in_stream() {
    common::init_logging();
    // setup, ext 1, alternative 30, three octets of payload, then a trailer
    let mut encoder = UperEncoder::new();
    encoder.write_bit(true);
    encoder.encode_choice_index(30, 2, true).unwrap();
    encoder.encode_octets_fragmented(&[1, 2, 3]).unwrap();
    encoder.write_bits(0b1101, 4);
    let bytes = encoder.into_bytes();

    let mut decoder = UperDecoder::new(&bytes);
    let config = MeasGapConfig::decode_uper(&mut decoder).unwrap();
    assert_eq!(config.setup().map(|s| s.gap_offset), Some(GapOffset::Unknown));
    assert_eq!(decoder.read_bits(4).unwrap(), 0b1101);
}

#[test]
fn test_open_type_limit_applies_to_unknown_extensions() {
    let config = CodecConfig {
        max_open_type_bytes: 4,
        ..CodecConfig::default()
    };
    let payload = [0u8; 10];

    // third group, unknown to this reader
    let mut encoder = UperEncoder::new();
    encoder.write_bit(true);
    encode_root(&rel8_rach(), &mut encoder);
    encoder.encode_normally_small_non_negative(2).unwrap();
    encoder.write_bits(0b001, 3);
    encoder.encode_octets_fragmented(&payload).unwrap();
    let bytes = encoder.into_bytes();
    assert!(matches!(
        decode_pdu_with_config::<RachConfigCommon>(&bytes, &config),
        Err(PerError::InconsistentExtension(_))
    ));
    assert!(decode_pdu::<RachConfigCommon>(&bytes).is_ok());

    // gapOffset alternative unknown to this reader
    let mut encoder = UperEncoder::new();
    encoder.write_bit(true);
    encoder.encode_choice_index(30, 2, true).unwrap();
    encoder.encode_octets_fragmented(&payload).unwrap();
    let bytes = encoder.into_bytes();
    assert!(matches!(
        decode_pdu_with_config::<MeasGapConfig>(&bytes, &config),
        Err(PerError::InconsistentExtension(_))
    ));
    assert!(decode_pdu::<MeasGapConfig>(&bytes).is_ok());
}
