//! RACH-ConfigCommon and RACH-CE-LevelInfo-r13 (3GPP TS 36.331 Section 6.3.2)

use crate::json::{Map, ToJson, Value};
use crate::list::BoundedList;
use crate::per::{Constraint, PerResult, UperDecode, UperDecoder, UperEncode, UperEncoder};
use crate::sequence::{ExtensionGroupsDecoder, ExtensionGroupsEncoder, Extensible, PresenceBitmap};
use crate::uper_enumerated;

/// maxCE-Level-r13
pub const MAX_CE_LEVEL_R13: usize = 4;

uper_enumerated! {
    pub enum NumberOfRaPreambles {
        N4 = "n4", N8 = "n8", N12 = "n12", N16 = "n16", N20 = "n20", N24 = "n24",
        N28 = "n28", N32 = "n32", N36 = "n36", N40 = "n40", N44 = "n44", N48 = "n48",
        N52 = "n52", N56 = "n56", N60 = "n60", N64 = "n64",
    }
}

impl NumberOfRaPreambles {
    pub fn to_number(self) -> u8 {
        4 * (self as u8 + 1)
    }
}

uper_enumerated! {
    pub enum SizeOfRaPreamblesGroupA {
        N4 = "n4", N8 = "n8", N12 = "n12", N16 = "n16", N20 = "n20", N24 = "n24",
        N28 = "n28", N32 = "n32", N36 = "n36", N40 = "n40", N44 = "n44", N48 = "n48",
        N52 = "n52", N56 = "n56", N60 = "n60",
    }
}

uper_enumerated! {
    pub enum MessageSizeGroupA { B56 = "b56", B144 = "b144", B208 = "b208", B256 = "b256" }
}

uper_enumerated! {
    pub enum MessagePowerOffsetGroupB {
        MinusInfinity = "minusinfinity", Db0 = "dB0", Db5 = "dB5", Db8 = "dB8",
        Db10 = "dB10", Db12 = "dB12", Db15 = "dB15", Db18 = "dB18",
    }
}

uper_enumerated! {
    pub enum PowerRampingStep { Db0 = "dB0", Db2 = "dB2", Db4 = "dB4", Db6 = "dB6" }
}

uper_enumerated! {
    pub enum PreambleInitialReceivedTargetPower {
        DbmMinus120 = "dBm-120", DbmMinus118 = "dBm-118", DbmMinus116 = "dBm-116",
        DbmMinus114 = "dBm-114", DbmMinus112 = "dBm-112", DbmMinus110 = "dBm-110",
        DbmMinus108 = "dBm-108", DbmMinus106 = "dBm-106", DbmMinus104 = "dBm-104",
        DbmMinus102 = "dBm-102", DbmMinus100 = "dBm-100", DbmMinus98 = "dBm-98",
        DbmMinus96 = "dBm-96", DbmMinus94 = "dBm-94", DbmMinus92 = "dBm-92",
        DbmMinus90 = "dBm-90",
    }
}

impl PreambleInitialReceivedTargetPower {
    /// Target power in dBm
    pub fn to_number(self) -> i8 {
        -120 + 2 * self as i8
    }
}

uper_enumerated! {
    /// PreambleTransMax
    pub enum PreambleTransMax {
        N3 = "n3", N4 = "n4", N5 = "n5", N6 = "n6", N7 = "n7", N8 = "n8",
        N10 = "n10", N20 = "n20", N50 = "n50", N100 = "n100", N200 = "n200",
    }
}

uper_enumerated! {
    pub enum RaResponseWindowSize {
        Sf2 = "sf2", Sf3 = "sf3", Sf4 = "sf4", Sf5 = "sf5",
        Sf6 = "sf6", Sf7 = "sf7", Sf8 = "sf8", Sf10 = "sf10",
    }
}

uper_enumerated! {
    pub enum MacContentionResolutionTimer {
        Sf8 = "sf8", Sf16 = "sf16", Sf24 = "sf24", Sf32 = "sf32",
        Sf40 = "sf40", Sf48 = "sf48", Sf56 = "sf56", Sf64 = "sf64",
    }
}

uper_enumerated! {
    pub enum RaResponseWindowSizeR13 {
        Sf20 = "sf20", Sf50 = "sf50", Sf80 = "sf80", Sf120 = "sf120",
        Sf180 = "sf180", Sf240 = "sf240", Sf320 = "sf320", Sf400 = "sf400",
    }
}

uper_enumerated! {
    pub enum MacContentionResolutionTimerR13 {
        Sf80 = "sf80", Sf100 = "sf100", Sf120 = "sf120", Sf160 = "sf160",
        Sf200 = "sf200", Sf240 = "sf240", Sf480 = "sf480", Sf960 = "sf960",
    }
}

uper_enumerated! {
    pub enum RarHoppingConfigR13 { On = "on", Off = "off" }
}

uper_enumerated! {
    pub enum EdtTbsR15 {
        B328 = "b328", B408 = "b408", B504 = "b504", B600 = "b600",
        B712 = "b712", B808 = "b808", B936 = "b936", B1000or456 = "b1000or456",
    }
}

uper_enumerated! {
    pub enum MacContentionResolutionTimerR15 {
        Sf240 = "sf240", Sf480 = "sf480", Sf960 = "sf960", Sf1920 = "sf1920",
        Sf3840 = "sf3840", Sf5760 = "sf5760", Sf7680 = "sf7680", Sf10240 = "sf10240",
    }
}

/// PreamblesGroupAConfig
/// ASN.1: SEQUENCE { sizeOfRA-PreamblesGroupA, messageSizeGroupA,
///     messagePowerOffsetGroupB, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreamblesGroupAConfig {
    pub size_of_ra_preambles_group_a: SizeOfRaPreamblesGroupA,
    pub message_size_group_a: MessageSizeGroupA,
    pub message_power_offset_group_b: MessagePowerOffsetGroupB,
}

impl Extensible for PreamblesGroupAConfig {
    const EXT_GROUPS: usize = 0;
}

impl UperEncode for PreamblesGroupAConfig {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        // No additions known, the extension bit is always clear
        encoder.write_bit(false);
        self.size_of_ra_preambles_group_a.encode_uper(encoder)?;
        self.message_size_group_a.encode_uper(encoder)?;
        self.message_power_offset_group_b.encode_uper(encoder)
    }
}

impl UperDecode for PreamblesGroupAConfig {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let extended = decoder.read_bit()?;
        let value = Self {
            size_of_ra_preambles_group_a: SizeOfRaPreamblesGroupA::decode_uper(decoder)?,
            message_size_group_a: MessageSizeGroupA::decode_uper(decoder)?,
            message_power_offset_group_b: MessagePowerOffsetGroupB::decode_uper(decoder)?,
        };
        if extended {
            ExtensionGroupsDecoder::decode::<Self>(decoder)?.skip_unknown(decoder)?;
        }
        Ok(value)
    }
}

impl ToJson for PreamblesGroupAConfig {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("sizeOfRA-PreamblesGroupA".into(), self.size_of_ra_preambles_group_a.to_json());
        map.insert("messageSizeGroupA".into(), self.message_size_group_a.to_json());
        map.insert("messagePowerOffsetGroupB".into(), self.message_power_offset_group_b.to_json());
        Value::Object(map)
    }
}

/// preambleInfo
/// ASN.1: SEQUENCE { numberOfRA-Preambles, preamblesGroupAConfig OPTIONAL }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreambleInfo {
    pub number_of_ra_preambles: NumberOfRaPreambles,
    pub preambles_group_a_config: Option<PreamblesGroupAConfig>,
}

impl UperEncode for PreambleInfo {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        PresenceBitmap::new([self.preambles_group_a_config.is_some()]).encode(encoder);
        self.number_of_ra_preambles.encode_uper(encoder)?;
        if let Some(config) = &self.preambles_group_a_config {
            config.encode_uper(encoder)?;
        }
        Ok(())
    }
}

impl UperDecode for PreambleInfo {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let presence = PresenceBitmap::<1>::decode(decoder)?;
        let number_of_ra_preambles = NumberOfRaPreambles::decode_uper(decoder)?;
        let preambles_group_a_config = if presence.get(0) {
            Some(PreamblesGroupAConfig::decode_uper(decoder)?)
        } else {
            None
        };
        Ok(Self {
            number_of_ra_preambles,
            preambles_group_a_config,
        })
    }
}

impl ToJson for PreambleInfo {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("numberOfRA-Preambles".into(), self.number_of_ra_preambles.to_json());
        if let Some(config) = &self.preambles_group_a_config {
            map.insert("preamblesGroupAConfig".into(), config.to_json());
        }
        Value::Object(map)
    }
}

/// PowerRampingParameters
/// ASN.1: SEQUENCE { powerRampingStep, preambleInitialReceivedTargetPower }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerRampingParameters {
    pub power_ramping_step: PowerRampingStep,
    pub preamble_initial_received_target_power: PreambleInitialReceivedTargetPower,
}

impl UperEncode for PowerRampingParameters {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        self.power_ramping_step.encode_uper(encoder)?;
        self.preamble_initial_received_target_power.encode_uper(encoder)
    }
}

impl UperDecode for PowerRampingParameters {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        Ok(Self {
            power_ramping_step: PowerRampingStep::decode_uper(decoder)?,
            preamble_initial_received_target_power: PreambleInitialReceivedTargetPower::decode_uper(decoder)?,
        })
    }
}

impl ToJson for PowerRampingParameters {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("powerRampingStep".into(), self.power_ramping_step.to_json());
        map.insert(
            "preambleInitialReceivedTargetPower".into(),
            self.preamble_initial_received_target_power.to_json(),
        );
        Value::Object(map)
    }
}

/// ra-SupervisionInfo
/// ASN.1: SEQUENCE { preambleTransMax, ra-ResponseWindowSize, mac-ContentionResolutionTimer }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaSupervisionInfo {
    pub preamble_trans_max: PreambleTransMax,
    pub ra_response_window_size: RaResponseWindowSize,
    pub mac_contention_resolution_timer: MacContentionResolutionTimer,
}

impl UperEncode for RaSupervisionInfo {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        self.preamble_trans_max.encode_uper(encoder)?;
        self.ra_response_window_size.encode_uper(encoder)?;
        self.mac_contention_resolution_timer.encode_uper(encoder)
    }
}

impl UperDecode for RaSupervisionInfo {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        Ok(Self {
            preamble_trans_max: PreambleTransMax::decode_uper(decoder)?,
            ra_response_window_size: RaResponseWindowSize::decode_uper(decoder)?,
            mac_contention_resolution_timer: MacContentionResolutionTimer::decode_uper(decoder)?,
        })
    }
}

impl ToJson for RaSupervisionInfo {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("preambleTransMax".into(), self.preamble_trans_max.to_json());
        map.insert("ra-ResponseWindowSize".into(), self.ra_response_window_size.to_json());
        map.insert(
            "mac-ContentionResolutionTimer".into(),
            self.mac_contention_resolution_timer.to_json(),
        );
        Value::Object(map)
    }
}

/// edt-Parameters-r15
/// ASN.1: SEQUENCE { edt-LastPreamble-r15 INTEGER (0..63), edt-SmallTBS-Enabled-r15 BOOLEAN,
///     edt-TBS-r15, mac-ContentionResolutionTimer-r15 OPTIONAL }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdtParametersR15 {
    pub edt_last_preamble_r15: u8,
    pub edt_small_tbs_enabled_r15: bool,
    pub edt_tbs_r15: EdtTbsR15,
    pub mac_contention_resolution_timer_r15: Option<MacContentionResolutionTimerR15>,
}

impl UperEncode for EdtParametersR15 {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        PresenceBitmap::new([self.mac_contention_resolution_timer_r15.is_some()]).encode(encoder);
        encoder.encode_constrained_whole_number(self.edt_last_preamble_r15 as i64, &PREAMBLE_INDEX)?;
        self.edt_small_tbs_enabled_r15.encode_uper(encoder)?;
        self.edt_tbs_r15.encode_uper(encoder)?;
        if let Some(timer) = self.mac_contention_resolution_timer_r15 {
            timer.encode_uper(encoder)?;
        }
        Ok(())
    }
}

impl UperDecode for EdtParametersR15 {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let presence = PresenceBitmap::<1>::decode(decoder)?;
        Ok(Self {
            edt_last_preamble_r15: decoder.decode_constrained_whole_number(&PREAMBLE_INDEX)? as u8,
            edt_small_tbs_enabled_r15: bool::decode_uper(decoder)?,
            edt_tbs_r15: EdtTbsR15::decode_uper(decoder)?,
            mac_contention_resolution_timer_r15: if presence.get(0) {
                Some(MacContentionResolutionTimerR15::decode_uper(decoder)?)
            } else {
                None
            },
        })
    }
}

impl ToJson for EdtParametersR15 {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("edt-LastPreamble-r15".into(), self.edt_last_preamble_r15.into());
        map.insert("edt-SmallTBS-Enabled-r15".into(), self.edt_small_tbs_enabled_r15.into());
        map.insert("edt-TBS-r15".into(), self.edt_tbs_r15.to_json());
        if let Some(timer) = self.mac_contention_resolution_timer_r15 {
            map.insert("mac-ContentionResolutionTimer-r15".into(), timer.to_json());
        }
        Value::Object(map)
    }
}

/// INTEGER (0..63) preamble indices
const PREAMBLE_INDEX: Constraint = Constraint::new(0, 63);

/// RACH-CE-LevelInfo-r13
/// ASN.1: SEQUENCE { preambleMappingInfo-r13 SEQUENCE { firstPreamble-r13, lastPreamble-r13 },
///     ra-ResponseWindowSize-r13, mac-ContentionResolutionTimer-r13, rar-HoppingConfig-r13, ...,
///     [[ edt-Parameters-r15 OPTIONAL ]] }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RachCeLevelInfo {
    pub first_preamble_r13: u8,
    pub last_preamble_r13: u8,
    pub ra_response_window_size_r13: RaResponseWindowSizeR13,
    pub mac_contention_resolution_timer_r13: MacContentionResolutionTimerR13,
    pub rar_hopping_config_r13: RarHoppingConfigR13,
    pub edt_parameters_r15: Option<EdtParametersR15>,
}

impl Extensible for RachCeLevelInfo {
    const EXT_GROUPS: usize = 1;
}

impl UperEncode for RachCeLevelInfo {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        let mut groups = ExtensionGroupsEncoder::for_record::<Self>();
        groups.set(0, self.edt_parameters_r15.is_some())?;

        encoder.write_bit(groups.any());
        encoder.encode_constrained_whole_number(self.first_preamble_r13 as i64, &PREAMBLE_INDEX)?;
        encoder.encode_constrained_whole_number(self.last_preamble_r13 as i64, &PREAMBLE_INDEX)?;
        self.ra_response_window_size_r13.encode_uper(encoder)?;
        self.mac_contention_resolution_timer_r13.encode_uper(encoder)?;
        self.rar_hopping_config_r13.encode_uper(encoder)?;

        if groups.any() {
            groups.encode(encoder)?;
            groups.encode_group(encoder, 0, |enc| {
                PresenceBitmap::new([self.edt_parameters_r15.is_some()]).encode(enc);
                if let Some(edt) = &self.edt_parameters_r15 {
                    edt.encode_uper(enc)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }
}

impl UperDecode for RachCeLevelInfo {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let extended = decoder.read_bit()?;
        let mut value = Self {
            first_preamble_r13: decoder.decode_constrained_whole_number(&PREAMBLE_INDEX)? as u8,
            last_preamble_r13: decoder.decode_constrained_whole_number(&PREAMBLE_INDEX)? as u8,
            ra_response_window_size_r13: RaResponseWindowSizeR13::decode_uper(decoder)?,
            mac_contention_resolution_timer_r13: MacContentionResolutionTimerR13::decode_uper(decoder)?,
            rar_hopping_config_r13: RarHoppingConfigR13::decode_uper(decoder)?,
            edt_parameters_r15: None,
        };

        if extended {
            let groups = ExtensionGroupsDecoder::decode::<Self>(decoder)?;
            value.edt_parameters_r15 = groups
                .decode_group(decoder, 0, |dec| {
                    let presence = PresenceBitmap::<1>::decode(dec)?;
                    presence
                        .get(0)
                        .then(|| EdtParametersR15::decode_uper(dec))
                        .transpose()
                })?
                .flatten();
            groups.skip_unknown(decoder)?;
        }
        Ok(value)
    }
}

impl ToJson for RachCeLevelInfo {
    fn to_json(&self) -> Value {
        let mut mapping = Map::new();
        mapping.insert("firstPreamble-r13".into(), self.first_preamble_r13.into());
        mapping.insert("lastPreamble-r13".into(), self.last_preamble_r13.into());

        let mut map = Map::new();
        map.insert("preambleMappingInfo-r13".into(), Value::Object(mapping));
        map.insert("ra-ResponseWindowSize-r13".into(), self.ra_response_window_size_r13.to_json());
        map.insert(
            "mac-ContentionResolutionTimer-r13".into(),
            self.mac_contention_resolution_timer_r13.to_json(),
        );
        map.insert("rar-HoppingConfig-r13".into(), self.rar_hopping_config_r13.to_json());
        if let Some(edt) = &self.edt_parameters_r15 {
            map.insert("edt-Parameters-r15".into(), edt.to_json());
        }
        Value::Object(map)
    }
}

/// RACH-CE-LevelInfoList-r13 ::= SEQUENCE (SIZE (1..maxCE-Level-r13)) OF RACH-CE-LevelInfo-r13
pub type RachCeLevelInfoList = BoundedList<RachCeLevelInfo, 1, MAX_CE_LEVEL_R13>;

/// RACH-ConfigCommon
/// ASN.1: RACH-ConfigCommon ::= SEQUENCE { preambleInfo, powerRampingParameters,
///     ra-SupervisionInfo, maxHARQ-Msg3Tx INTEGER (1..8), ...,
///     [[ preambleTransMax-CE-r13 OPTIONAL, rach-CE-LevelInfoList-r13 OPTIONAL ]],
///     [[ edt-SmallTBS-Subset-r15 ENUMERATED {true} OPTIONAL ]] }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RachConfigCommon {
    pub preamble_info: PreambleInfo,
    pub power_ramping_parameters: PowerRampingParameters,
    pub ra_supervision_info: RaSupervisionInfo,
    pub max_harq_msg3_tx: u8,
    pub preamble_trans_max_ce_r13: Option<PreambleTransMax>,
    pub rach_ce_level_info_list_r13: Option<RachCeLevelInfoList>,
    /// edt-SmallTBS-Subset-r15 `true` when present
    pub edt_small_tbs_subset_r15: bool,
}

impl RachConfigCommon {
    pub const MAX_HARQ_MSG3_TX: Constraint = Constraint::new(1, 8);
}

impl Extensible for RachConfigCommon {
    const EXT_GROUPS: usize = 2;
}

impl UperEncode for RachConfigCommon {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        let mut groups = ExtensionGroupsEncoder::for_record::<Self>();
        groups.set(
            0,
            self.preamble_trans_max_ce_r13.is_some() || self.rach_ce_level_info_list_r13.is_some(),
        )?;
        groups.set(1, self.edt_small_tbs_subset_r15)?;

        encoder.write_bit(groups.any());
        self.preamble_info.encode_uper(encoder)?;
        self.power_ramping_parameters.encode_uper(encoder)?;
        self.ra_supervision_info.encode_uper(encoder)?;
        encoder.encode_constrained_whole_number(self.max_harq_msg3_tx as i64, &Self::MAX_HARQ_MSG3_TX)?;

        if groups.any() {
            groups.encode(encoder)?;
            groups.encode_group(encoder, 0, |enc| {
                PresenceBitmap::new([
                    self.preamble_trans_max_ce_r13.is_some(),
                    self.rach_ce_level_info_list_r13.is_some(),
                ])
                .encode(enc);
                if let Some(trans_max) = self.preamble_trans_max_ce_r13 {
                    trans_max.encode_uper(enc)?;
                }
                if let Some(list) = &self.rach_ce_level_info_list_r13 {
                    list.encode_uper(enc)?;
                }
                Ok(())
            })?;
            groups.encode_group(encoder, 1, |enc| {
                // ENUMERATED {true} has a single value and no bits
                PresenceBitmap::new([self.edt_small_tbs_subset_r15]).encode(enc);
                Ok(())
            })?;
        }
        Ok(())
    }
}

impl UperDecode for RachConfigCommon {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        let extended = decoder.read_bit()?;
        let mut value = Self {
            preamble_info: PreambleInfo::decode_uper(decoder)?,
            power_ramping_parameters: PowerRampingParameters::decode_uper(decoder)?,
            ra_supervision_info: RaSupervisionInfo::decode_uper(decoder)?,
            max_harq_msg3_tx: decoder.decode_constrained_whole_number(&Self::MAX_HARQ_MSG3_TX)? as u8,
            preamble_trans_max_ce_r13: None,
            rach_ce_level_info_list_r13: None,
            edt_small_tbs_subset_r15: false,
        };

        if extended {
            let groups = ExtensionGroupsDecoder::decode::<Self>(decoder)?;
            if let Some((trans_max, list)) = groups.decode_group(decoder, 0, |dec| {
                let presence = PresenceBitmap::<2>::decode(dec)?;
                let trans_max = presence
                    .get(0)
                    .then(|| PreambleTransMax::decode_uper(dec))
                    .transpose()?;
                let list = presence
                    .get(1)
                    .then(|| RachCeLevelInfoList::decode_uper(dec))
                    .transpose()?;
                Ok((trans_max, list))
            })? {
                value.preamble_trans_max_ce_r13 = trans_max;
                value.rach_ce_level_info_list_r13 = list;
            }
            value.edt_small_tbs_subset_r15 = groups
                .decode_group(decoder, 1, |dec| Ok(PresenceBitmap::<1>::decode(dec)?.get(0)))?
                .unwrap_or(false);
            groups.skip_unknown(decoder)?;
        }
        Ok(value)
    }
}

impl ToJson for RachConfigCommon {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("preambleInfo".into(), self.preamble_info.to_json());
        map.insert("powerRampingParameters".into(), self.power_ramping_parameters.to_json());
        map.insert("ra-SupervisionInfo".into(), self.ra_supervision_info.to_json());
        map.insert("maxHARQ-Msg3Tx".into(), self.max_harq_msg3_tx.into());
        if let Some(trans_max) = self.preamble_trans_max_ce_r13 {
            map.insert("preambleTransMax-CE-r13".into(), trans_max.to_json());
        }
        if let Some(list) = &self.rach_ce_level_info_list_r13 {
            map.insert("rach-CE-LevelInfoList-r13".into(), list.to_json());
        }
        if self.edt_small_tbs_subset_r15 {
            map.insert("edt-SmallTBS-Subset-r15".into(), Value::from("true"));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::{check_round_trip, decode_pdu};

    fn sample_rach() -> RachConfigCommon {
        RachConfigCommon {
            preamble_info: PreambleInfo {
                number_of_ra_preambles: NumberOfRaPreambles::N52,
                preambles_group_a_config: None,
            },
            power_ramping_parameters: PowerRampingParameters {
                power_ramping_step: PowerRampingStep::Db6,
                preamble_initial_received_target_power: PreambleInitialReceivedTargetPower::DbmMinus104,
            },
            ra_supervision_info: RaSupervisionInfo {
                preamble_trans_max: PreambleTransMax::N10,
                ra_response_window_size: RaResponseWindowSize::Sf10,
                mac_contention_resolution_timer: MacContentionResolutionTimer::Sf64,
            },
            max_harq_msg3_tx: 4,
            preamble_trans_max_ce_r13: None,
            rach_ce_level_info_list_r13: None,
            edt_small_tbs_subset_r15: false,
        }
    }

    fn ce_level(first: u8, last: u8) -> RachCeLevelInfo {
        RachCeLevelInfo {
            first_preamble_r13: first,
            last_preamble_r13: last,
            ra_response_window_size_r13: RaResponseWindowSizeR13::Sf80,
            mac_contention_resolution_timer_r13: MacContentionResolutionTimerR13::Sf200,
            rar_hopping_config_r13: RarHoppingConfigR13::Off,
            edt_parameters_r15: None,
        }
    }

    #[test]
    fn test_rach_without_extensions() {
        let rach = sample_rach();
        let bytes = check_round_trip(&rach).unwrap();
        // 1 + (1 + 4) + (2 + 4) + (4 + 3 + 3) + 3 bits
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes[0] & 0x80, 0);
    }

    #[test]
    fn test_rach_with_group_a_config() {
        let mut rach = sample_rach();
        rach.preamble_info.preambles_group_a_config = Some(PreamblesGroupAConfig {
            size_of_ra_preambles_group_a: SizeOfRaPreamblesGroupA::N28,
            message_size_group_a: MessageSizeGroupA::B144,
            message_power_offset_group_b: MessagePowerOffsetGroupB::MinusInfinity,
        });
        check_round_trip(&rach).unwrap();
    }

    #[test]
    fn test_rach_with_all_extensions() {
        let mut rach = sample_rach();
        let mut edt_level = ce_level(10, 20);
        edt_level.edt_parameters_r15 = Some(EdtParametersR15 {
            edt_last_preamble_r15: 18,
            edt_small_tbs_enabled_r15: true,
            edt_tbs_r15: EdtTbsR15::B1000or456,
            mac_contention_resolution_timer_r15: Some(MacContentionResolutionTimerR15::Sf1920),
        });
        rach.preamble_trans_max_ce_r13 = Some(PreambleTransMax::N200);
        rach.rach_ce_level_info_list_r13 =
            Some(RachCeLevelInfoList::new(vec![ce_level(0, 9), edt_level]).unwrap());
        rach.edt_small_tbs_subset_r15 = true;

        let bytes = check_round_trip(&rach).unwrap();
        assert_eq!(bytes[0] & 0x80, 0x80);
        let decoded = decode_pdu::<RachConfigCommon>(&bytes).unwrap();
        let list = decoded.rach_ce_level_info_list_r13.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].edt_parameters_r15.unwrap().edt_tbs_r15, EdtTbsR15::B1000or456);
    }

    #[test]
    fn test_ce_level_list_bounds() {
        assert!(RachCeLevelInfoList::new(vec![]).is_err());
        assert!(RachCeLevelInfoList::new(vec![ce_level(0, 1); 5]).is_err());
    }

    #[test]
    fn test_enum_numbers() {
        assert_eq!(NumberOfRaPreambles::N64.to_number(), 64);
        assert_eq!(NumberOfRaPreambles::N4.to_number(), 4);
        assert_eq!(PreambleInitialReceivedTargetPower::DbmMinus90.to_number(), -90);
        assert_eq!(PreambleInitialReceivedTargetPower::DbmMinus104.to_string(), "dBm-104");
    }

    #[test]
    fn test_rach_dump() {
        let mut rach = sample_rach();
        rach.edt_small_tbs_subset_r15 = true;
        let dump = rach.to_json();
        assert_eq!(dump["maxHARQ-Msg3Tx"], 4);
        assert_eq!(dump["ra-SupervisionInfo"]["preambleTransMax"], "n10");
        assert_eq!(dump["edt-SmallTBS-Subset-r15"], "true");
        assert!(dump.get("rach-CE-LevelInfoList-r13").is_none());
        assert!(rach.to_debug_string().starts_with("{\n  \"preambleInfo\""));
    }
}
