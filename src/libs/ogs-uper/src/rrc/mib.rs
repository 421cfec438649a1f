//! MasterInformationBlock (3GPP TS 36.331 Section 6.2.2)
//!
//! Carried alone in a BCCH-BCH-Message on the PBCH: 24 bits, no extension
//! marker, so the whole message is exactly three octets.

use crate::bit_string::FixedBitString;
use crate::choice::{choice_json, decode_choice, encode_choice, invalid_alternative, Choice};
use crate::json::{json, ToJson, Value};
use crate::per::{Constraint, PerResult, UperDecode, UperDecoder, UperEncode, UperEncoder};
use crate::uper_enumerated;

uper_enumerated! {
    /// dl-Bandwidth - downlink transmission bandwidth in resource blocks
    pub enum DlBandwidth {
        N6 = "n6", N15 = "n15", N25 = "n25", N50 = "n50", N75 = "n75", N100 = "n100",
    }
}

impl DlBandwidth {
    /// Number of resource blocks
    pub fn to_number(self) -> u8 {
        match self {
            DlBandwidth::N6 => 6,
            DlBandwidth::N15 => 15,
            DlBandwidth::N25 => 25,
            DlBandwidth::N50 => 50,
            DlBandwidth::N75 => 75,
            DlBandwidth::N100 => 100,
        }
    }
}

uper_enumerated! {
    pub enum PhichDuration { Normal = "normal", Extended = "extended" }
}

uper_enumerated! {
    pub enum PhichResource { OneSixth = "oneSixth", Half = "half", One = "one", Two = "two" }
}

/// PHICH-Config
/// ASN.1: PHICH-Config ::= SEQUENCE { phich-Duration, phich-Resource }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhichConfig {
    pub phich_duration: PhichDuration,
    pub phich_resource: PhichResource,
}

impl Default for PhichConfig {
    fn default() -> Self {
        Self {
            phich_duration: PhichDuration::Normal,
            phich_resource: PhichResource::OneSixth,
        }
    }
}

impl UperEncode for PhichConfig {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        self.phich_duration.encode_uper(encoder)?;
        self.phich_resource.encode_uper(encoder)
    }
}

impl UperDecode for PhichConfig {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        Ok(Self {
            phich_duration: PhichDuration::decode_uper(decoder)?,
            phich_resource: PhichResource::decode_uper(decoder)?,
        })
    }
}

impl ToJson for PhichConfig {
    fn to_json(&self) -> Value {
        json!({
            "phich-Duration": self.phich_duration.to_json(),
            "phich-Resource": self.phich_resource.to_json(),
        })
    }
}

/// partEARFCN-17 - two LSBs of the E-UTRA carrier frequency, or spare
/// ASN.1: CHOICE { spare BIT STRING (SIZE (2)), earfcn-LSB BIT STRING (SIZE (2)) }
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartEarfcn {
    Spare(FixedBitString<2>),
    EarfcnLsb(FixedBitString<2>),
}

impl Default for PartEarfcn {
    fn default() -> Self {
        PartEarfcn::Spare(FixedBitString::new())
    }
}

impl Choice for PartEarfcn {
    const NAMES: &'static [&'static str] = &["spare", "earfcn-LSB"];
    const ROOT_ALTERNATIVES: usize = 2;
    const EXTENSIBLE: bool = false;

    fn alternative(&self) -> Option<usize> {
        match self {
            PartEarfcn::Spare(_) => Some(0),
            PartEarfcn::EarfcnLsb(_) => Some(1),
        }
    }
}

impl UperEncode for PartEarfcn {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encode_choice(encoder, self, |enc| match self {
            PartEarfcn::Spare(bits) | PartEarfcn::EarfcnLsb(bits) => bits.encode_uper(enc),
        })
    }
}

impl UperDecode for PartEarfcn {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        decode_choice(decoder, |dec, index| match index {
            0 => FixedBitString::decode_uper(dec).map(PartEarfcn::Spare),
            1 => FixedBitString::decode_uper(dec).map(PartEarfcn::EarfcnLsb),
            other => Err(invalid_alternative::<Self>(other)),
        })
    }
}

impl ToJson for PartEarfcn {
    fn to_json(&self) -> Value {
        let payload = match self {
            PartEarfcn::Spare(bits) | PartEarfcn::EarfcnLsb(bits) => bits.to_json(),
        };
        choice_json(self, payload)
    }
}

/// MasterInformationBlock
/// ASN.1: MasterInformationBlock ::= SEQUENCE {
///     dl-Bandwidth, phich-Config, systemFrameNumber BIT STRING (SIZE (8)),
///     schedulingInfoSIB1-BR-r13 INTEGER (0..31), systemInfoUnchanged-BR-r15 BOOLEAN,
///     partEARFCN-17, spare BIT STRING (SIZE (1)) }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterInformationBlock {
    pub dl_bandwidth: DlBandwidth,
    pub phich_config: PhichConfig,
    /// Eight most significant bits of the SFN
    pub system_frame_number: FixedBitString<8>,
    pub scheduling_info_sib1_br_r13: u8,
    pub system_info_unchanged_br_r15: bool,
    pub part_earfcn_17: PartEarfcn,
    pub spare: FixedBitString<1>,
}

impl MasterInformationBlock {
    pub const SCHEDULING_INFO_SIB1_BR: Constraint = Constraint::new(0, 31);
}

impl Default for MasterInformationBlock {
    fn default() -> Self {
        Self {
            dl_bandwidth: DlBandwidth::N6,
            phich_config: PhichConfig::default(),
            system_frame_number: FixedBitString::new(),
            scheduling_info_sib1_br_r13: 0,
            system_info_unchanged_br_r15: false,
            part_earfcn_17: PartEarfcn::default(),
            spare: FixedBitString::new(),
        }
    }
}

impl UperEncode for MasterInformationBlock {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        self.dl_bandwidth.encode_uper(encoder)?;
        self.phich_config.encode_uper(encoder)?;
        self.system_frame_number.encode_uper(encoder)?;
        encoder.encode_constrained_whole_number(
            self.scheduling_info_sib1_br_r13 as i64,
            &Self::SCHEDULING_INFO_SIB1_BR,
        )?;
        self.system_info_unchanged_br_r15.encode_uper(encoder)?;
        self.part_earfcn_17.encode_uper(encoder)?;
        self.spare.encode_uper(encoder)
    }
}

impl UperDecode for MasterInformationBlock {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        Ok(Self {
            dl_bandwidth: DlBandwidth::decode_uper(decoder)?,
            phich_config: PhichConfig::decode_uper(decoder)?,
            system_frame_number: FixedBitString::decode_uper(decoder)?,
            scheduling_info_sib1_br_r13: decoder
                .decode_constrained_whole_number(&Self::SCHEDULING_INFO_SIB1_BR)?
                as u8,
            system_info_unchanged_br_r15: bool::decode_uper(decoder)?,
            part_earfcn_17: PartEarfcn::decode_uper(decoder)?,
            spare: FixedBitString::decode_uper(decoder)?,
        })
    }
}

impl ToJson for MasterInformationBlock {
    fn to_json(&self) -> Value {
        json!({
            "dl-Bandwidth": self.dl_bandwidth.to_json(),
            "phich-Config": self.phich_config.to_json(),
            "systemFrameNumber": self.system_frame_number.to_json(),
            "schedulingInfoSIB1-BR-r13": self.scheduling_info_sib1_br_r13,
            "systemInfoUnchanged-BR-r15": self.system_info_unchanged_br_r15,
            "partEARFCN-17": self.part_earfcn_17.to_json(),
            "spare": self.spare.to_json(),
        })
    }
}
