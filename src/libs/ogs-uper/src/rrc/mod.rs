//! LTE RRC information elements (3GPP TS 36.331)
//!
//! A handful of real IEs written against the codec core; each one is the
//! hand-written equivalent of what a schema compiler would emit.

pub mod mib;       // MasterInformationBlock (BCCH-BCH)
pub mod rach;      // RACH-ConfigCommon
pub mod meas_gap;  // MeasGapConfig

pub use meas_gap::{GapOffset, MeasGapConfig, MeasGapSetup};
pub use mib::{DlBandwidth, MasterInformationBlock, PartEarfcn, PhichConfig};
pub use rach::{RachCeLevelInfo, RachCeLevelInfoList, RachConfigCommon};
