//! Shared helpers for the ogs-uper integration tests

#![allow(dead_code)]

use ogs_uper::rrc::rach::*;

/// Route codec warnings to the test output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn from_hex(text: &str) -> Vec<u8> {
    hex::decode(text.replace(' ', "")).expect("valid hex")
}

/// RACH-ConfigCommon with only the Rel-8 root components
pub fn rel8_rach() -> RachConfigCommon {
    RachConfigCommon {
        preamble_info: PreambleInfo {
            number_of_ra_preambles: NumberOfRaPreambles::N64,
            preambles_group_a_config: None,
        },
        power_ramping_parameters: PowerRampingParameters {
            power_ramping_step: PowerRampingStep::Db2,
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
