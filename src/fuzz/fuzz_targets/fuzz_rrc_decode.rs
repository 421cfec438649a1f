//! RRC UPER Decoder Fuzzer
//!
//! Feeds arbitrary bytes to the UPER decoder of every RRC type in
//! ogs-uper. Decoding may fail but must never panic, and whatever decodes
//! must encode again.
//!
//! Run with: cargo +nightly fuzz run fuzz_rrc_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use ogs_uper::rrc::{MasterInformationBlock, MeasGapConfig, RachConfigCommon};
use ogs_uper::{decode_pdu, encode_pdu, ToJson, UperDecode, UperEncode};

fuzz_target!(|data: &[u8]| {
    check::<MasterInformationBlock>(data);
    check::<RachConfigCommon>(data);
    check::<MeasGapConfig>(data);
});

fn check<T: UperDecode + UperEncode + ToJson + PartialEq + std::fmt::Debug>(data: &[u8]) {
    let Ok(message) = decode_pdu::<T>(data) else {
        return;
    };
    let _ = message.to_debug_string();

    // Unknown extension values decode but have no encoding
    let Ok(encoded) = encode_pdu(&message) else {
        return;
    };
    let again = decode_pdu::<T>(&encoded).expect("re-encoded message must decode");
    assert_eq!(again, message);
}
