//! NextGCore Unaligned PER Codec Library
//!
//! This crate provides ASN.1 UPER (ITU-T X.691, unaligned variant)
//! encoding/decoding for RRC signalling.
//!
//! # Modules
//!
//! - `per` - bit cursor, constrained integers, lengths and open types
//! - `enumerated` - ENUMERATED types and the `uper_enumerated!` macro
//! - `sequence` - presence bitmaps and extension groups
//! - `choice` - CHOICE discriminants and `SetupRelease`
//! - `list` - SEQUENCE OF with size bounds
//! - `bit_string` / `octet_string` - string types
//! - `pdu` - complete message encode/decode
//! - `rrc` - LTE RRC information elements (3GPP TS 36.331)

pub mod per;           // Unaligned Packed Encoding Rules
pub mod config;        // Codec limits
pub mod json;          // Debug dump
pub mod enumerated;    // ENUMERATED
pub mod sequence;      // SEQUENCE presence and extensions
pub mod choice;        // CHOICE
pub mod list;          // SEQUENCE OF
pub mod bit_string;    // BIT STRING
pub mod octet_string;  // OCTET STRING
pub mod pdu;           // Top-level PDUs
pub mod rrc;           // RRC IEs


// Re-export commonly used types
pub use config::CodecConfig;
pub use json::ToJson;
pub use pdu::{decode_pdu, decode_pdu_with_config, encode_pdu, encode_pdu_with_config};
pub use per::{
    Constraint, ErrorKind, Null, PerError, PerResult, UperDecode, UperDecoder, UperEncode,
    UperEncoder,
};
