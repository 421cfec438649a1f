//! Codec Configuration
//!
//! Limits applied by the decoder, loadable from the `uper:` section of a
//! nextgcore YAML configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::per::FRAGMENT_UNIT;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Default upper bound for a whole PDU
pub const DEFAULT_MAX_PDU_BYTES: usize = 8192;
/// Default upper bound for one open type (extension group or alternative)
pub const DEFAULT_MAX_OPEN_TYPE_BYTES: usize = FRAGMENT_UNIT * 4;

/// UPER codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest PDU accepted by `encode_pdu`/`decode_pdu`
    pub max_pdu_bytes: usize,
    /// Largest open type payload the decoder will buffer
    pub max_open_type_bytes: usize,
    /// Reject non-zero alignment and trailing padding bits
    pub strict_padding: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            max_pdu_bytes: DEFAULT_MAX_PDU_BYTES,
            max_open_type_bytes: DEFAULT_MAX_OPEN_TYPE_BYTES,
            strict_padding: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    uper: CodecConfig,
}

impl CodecConfig {
    /// Parse the `uper:` section of a YAML document
    ///
    /// A document without the section yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?
        };
        file.uper.validate()?;
        Ok(file.uper)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pdu_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "max_pdu_bytes must be greater than 0".to_string(),
            ));
        }
        if self.max_open_type_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "max_open_type_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
