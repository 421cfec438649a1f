//! NextGCore RRC Dump
//!
//! Decodes one UPER-encoded LTE RRC message given as hex and prints the
//! decoded structure as JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use ogs_uper::rrc::{MasterInformationBlock, MeasGapConfig, RachConfigCommon};
use ogs_uper::{decode_pdu_with_config, encode_pdu_with_config, CodecConfig, ToJson, UperDecode, UperEncode};

/// RRC message types understood by the decoder
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MessageType {
    /// MasterInformationBlock (BCCH-BCH)
    Mib,
    /// RACH-ConfigCommon
    RachConfigCommon,
    /// MeasGapConfig
    MeasGapConfig,
}

/// NextGCore RRC Dump - LTE RRC UPER decoder
#[derive(Parser, Debug)]
#[command(name = "nextgcore-rrcdump")]
#[command(author = "NextGCore")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decode UPER-encoded LTE RRC messages", long_about = None)]
struct Args {
    /// Message type
    #[arg(short = 't', long = "type", value_enum)]
    message_type: MessageType,

    /// Encoded message as hex
    #[arg(long, conflicts_with = "file")]
    hex: Option<String>,

    /// File holding the encoded message as hex text
    #[arg(long)]
    file: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'e', long, default_value = "warn")]
    log_level: String,

    /// Re-encode the decoded message and compare with the input
    #[arg(long)]
    check: bool,
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

/// Read the hex input and strip whitespace
fn read_input(args: &Args) -> Result<Vec<u8>> {
    let text = match (&args.hex, &args.file) {
        (Some(hex), _) => hex.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?,
        (None, None) => bail!("either --hex or --file is required"),
    };
    let cleaned: String = text.split_whitespace().collect();
    hex::decode(&cleaned).context("Input is not valid hex")
}

fn dump<T>(data: &[u8], config: &CodecConfig, check: bool) -> Result<String>
where
    T: UperDecode + UperEncode + ToJson,
{
    let message: T = decode_pdu_with_config(data, config)
        .with_context(|| format!("Failed to decode {} octets", data.len()))?;

    if check {
        let encoded = encode_pdu_with_config(&message, config).context("Failed to re-encode")?;
        if encoded[..] != data[..] {
            bail!(
                "re-encoding differs: input {} output {}",
                hex::encode(data),
                hex::encode(&encoded)
            );
        }
        log::info!("Re-encoding matches input ({} octets)", encoded.len());
    }

    Ok(message.to_debug_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    let config = match &args.config {
        Some(path) => {
            log::debug!("Loading configuration from {}", path);
            CodecConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration {}", path))?
        }
        None => CodecConfig::default(),
    };

    let data = read_input(&args)?;
    log::debug!("{:?}: {} octets", args.message_type, data.len());

    let output = match args.message_type {
        MessageType::Mib => dump::<MasterInformationBlock>(&data, &config, args.check)?,
        MessageType::RachConfigCommon => dump::<RachConfigCommon>(&data, &config, args.check)?,
        MessageType::MeasGapConfig => dump::<MeasGapConfig>(&data, &config, args.check)?,
    };
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["nextgcore-rrcdump", "-t", "mib", "--hex", "9464c0"]);
        assert_eq!(args.message_type, MessageType::Mib);
        assert_eq!(args.log_level, "warn");
        assert_eq!(read_input(&args).unwrap(), vec![0x94, 0x64, 0xC0]);
    }

    #[test]
    fn test_dump_mib() {
        let output = dump::<MasterInformationBlock>(&[0x94, 0x64, 0xC0], &CodecConfig::default(), true)
            .unwrap();
        assert!(output.contains("\"dl-Bandwidth\": \"n75\""));
    }

    #[test]
    fn test_dump_rejects_truncated_input() {
        assert!(dump::<RachConfigCommon>(&[], &CodecConfig::default(), false).is_err());
    }

    #[test]
    fn test_input_with_spaces() {
        let args = Args::parse_from(["nextgcore-rrcdump", "-t", "meas-gap-config", "--hex", "00"]);
        assert_eq!(args.message_type, MessageType::MeasGapConfig);
        let args = Args {
            hex: Some("94 64\nc0".to_string()),
            ..args
        };
        assert_eq!(read_input(&args).unwrap().len(), 3);
    }
}
