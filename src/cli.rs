//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! # Example
//!
//! ```rust
//! use smspack::cli::OutputFormat;
//!
//! let format: OutputFormat = "ndjson".parse().unwrap();
//! assert_eq!(format.extension(), "jsonl");
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;

/// Default output path, adjusted to the chosen format's extension.
pub const DEFAULT_OUTPUT: &str = "messages.json";

/// Convert an SMS Backup & Restore XML archive into a JSON message model,
/// extracting MMS media into a directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "smspack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    smspack sms-20170401.xml
    smspack backup.xml -d site/data -o site/messages.json
    smspack backup.xml --format jsonl -vv")]
pub struct Args {
    /// Path to the XML archive
    pub input: PathBuf,

    /// Directory media files are written to (created if missing)
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Skip the surrogate-pair repair pass
    #[arg(long)]
    pub no_repair: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the parser configuration from the command line.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new()
            .with_data_dir(&self.data_dir)
            .with_repair_surrogates(!self.no_repair)
    }

    /// Returns the output path, switching the extension to match the format
    /// when the default path is in use.
    pub fn output_path(&self) -> PathBuf {
        if self.output.as_os_str() != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        self.output.with_extension(self.format.extension())
    }
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - Pretty-printed array (default)
/// - [`Jsonl`](OutputFormat::Jsonl) - One JSON object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of messages
    #[default]
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}
