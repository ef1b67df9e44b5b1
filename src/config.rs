//! Parser configuration.
//!
//! [`ParserConfig`] is a plain serde-friendly struct with builder methods,
//! free of any CLI framework types.
//!
//! # Example
//!
//! ```rust
//! use smspack::config::ParserConfig;
//! use smspack::SmsBackupParser;
//!
//! let config = ParserConfig::new()
//!     .with_data_dir("site/data")
//!     .with_buffer_size(128 * 1024);
//!
//! let parser = SmsBackupParser::with_config(config);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for reading an SMS Backup & Restore archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Directory media parts are written to (default: `data`).
    ///
    /// Must exist before parsing; the parser does not create it.
    pub data_dir: PathBuf,

    /// Repair escaped surrogate pairs before parsing (default: true)
    pub repair_surrogates: bool,

    /// Read buffer size for file input (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            repair_surrogates: true,
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the media directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Enables or disables the surrogate-pair repair pass.
    #[must_use]
    pub fn with_repair_surrogates(mut self, enabled: bool) -> Self {
        self.repair_surrogates = enabled;
        self
    }

    /// Sets the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Returns the media directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.repair_surrogates);
        assert_eq!(config.buffer_size, 64 * 1024);
    }

    #[test]
    fn test_config_builder() {
        let config = ParserConfig::new()
            .with_data_dir("/tmp/media")
            .with_repair_surrogates(false)
            .with_buffer_size(1024);

        assert_eq!(config.data_dir(), Path::new("/tmp/media"));
        assert!(!config.repair_surrogates);
        assert_eq!(config.buffer_size, 1024);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ParserConfig = serde_json::from_str(r#"{"data_dir": "out/data"}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("out/data"));
        assert!(config.repair_surrogates);
    }
}
