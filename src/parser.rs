//! Archive parser entry point.
//!
//! [`SmsBackupParser`] ties the pipeline together: read the archive, repair
//! escaped surrogate pairs, then stream records through the reader into an
//! ordered message list. Media parts are written to the configured
//! `data_dir` as they are encountered.
//!
//! # Example
//!
//! ```rust,no_run
//! use smspack::SmsBackupParser;
//! use smspack::config::ParserConfig;
//! use std::path::Path;
//!
//! std::fs::create_dir_all("site/data")?;
//! let parser = SmsBackupParser::with_config(ParserConfig::new().with_data_dir("site/data"));
//! let messages = parser.parse(Path::new("sms-20170401.xml"))?;
//!
//! for msg in &messages {
//!     println!("{} outgoing={} parts={}", msg.date_time, msg.outgoing, msg.parts.len());
//! }
//! # Ok::<(), smspack::SmspackError>(())
//! ```

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::media::MediaStore;
use crate::parsing::fix_surrogate_pairs;
use crate::reader::RecordIter;

/// Parser for SMS Backup & Restore XML archives.
#[derive(Debug, Clone, Default)]
pub struct SmsBackupParser {
    config: ParserConfig,
}

impl SmsBackupParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an archive file.
    ///
    /// # Errors
    ///
    /// Returns [`SmspackError`](crate::SmspackError) if the file cannot be
    /// read, is not UTF-8, or any record fails to parse. No partial result
    /// is returned, but media written before the failure stays on disk.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let file = File::open(path)?;
        debug!(path = %path.display(), "reading archive");
        self.parse_reader(BufReader::with_capacity(self.config.buffer_size, file))
    }

    /// Parses an archive from any reader.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Vec<Message>> {
        let mut raw = Vec::with_capacity(self.config.buffer_size);
        reader.read_to_end(&mut raw)?;
        let content = String::from_utf8(raw)?;
        self.parse_str(&content)
    }

    /// Parses archive content already in memory.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        let content = if self.config.repair_surrogates {
            fix_surrogate_pairs(content)
        } else {
            Cow::Borrowed(content)
        };
        if matches!(content, Cow::Owned(_)) {
            debug!("repaired escaped surrogate pairs");
        }

        let media = MediaStore::new(&self.config.data_dir);
        let messages = RecordIter::new(content.as_bytes(), &media).collect::<Result<Vec<_>>>()?;
        debug!(
            messages = messages.len(),
            media_parts = count_media_parts(&messages),
            "parsed archive"
        );
        Ok(messages)
    }
}

fn count_media_parts(messages: &[Message]) -> usize {
    messages
        .iter()
        .flat_map(|m| &m.parts)
        .filter(|p| p.is_media())
        .count()
}

/// Parses an archive read from `input`, storing media under `data_dir`.
///
/// Shorthand for a default [`SmsBackupParser`] with only `data_dir` set.
pub fn parse_archive<R: Read>(input: R, data_dir: impl Into<PathBuf>) -> Result<Vec<Message>> {
    SmsBackupParser::with_config(ParserConfig::new().with_data_dir(data_dir)).parse_reader(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use crate::message::MessagePart;

    const EMOJI_ARCHIVE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>
<smses count="1">
  <sms address="5551234567" date="1491062713000" type="1" body="hi &#55357;&#56832;" />
</smses>"#;

    #[test]
    fn test_parser_default_config() {
        let parser = SmsBackupParser::new();
        assert_eq!(parser.config(), &ParserConfig::default());
    }

    #[test]
    fn test_parse_str_repairs_surrogates() {
        let dir = tempdir().unwrap();
        let parser = SmsBackupParser::with_config(ParserConfig::new().with_data_dir(dir.path()));
        let messages = parser.parse_str(EMOJI_ARCHIVE).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].parts, vec![MessagePart::text("hi 😀")]);
    }

    #[test]
    fn test_parse_str_without_repair_fails() {
        let dir = tempdir().unwrap();
        let parser = SmsBackupParser::with_config(
            ParserConfig::new()
                .with_data_dir(dir.path())
                .with_repair_surrogates(false),
        );
        // a lone surrogate char reference is not a valid XML character
        assert!(parser.parse_str(EMOJI_ARCHIVE).is_err());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.xml");
        fs::write(&path, EMOJI_ARCHIVE).unwrap();

        let parser = SmsBackupParser::with_config(ParserConfig::new().with_data_dir(dir.path()));
        let messages = parser.parse(&path).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(!messages[0].outgoing);
    }

    #[test]
    fn test_parse_missing_file() {
        let parser = SmsBackupParser::new();
        let err = parser.parse(Path::new("/nonexistent/backup.xml")).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_parse_reader_invalid_utf8() {
        let parser = SmsBackupParser::new();
        let err = parser.parse_reader(&b"<smses>\xff</smses>"[..]).unwrap_err();
        assert!(matches!(err, crate::SmspackError::Utf8 { .. }));
    }

    #[test]
    fn test_count_media_parts() {
        let dir = tempdir().unwrap();
        let xml = r#"<smses>
  <sms address="5551234567" date="1491062713000" type="1" body="hi" />
  <mms date="1491062800000" ct_t="application/vnd.wap.multipart.related" m_type="132" address="5551234567">
    <parts>
      <part ct="text/plain" text="look" />
      <part ct="image/png" data="aGVsbG8=" />
      <part ct="image/png" data="aGVsbG8=" />
    </parts>
    <addrs><addr address="5551234567" type="137" /></addrs>
  </mms>
</smses>"#;
        let messages = parse_archive(xml.as_bytes(), dir.path()).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(count_media_parts(&messages), 2);
        assert_eq!(count_media_parts(&[]), 0);
    }

    #[test]
    fn test_parse_archive() {
        let dir = tempdir().unwrap();
        let messages = parse_archive(EMOJI_ARCHIVE.as_bytes(), dir.path()).unwrap();
        assert_eq!(messages.len(), 1);
    }
}
