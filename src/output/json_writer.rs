//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Writes messages to a file as a pretty-printed JSON array.
pub fn write_json(messages: &[Message], output_path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, messages)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array.
///
/// Same format as [`write_json`], but returns a String.
pub fn to_json(messages: &[Message]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    use crate::message::{MessagePart, Participant};

    fn sample() -> Vec<Message> {
        let ts = Utc.with_ymd_and_hms(2017, 4, 1, 16, 5, 13).unwrap();
        vec![
            Message::new(ts, false)
                .with_part(MessagePart::text("Hello"))
                .with_participant(Participant::new("+1 555 123 4567").with_sender(true)),
            Message::new(ts, true)
                .with_part(MessagePart::Image {
                    content_type: "image/png".to_string(),
                    path: PathBuf::from("data/abc.png"),
                }),
        ]
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&sample()).unwrap();

        assert!(json.contains(r#""date_time": "2017-04-01T16:05:13Z""#));
        assert!(json.contains(r#""kind": "text""#));
        assert!(json.contains(r#""kind": "image""#));
        assert!(json.contains(r#""normalized_address": "5551234567""#));
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_write_json_roundtrips_model() {
        let messages = sample();
        let temp_file = NamedTempFile::new().unwrap();

        write_json(&messages, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let parsed: Vec<Message> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, messages);
    }
}
