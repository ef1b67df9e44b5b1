//! JSON Lines (JSONL) output writer.
//!
//! One message per line, suited to line-oriented tools such as `jq -c`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Writes messages to a JSONL file.
///
/// # Format
/// ```text
/// {"date_time":"2017-04-01T16:05:13Z","outgoing":false,"parts":[...],"participants":[...]}
/// {"date_time":"2017-04-01T16:07:02Z","outgoing":true,"parts":[...],"participants":[...]}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    for msg in messages {
        serde_json::to_writer(&mut writer, msg)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message]) -> Result<String> {
    let mut output = String::new();
    for msg in messages {
        output.push_str(&serde_json::to_string(msg)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    use crate::message::MessagePart;

    fn sample() -> Vec<Message> {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
        vec![
            Message::new(ts, false).with_part(MessagePart::text("Hello")),
            Message::new(ts, true).with_subject("Re: lunch"),
        ]
    }

    #[test]
    fn test_to_jsonl_one_line_per_message() {
        let jsonl = to_jsonl(&sample()).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""outgoing":false"#));
        assert!(lines[1].contains(r#""subject":"Re: lunch""#));
        assert!(!lines[0].contains("subject"));
    }

    #[test]
    fn test_to_jsonl_empty() {
        assert_eq!(to_jsonl(&[]).unwrap(), "");
    }

    #[test]
    fn test_write_jsonl() {
        let messages = sample();
        let temp_file = NamedTempFile::new().unwrap();

        write_jsonl(&messages, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        for (line, expected) in content.lines().zip(&messages) {
            let parsed: Message = serde_json::from_str(line).unwrap();
            assert_eq!(&parsed, expected);
        }
    }
}
