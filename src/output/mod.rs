//! Output writers for the parsed message model.
//!
//! - [`write_json`] / [`to_json`] - JSON array of messages
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line
//!
//! Both serialize the model as-is: timestamps as RFC 3339, parts tagged by
//! `kind`, media parts carrying the path inside `data_dir`.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> smspack::Result<()> {
//! use smspack::SmsBackupParser;
//! use smspack::output::{write_json, to_jsonl};
//! use std::path::Path;
//!
//! let messages = SmsBackupParser::new().parse(Path::new("backup.xml"))?;
//!
//! write_json(&messages, Path::new("messages.json"))?;
//! let jsonl = to_jsonl(&messages)?;
//! # Ok(())
//! # }
//! ```

mod json_writer;
mod jsonl_writer;

pub use json_writer::{to_json, write_json};
pub use jsonl_writer::{to_jsonl, write_jsonl};
