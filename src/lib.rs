//! # Smspack
//!
//! A Rust library for reading SMS Backup & Restore XML archives into a
//! structured conversation model.
//!
//! ## Overview
//!
//! The exporting app writes archives that are almost, but not quite, valid
//! XML: characters outside the Basic Multilingual Plane (emoji) are escaped
//! as two separate surrogate code units. Smspack repairs those, then walks the
//! document record by record:
//!
//! - **SMS** records become a [`Message`] with one text part and one
//!   participant
//! - **MMS** records become a [`Message`] with ordered text/image/video parts
//!   and a reconciled participant list (who sent it, who owns the archive,
//!   which name belongs to which address)
//!
//! Image and video payloads are decoded and written to a media directory under
//! content-derived file names, so identical attachments are stored once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smspack::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     std::fs::create_dir_all("site/data")?;
//!
//!     let parser = SmsBackupParser::with_config(ParserConfig::new().with_data_dir("site/data"));
//!     let messages = parser.parse(Path::new("sms-20170401.xml"))?;
//!
//!     for msg in &messages {
//!         let who = msg.sender().map_or("me", |p| p.name.as_deref().unwrap_or(&p.address));
//!         println!("{} {}: {} part(s)", msg.date_time, who, msg.parts.len());
//!     }
//!
//!     write_json(&messages, Path::new("messages.json"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Behavior
//!
//! Parsing is all-or-nothing. An unrecognized type code, an unsupported MMS
//! content template or malformed XML aborts the whole archive with a
//! [`SmspackError`]. Media written for earlier records stays on disk.
//!
//! ## Module Structure
//!
//! - [`parser`] - [`SmsBackupParser`] and [`parse_archive`](parser::parse_archive)
//! - [`config`] - [`ParserConfig`](config::ParserConfig)
//! - [`message`] - [`Message`], [`Participant`](message::Participant),
//!   [`MessagePart`](message::MessagePart)
//! - [`parsing`] - surrogate repair, address normalization, record parsers
//! - [`media`] - [`MediaStore`](media::MediaStore)
//! - [`output`] - [`write_json`](output::write_json), [`write_jsonl`](output::write_jsonl)
//!   (requires `json-output` feature)
//! - [`error`] - [`SmspackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod message;
#[cfg(feature = "json-output")]
pub mod output;
pub mod parser;
pub mod parsing;
mod reader;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SmspackError};
pub use message::{Message, MessagePart, Participant};
pub use parser::SmsBackupParser;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use smspack::prelude::*;
/// ```
pub mod prelude {
    // Model
    pub use crate::message::{Message, MessagePart, Participant};

    // Error types
    pub use crate::error::{Result, SmspackError};

    // Parsing
    pub use crate::config::ParserConfig;
    pub use crate::parser::{SmsBackupParser, parse_archive};
    pub use crate::parsing::{fix_surrogate_pairs, normalize_address};

    // Media
    pub use crate::media::MediaStore;

    // Output
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, to_jsonl, write_json, write_jsonl};
}
