//! Record-level parsing for SMS Backup & Restore archives.
//!
//! This module contains the stateless pieces the archive reader is built
//! from: the surrogate-pair repair pass, address normalization, the owned
//! record subtree, and the `<sms>`/`<mms>` record parsers.

pub mod address;
pub mod element;
pub mod mms;
pub mod sms;
pub mod surrogate;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Result, SmspackError};

// Re-export commonly used items
pub use address::normalize_address;
pub use element::{XmlElement, XmlNode};
pub use mms::{MULTIPART_RELATED, infer_contact_names, mms_outgoing_type, parse_mms};
pub use sms::{parse_sms, sms_outgoing_type};
pub use surrogate::fix_surrogate_pairs;

/// Parses an epoch-millisecond string such as `1491062713000`.
pub fn parse_epoch_millis(value: &str) -> Result<DateTime<Utc>> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .ok_or_else(|| SmspackError::invalid_timestamp(value))
}
