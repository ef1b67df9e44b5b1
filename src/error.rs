//! Unified error types for smspack.
//!
//! Every failure while reading an archive surfaces as a [`SmspackError`].
//! The archive format is treated as closed: an unknown type code or content
//! template aborts the whole parse instead of skipping the offending record.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get messages naming the offending value
//! - **Developers** get source error chains for debugging

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for smspack operations.
///
/// # Example
///
/// ```rust
/// use smspack::error::Result;
/// use smspack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SmspackError>;

/// The error type for all smspack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SmspackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The archive file doesn't exist
    /// - The media directory is missing or not writable
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A record carried a type code outside the exporter's code table.
    ///
    /// Raised for the sms `type` and mms `m_type` attributes.
    #[error("Unrecognized {field} code '{value}'")]
    UnrecognizedTypeCode {
        /// The attribute that carried the code (e.g. "SMS type")
        field: &'static str,
        /// The offending value
        value: String,
    },

    /// An MMS record used a content template other than multipart/related.
    #[error("Unsupported MMS content template (ct_t) '{value}'")]
    UnsupportedContentTemplate {
        /// The offending `ct_t` value
        value: String,
    },

    /// A required attribute was absent from a record element.
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
    },

    /// The `date` attribute was not a usable epoch-millisecond value.
    #[error("Invalid timestamp '{value}'. Expected epoch milliseconds")]
    InvalidTimestamp {
        /// The raw attribute value
        value: String,
    },

    /// The XML document is not well-formed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element carried a malformed attribute.
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// A media part's `data` attribute was not valid base64.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// The document ended inside a record.
    #[error("Unexpected end of file while {context}")]
    UnexpectedEof {
        /// Context about what was being parsed
        context: String,
    },

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for SmspackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        SmspackError::Utf8 {
            context: "archive input".to_string(),
            source: err.utf8_error(),
        }
    }
}

impl From<std::str::Utf8Error> for SmspackError {
    fn from(err: std::str::Utf8Error) -> Self {
        SmspackError::Utf8 {
            context: "element or attribute name".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SmspackError {
    /// Creates an unrecognized type code error.
    pub fn unrecognized_type_code(field: &'static str, value: impl Into<String>) -> Self {
        SmspackError::UnrecognizedTypeCode {
            field,
            value: value.into(),
        }
    }

    /// Creates an unsupported content template error.
    pub fn unsupported_content_template(value: impl Into<String>) -> Self {
        SmspackError::UnsupportedContentTemplate {
            value: value.into(),
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attribute(element: &'static str, attribute: &'static str) -> Self {
        SmspackError::MissingAttribute { element, attribute }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        SmspackError::InvalidTimestamp {
            value: value.into(),
        }
    }

    /// Creates an unexpected EOF error.
    pub fn unexpected_eof(context: impl Into<String>) -> Self {
        SmspackError::UnexpectedEof {
            context: context.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SmspackError::Io(_))
    }

    /// Returns `true` if a record carried an unknown type code.
    pub fn is_unrecognized_type_code(&self) -> bool {
        matches!(self, SmspackError::UnrecognizedTypeCode { .. })
    }

    /// Returns `true` if an MMS record had an unsupported `ct_t`.
    pub fn is_unsupported_content_template(&self) -> bool {
        matches!(self, SmspackError::UnsupportedContentTemplate { .. })
    }

    /// Returns `true` if the document itself could not be parsed as XML.
    pub fn is_xml(&self) -> bool {
        matches!(
            self,
            SmspackError::Xml(_) | SmspackError::Attr(_) | SmspackError::UnexpectedEof { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Display tests
    // =========================================================================

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = SmspackError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_unrecognized_type_code_display() {
        let err = SmspackError::unrecognized_type_code("SMS type", "7");
        let display = err.to_string();
        assert!(display.contains("SMS type"));
        assert!(display.contains("'7'"));
    }

    #[test]
    fn test_unsupported_content_template_display() {
        let err = SmspackError::unsupported_content_template("text/plain");
        assert!(err.to_string().contains("text/plain"));
    }

    #[test]
    fn test_missing_attribute_display() {
        let err = SmspackError::missing_attribute("sms", "date");
        let display = err.to_string();
        assert!(display.contains("'date'"));
        assert!(display.contains("<sms>"));
    }

    #[test]
    fn test_invalid_timestamp_display() {
        let err = SmspackError::invalid_timestamp("yesterday");
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_unexpected_eof_display() {
        let err = SmspackError::unexpected_eof("reading <mms> record");
        let display = err.to_string();
        assert!(display.contains("Unexpected end of file"));
        assert!(display.contains("<mms>"));
    }

    // =========================================================================
    // Source chain and predicates
    // =========================================================================

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = SmspackError::from(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_utf8_error_from_bytes() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: SmspackError = utf8_err.into();
        assert!(err.to_string().contains("UTF-8"));
        assert!(err.to_string().contains("archive input"));
    }

    #[test]
    fn test_is_methods() {
        let err = SmspackError::unrecognized_type_code("MMS m_type", "130");
        assert!(err.is_unrecognized_type_code());
        assert!(!err.is_unsupported_content_template());
        assert!(!err.is_io());

        let err = SmspackError::unsupported_content_template("application/x");
        assert!(err.is_unsupported_content_template());
        assert!(!err.is_unrecognized_type_code());

        let err = SmspackError::unexpected_eof("reading record");
        assert!(err.is_xml());
    }

    #[test]
    fn test_base64_error_from() {
        use base64::Engine;
        let decode_err = base64::engine::general_purpose::STANDARD
            .decode("!!!")
            .unwrap_err();
        let err: SmspackError = decode_err.into();
        assert!(err.to_string().contains("Base64"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: SmspackError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_debug() {
        let err = SmspackError::invalid_timestamp("bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidTimestamp"));
    }
}
