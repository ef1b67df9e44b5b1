//! Message model produced by the archive parser.
//!
//! This module provides [`Message`], [`Participant`] and [`MessagePart`], the
//! structures handed to whatever renders an archive. The parser builds them
//! once per record and never mutates them afterwards.
//!
//! # Overview
//!
//! A message consists of:
//! - **When**: `date_time`, decoded from epoch milliseconds
//! - **Direction**: `outgoing`, true if the archive owner sent it
//! - **Who**: one or more [`Participant`]s with sender/owner flags
//! - **What**: an ordered list of [`MessagePart`]s
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use smspack::{Message, MessagePart, Participant};
//!
//! let ts = Utc.timestamp_millis_opt(1491062713000).unwrap();
//! let alice = Participant::new("+1 (234) 567-8910")
//!     .with_name("Alice")
//!     .with_sender(true);
//! let msg = Message::new(ts, false)
//!     .with_participant(alice)
//!     .with_part(MessagePart::text("Hello!"));
//!
//! assert_eq!(msg.sender().unwrap().normalized_address(), "2345678910");
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsing::address::normalize_address;

/// One SMS or MMS record from the archive.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `date_time` | `DateTime<Utc>` | When the message was sent or received |
/// | `outgoing` | `bool` | `true` if the archive owner sent it |
/// | `subject` | `Option<String>` | Subject line (SMS only, usually absent) |
/// | `parts` | `Vec<MessagePart>` | Content in document order |
/// | `participants` | `Vec<Participant>` | Addresses attached to the record |
///
/// SMS records never enumerate the archive owner, so an SMS carries exactly
/// one participant: the sender for incoming messages, the recipient for
/// outgoing ones. MMS records list every address including the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent or received.
    pub date_time: DateTime<Utc>,

    /// `true` if the archive owner sent the message.
    pub outgoing: bool,

    /// Subject/title of the message, likely `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub subject: Option<String>,

    /// Message content. Order is meaningful (e.g. caption before image).
    #[serde(default)]
    pub parts: Vec<MessagePart>,

    /// Senders and recipients of the message.
    pub participants: Vec<Participant>,
}

impl Message {
    /// Creates a message with no parts and no participants.
    pub fn new(date_time: DateTime<Utc>, outgoing: bool) -> Self {
        Self {
            date_time,
            outgoing,
            subject: None,
            parts: Vec::new(),
            participants: Vec::new(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Builder method to append a content part.
    #[must_use]
    pub fn with_part(mut self, part: MessagePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Builder method to append a participant.
    #[must_use]
    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the first participant flagged as the sender, if any.
    ///
    /// The format does not guarantee exactly one originator on MMS records;
    /// when several are flagged, the first in document order wins.
    pub fn sender(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.sender)
    }

    /// Returns the participant inferred to be the archive owner, if any.
    pub fn owner(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.owner)
    }

    /// Returns `true` if the message has no content parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// A single sender or recipient attached to a message.
///
/// Deserialization ignores any stored `normalized_address` and recomputes it
/// from `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ParticipantFields")]
pub struct Participant {
    /// Address as written in the archive, such as `1 (234) 567-8910`.
    pub address: String,

    /// Canonical form of `address` used for comparison and grouping.
    normalized_address: String,

    /// Contact name, or `None` if unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub name: Option<String>,

    /// `true` if this participant is the device that produced the archive.
    #[serde(default)]
    pub owner: bool,

    /// `true` if this participant originated the message.
    #[serde(default)]
    pub sender: bool,
}

impl Participant {
    /// Creates a recipient participant with no name.
    ///
    /// The normalized address is computed here once and reused for the
    /// participant's whole lifetime.
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let normalized_address = normalize_address(&address);
        Self {
            address,
            normalized_address,
            name: None,
            owner: false,
            sender: false,
        }
    }

    /// Builder method to set the contact name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set an optional contact name.
    #[must_use]
    pub fn with_optional_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Builder method to mark this participant as the archive owner.
    #[must_use]
    pub fn with_owner(mut self, owner: bool) -> Self {
        self.owner = owner;
        self
    }

    /// Builder method to mark this participant as the originator.
    #[must_use]
    pub fn with_sender(mut self, sender: bool) -> Self {
        self.sender = sender;
        self
    }

    /// Returns the normalized address, e.g. `2345678910` for `+1 (234) 567-8910`.
    pub fn normalized_address(&self) -> &str {
        &self.normalized_address
    }
}

/// Deserialized form of [`Participant`] without the derived key.
#[derive(Deserialize)]
struct ParticipantFields {
    address: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    owner: bool,
    #[serde(default)]
    sender: bool,
}

impl From<ParticipantFields> for Participant {
    fn from(fields: ParticipantFields) -> Self {
        Participant::new(fields.address)
            .with_optional_name(fields.name)
            .with_owner(fields.owner)
            .with_sender(fields.sender)
    }
}

/// A piece of message content.
///
/// Consumers match exhaustively; SMIL layout parts never appear here because
/// the parser drops them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessagePart {
    /// Plain text content.
    Text {
        /// The literal text.
        text: String,
    },

    /// An image stored in the media directory.
    Image {
        /// MIME type such as `image/jpeg`.
        content_type: String,
        /// Path of the stored file.
        path: PathBuf,
    },

    /// A video stored in the media directory.
    Video {
        /// MIME type such as `video/mp4`.
        content_type: String,
        /// Path of the stored file.
        path: PathBuf,
    },

    /// A part the parser does not understand, kept as serialized XML.
    Unsupported {
        /// The `<part>` element as XML.
        xml: String,
    },
}

impl MessagePart {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text { text: text.into() }
    }

    /// Returns the MIME type of a media part.
    pub fn content_type(&self) -> Option<&str> {
        match self {
            MessagePart::Image { content_type, .. } | MessagePart::Video { content_type, .. } => {
                Some(content_type)
            }
            MessagePart::Text { .. } | MessagePart::Unsupported { .. } => None,
        }
    }

    /// Returns the stored file path of a media part.
    pub fn path(&self) -> Option<&Path> {
        match self {
            MessagePart::Image { path, .. } | MessagePart::Video { path, .. } => Some(path),
            MessagePart::Text { .. } | MessagePart::Unsupported { .. } => None,
        }
    }

    /// Returns `true` for image and video parts.
    pub fn is_media(&self) -> bool {
        matches!(self, MessagePart::Image { .. } | MessagePart::Video { .. })
    }
}
