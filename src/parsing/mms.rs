//! `<mms>` record parsing.
//!
//! MMS records nest their content and addresses:
//! ```xml
//! <mms date="1491062713000" ct_t="application/vnd.wap.multipart.related"
//!      m_type="132" address="5551234567~5557654321" contact_name="Alice, Bob">
//!   <parts>
//!     <part ct="application/smil" text="&lt;smil&gt;...&lt;/smil&gt;" />
//!     <part ct="text/plain" text="Look at this" />
//!     <part ct="image/jpeg" data="/9j/4AAQ..." />
//!   </parts>
//!   <addrs>
//!     <addr address="5551234567" type="137" />
//!     <addr address="5557654321" type="151" />
//!     <addr address="5559999999" type="151" />
//!   </addrs>
//! </mms>
//! ```
//!
//! The format never says which address belongs to the archive owner or
//! which contact name belongs to which address. Both are inferred here, and
//! both inferences are guesses the format does not back up:
//!
//! - the owner is whichever `addr` is missing from the record's combined
//!   `address` attribute;
//! - contact names are paired with addresses by position.

use std::collections::{HashMap, HashSet};

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use tracing::{debug, warn};

use crate::Message;
use crate::error::{Result, SmspackError};
use crate::media::MediaStore;
use crate::message::{MessagePart, Participant};

use super::address::normalize_address;
use super::element::XmlElement;
use super::parse_epoch_millis;

/// Record element name.
pub const MMS_ELEMENT: &str = "mms";

/// The only `ct_t` value the parser understands.
pub const MULTIPART_RELATED: &str = "application/vnd.wap.multipart.related";

/// SMIL layout parts carry no user-visible content and are dropped.
pub const SMIL_CONTENT_TYPE: &str = "application/smil";

/// `addr` type code marking the originator (PDU "From" header).
pub const ADDR_TYPE_FROM: u32 = 137;

/// Separator of the combined `address` attribute.
const ADDRESS_SEPARATOR: char = '~';

/// Separator of the combined `contact_name` attribute.
const CONTACT_NAME_SEPARATOR: char = ',';

/// Standard alphabet, padding optional, non-zero trailing bits accepted.
const MEDIA_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes the mms `m_type` attribute into the `outgoing` flag.
///
/// `132` (retrieve-conf) is a received message, `128` (send-req) a sent one.
/// Any other code is fatal.
pub fn mms_outgoing_type(code: &str) -> Result<bool> {
    match code {
        "132" => Ok(false),
        "128" => Ok(true),
        other => Err(SmspackError::unrecognized_type_code("MMS m_type", other)),
    }
}

/// Converts one `<mms>` element into a [`Message`], writing media through `media`.
///
/// A missing `ct_t` or `m_type` is reported like an unknown value. The
/// `ct_t` check happens before any part is looked at, so a record with an
/// unsupported template never writes media.
pub fn parse_mms(mms: &XmlElement, media: &MediaStore) -> Result<Message> {
    let template = mms.attr("ct_t").unwrap_or_default();
    if template != MULTIPART_RELATED {
        return Err(SmspackError::unsupported_content_template(template));
    }

    let outgoing = mms_outgoing_type(mms.attr("m_type").unwrap_or_default())?;
    let date_time = parse_epoch_millis(mms.require_attr(MMS_ELEMENT, "date")?)?;

    let mut message = Message::new(date_time, outgoing);
    for part in mms.select(&["parts", "part"]) {
        if let Some(part) = parse_part(part, media)? {
            message.parts.push(part);
        }
    }
    message.participants = parse_participants(mms)?;

    Ok(message)
}

/// Classifies one `<part>` by its `ct` attribute.
///
/// Returns `None` for SMIL parts.
pub fn parse_part(part: &XmlElement, media: &MediaStore) -> Result<Option<MessagePart>> {
    let Some(content_type) = part.attr("ct") else {
        return Ok(Some(MessagePart::Unsupported { xml: part.to_xml() }));
    };

    if content_type == SMIL_CONTENT_TYPE {
        return Ok(None);
    }
    if content_type == "text/plain" {
        let text = part.attr("text").unwrap_or_default();
        return Ok(Some(MessagePart::text(text)));
    }
    if let Some(subtype) = media_subtype(content_type, "image") {
        let path = store_part_data(part, subtype, media)?;
        return Ok(Some(MessagePart::Image {
            content_type: content_type.to_string(),
            path,
        }));
    }
    if let Some(subtype) = media_subtype(content_type, "video") {
        let path = store_part_data(part, subtype, media)?;
        return Ok(Some(MessagePart::Video {
            content_type: content_type.to_string(),
            path,
        }));
    }

    debug!(content_type, "keeping unsupported MMS part as XML");
    Ok(Some(MessagePart::Unsupported { xml: part.to_xml() }))
}

/// Returns the subtype of `content_type` when its top-level type is `kind`.
fn media_subtype<'a>(content_type: &'a str, kind: &str) -> Option<&'a str> {
    content_type
        .strip_prefix(kind)?
        .strip_prefix('/')
        .filter(|subtype| !subtype.is_empty())
}

fn store_part_data(
    part: &XmlElement,
    extension: &str,
    media: &MediaStore,
) -> Result<std::path::PathBuf> {
    let encoded = part.require_attr("part", "data")?;
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = MEDIA_BASE64.decode(compact)?;
    media.store(&bytes, extension)
}

/// Splits the combined `address` attribute into normalized addresses.
pub fn split_addresses(combined: &str) -> Vec<String> {
    combined
        .split(ADDRESS_SEPARATOR)
        .map(normalize_address)
        .collect()
}

/// Splits the combined `contact_name` attribute.
///
/// Names are trimmed; empty trailing fields are dropped, so an empty
/// attribute yields no names at all.
pub fn split_contact_names(combined: &str) -> Vec<String> {
    let mut names: Vec<String> = combined
        .split(CONTACT_NAME_SEPARATOR)
        .map(|name| name.trim().to_string())
        .collect();
    while names.last().is_some_and(String::is_empty) {
        names.pop();
    }
    names
}

/// Pairs normalized addresses with contact names by position.
///
/// The first N addresses get the N names; any further addresses are
/// assumed to be unnamed contacts. Nothing in the format guarantees the two
/// lists share an order.
pub fn infer_contact_names(addresses: &str, contact_names: &str) -> HashMap<String, String> {
    let addresses = split_addresses(addresses);
    let names = split_contact_names(contact_names);
    if names.len() > addresses.len() {
        warn!(
            addresses = addresses.len(),
            names = names.len(),
            "MMS has more contact names than addresses; extra names ignored"
        );
    }
    addresses.into_iter().zip(names).collect()
}

/// Builds one participant per `addrs/addr` element.
fn parse_participants(mms: &XmlElement) -> Result<Vec<Participant>> {
    let combined_addresses = mms.require_attr(MMS_ELEMENT, "address")?;
    let non_owner: HashSet<String> = split_addresses(combined_addresses).into_iter().collect();
    let names = infer_contact_names(
        combined_addresses,
        mms.attr("contact_name").unwrap_or_default(),
    );

    let participants = mms
        .select(&["addrs", "addr"])
        .into_iter()
        .map(|addr| -> Result<Participant> {
            let participant = Participant::new(addr.require_attr("addr", "address")?);
            let normalized = participant.normalized_address();
            let name = names.get(normalized).cloned();
            let owner = !non_owner.contains(normalized);
            Ok(participant
                .with_optional_name(name)
                .with_owner(owner)
                .with_sender(addr_is_sender(addr)))
        })
        .collect::<Result<Vec<_>>>()?;

    if participants.is_empty() {
        warn!(address = combined_addresses, "MMS record has no addr entries");
    }
    Ok(participants)
}

fn addr_is_sender(addr: &XmlElement) -> bool {
    match addr.attr("type").map(|code| code.trim().parse::<u32>()) {
        Some(Ok(code)) => code == ADDR_TYPE_FROM,
        Some(Err(_)) => {
            debug!(code = ?addr.attr("type"), "non-numeric addr type treated as recipient");
            false
        }
        None => false,
    }
}
