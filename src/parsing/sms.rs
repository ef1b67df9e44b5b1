//! `<sms>` record parsing.
//!
//! An SMS record is a single empty element:
//! ```xml
//! <sms protocol="0" address="+12345678910" date="1491062713000" type="1"
//!      subject="null" body="Hello!" contact_name="Alice" />
//! ```

use crate::Message;
use crate::error::{Result, SmspackError};
use crate::message::{MessagePart, Participant};

use super::element::XmlElement;
use super::parse_epoch_millis;

/// Record element name.
pub const SMS_ELEMENT: &str = "sms";

/// Decodes the sms `type` attribute into the `outgoing` flag.
///
/// `1` is a received message, `2` a sent one. Any other code is fatal.
pub fn sms_outgoing_type(code: &str) -> Result<bool> {
    match code {
        "1" => Ok(false),
        "2" => Ok(true),
        other => Err(SmspackError::unrecognized_type_code("SMS type", other)),
    }
}

/// Converts one `<sms>` element into a [`Message`].
///
/// The single participant is the other party: flagged as sender when the
/// message was received. SMS records never name the archive owner.
pub fn parse_sms(sms: &XmlElement) -> Result<Message> {
    let outgoing = sms_outgoing_type(sms.attr("type").unwrap_or_default())?;
    let date_time = parse_epoch_millis(sms.require_attr(SMS_ELEMENT, "date")?)?;

    let participant = Participant::new(sms.require_attr(SMS_ELEMENT, "address")?)
        .with_optional_name(sms.attr("contact_name").map(ToString::to_string))
        .with_sender(!outgoing);

    let mut message = Message::new(date_time, outgoing).with_participant(participant);
    if let Some(body) = sms.attr("body") {
        message = message.with_part(MessagePart::text(body));
    }
    message.subject = sms.attr("subject").map(ToString::to_string);

    Ok(message)
}
