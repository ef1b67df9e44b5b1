//! Streaming archive reader.
//!
//! Walks the (already repaired) XML document event by event. Each `<sms>` or
//! `<mms>` element is isolated into an owned [`XmlElement`] and handed to its
//! record parser, so peak memory follows the largest record rather than the
//! whole archive. Every other element is skipped.
//!
//! The first error ends iteration. Callers collect into
//! `Result<Vec<Message>>` to get all-or-nothing behavior.

use std::io::BufRead;
use std::str;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use crate::Message;
use crate::error::{Result, SmspackError};
use crate::media::MediaStore;
use crate::parsing::element::{XmlElement, XmlNode};
use crate::parsing::mms::{MMS_ELEMENT, parse_mms};
use crate::parsing::sms::{SMS_ELEMENT, parse_sms};

/// Iterator over the messages of an archive, in document order.
pub(crate) struct RecordIter<'m, R: BufRead> {
    reader: Reader<R>,
    media: &'m MediaStore,
    buf: Vec<u8>,
    records: usize,
    finished: bool,
}

impl<'m, R: BufRead> RecordIter<'m, R> {
    pub(crate) fn new(input: R, media: &'m MediaStore) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            media,
            buf: Vec::new(),
            records: 0,
            finished: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<Message>> {
        loop {
            self.buf.clear();
            let (header, empty) = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) if is_record(&start) => (XmlElement::from_start(&start)?, false),
                Event::Empty(start) if is_record(&start) => (XmlElement::from_start(&start)?, true),
                Event::Eof => return Ok(None),
                _ => continue,
            };

            let record = if empty {
                header
            } else {
                self.read_subtree(header)?
            };
            return self.dispatch(&record).map(Some);
        }
    }

    /// Reads events up to the end tag matching `root`, building its subtree.
    fn read_subtree(&mut self, root: XmlElement) -> Result<XmlElement> {
        let mut stack = vec![root];
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => stack.push(XmlElement::from_start(&start)?),
                Event::Empty(start) => {
                    let child = XmlElement::from_start(&start)?;
                    push_node(&mut stack, XmlNode::Element(child));
                }
                Event::End(_) => {
                    let done = stack
                        .pop()
                        .ok_or_else(|| SmspackError::unexpected_eof("reading record"))?;
                    if stack.is_empty() {
                        return Ok(done);
                    }
                    push_node(&mut stack, XmlNode::Element(done));
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if !text.is_empty() {
                        push_node(&mut stack, XmlNode::Text(text.into_owned()));
                    }
                }
                Event::CData(data) => {
                    let text = str::from_utf8(&data)?;
                    if !text.is_empty() {
                        push_node(&mut stack, XmlNode::Text(text.to_string()));
                    }
                }
                Event::Eof => {
                    let name = stack.first().map(|e| e.name.clone()).unwrap_or_default();
                    return Err(SmspackError::unexpected_eof(format!("reading <{name}>")));
                }
                _ => {}
            }
        }
    }

    fn dispatch(&mut self, record: &XmlElement) -> Result<Message> {
        trace!(element = %record.name, index = self.records, "parsing record");
        let message = if record.name == SMS_ELEMENT {
            parse_sms(record)?
        } else {
            parse_mms(record, self.media)?
        };
        self.records += 1;
        Ok(message)
    }
}

impl<R: BufRead> Iterator for RecordIter<'_, R> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(Some(message)) => Some(Ok(message)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn is_record(start: &BytesStart<'_>) -> bool {
    let name = start.name();
    name.as_ref() == SMS_ELEMENT.as_bytes() || name.as_ref() == MMS_ELEMENT.as_bytes()
}

fn push_node(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}
