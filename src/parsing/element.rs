//! Owned XML subtree for a single archive record.
//!
//! The archive reader isolates each `<sms>`/`<mms>` element into an
//! [`XmlElement`] so record parsers work on a small tree rather than the
//! whole document.

use std::str;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::BytesStart;

use crate::error::{Result, SmspackError};

/// A node inside an [`XmlElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// A nested element.
    Element(XmlElement),
    /// Unescaped character data.
    Text(String),
}

/// An element with its attributes (in document order) and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds an element header from a quick-xml start tag, unescaping
    /// attribute values.
    pub fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = str::from_utf8(start.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Builder method to add an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Builder method to add a child element.
    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Returns the value of attribute `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of attribute `key` or a [`SmspackError::MissingAttribute`].
    pub fn require_attr(&self, element: &'static str, key: &'static str) -> Result<&str> {
        self.attr(key)
            .ok_or_else(|| SmspackError::missing_attribute(element, key))
    }

    /// Iterates over direct child elements named `name`.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'n> {
        self.children.iter().filter_map(move |node| match node {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Selects descendants along a path of direct-child names, like the
    /// relative XPath `parts/part`.
    pub fn select(&self, path: &[&str]) -> Vec<&XmlElement> {
        let mut current = vec![self];
        for step in path {
            current = current
                .into_iter()
                .flat_map(|e| e.children_named(*step))
                .collect();
        }
        current
    }

    /// Serializes the element back to XML.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            push_attr_value(value, out);
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(e) => e.write_xml(out),
                XmlNode::Text(t) => out.push_str(&partial_escape(t)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Escapes an attribute value, keeping whitespace that attribute-value
/// normalization would otherwise turn into spaces.
fn push_attr_value(value: &str, out: &mut String) {
    for c in escape(value).chars() {
        match c {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlElement {
        XmlElement::new("mms")
            .with_attr("ct_t", "application/vnd.wap.multipart.related")
            .with_child(
                XmlElement::new("parts")
                    .with_child(XmlElement::new("part").with_attr("seq", "0"))
                    .with_child(XmlElement::new("part").with_attr("seq", "1")),
            )
            .with_child(XmlElement::new("addrs").with_child(XmlElement::new("addr")))
    }

    #[test]
    fn test_attr_lookup() {
        let mms = sample();
        assert_eq!(
            mms.attr("ct_t"),
            Some("application/vnd.wap.multipart.related")
        );
        assert!(mms.attr("nope").is_none());
    }

    #[test]
    fn test_require_attr_missing() {
        let err = sample().require_attr("mms", "date").unwrap_err();
        assert!(matches!(
            err,
            SmspackError::MissingAttribute {
                element: "mms",
                attribute: "date"
            }
        ));
    }

    #[test]
    fn test_select_path() {
        let mms = sample();
        let parts = mms.select(&["parts", "part"]);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].attr("seq"), Some("1"));
        assert_eq!(mms.select(&["addrs", "addr"]).len(), 1);
        assert!(mms.select(&["part"]).is_empty());
    }

    #[test]
    fn test_to_xml_escapes() {
        let part = XmlElement::new("part")
            .with_attr("ct", "text/x-vCard")
            .with_attr("text", "a \"quoted\" <b> & c\nline");
        assert_eq!(
            part.to_xml(),
            r#"<part ct="text/x-vCard" text="a &quot;quoted&quot; &lt;b&gt; &amp; c&#10;line"/>"#
        );
    }

    #[test]
    fn test_to_xml_keeps_attribute_whitespace() {
        let part = XmlElement::new("part").with_attr("text", "a\tb\r\nc 'd'");
        let xml = part.to_xml();
        assert_eq!(xml, r#"<part text="a&#9;b&#13;&#10;c &apos;d&apos;"/>"#);

        let reparsed = BytesStart::from_content(&xml[1..xml.len() - 2], 4);
        let element = XmlElement::from_start(&reparsed).unwrap();
        assert_eq!(element.attr("text"), Some("a\tb\r\nc 'd'"));
    }

    #[test]
    fn test_to_xml_nested() {
        let mut outer = XmlElement::new("part");
        outer.children.push(XmlNode::Text("x < y".into()));
        outer.children.push(XmlNode::Element(XmlElement::new("inner")));
        assert_eq!(outer.to_xml(), "<part>x &lt; y<inner/></part>");
    }

    #[test]
    fn test_from_start_unescapes() {
        let start = BytesStart::from_content(r#"sms body="a &amp; b &#65;""#, 3);
        let element = XmlElement::from_start(&start).unwrap();
        assert_eq!(element.name, "sms");
        assert_eq!(element.attr("body"), Some("a & b A"));
    }
}
