//! Minimal element tree for toast payloads
//!
//! Toast XML never mixes text and child elements inside one node, so an
//! element carries either inner text or children. The tree renders to the
//! string the OS XML DOM loads and parses back from the string it hands out.

use std::fmt;
use std::str::FromStr;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::domain::error::PayloadError;

/// One XML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`XmlElement::set_attribute`]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`XmlElement::append_child`]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any previous value and keeping its position
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Append a child and return a handle to it
    pub fn append_child(&mut self, child: XmlElement) -> &mut XmlElement {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// First element with this name in document order, self included
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(name))
    }

    /// Every element with this name in document order, self included
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect(name, found);
        }
    }

    /// Mutable descendants with this name in document order.
    /// Matching elements are not searched further.
    pub fn descendants_named_mut<'a>(&'a mut self, name: &str) -> Vec<&'a mut XmlElement> {
        let mut found = Vec::new();
        self.collect_mut(name, &mut found);
        found
    }

    fn collect_mut<'a>(&'a mut self, name: &str, found: &mut Vec<&'a mut XmlElement>) {
        for child in self.children.iter_mut() {
            if child.name == name {
                found.push(child);
            } else {
                child.collect_mut(name, found);
            }
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        if self.text.is_empty() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        out.push_str(&escape(self.text.as_str()));
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, PayloadError> {
        let mut element = XmlElement::new(utf8(start.name().as_ref())?);
        for attribute in start.attributes() {
            let attribute = attribute.map_err(malformed)?;
            let value = attribute.unescape_value().map_err(malformed)?;
            element.set_attribute(utf8(attribute.key.as_ref())?, value.into_owned());
        }
        Ok(element)
    }
}

fn utf8(bytes: &[u8]) -> Result<String, PayloadError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(malformed)
}

fn malformed(err: impl fmt::Display) -> PayloadError {
    PayloadError::Malformed(err.to_string())
}

/// Hang a finished element under the open parent, or make it the root
fn attach(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), PayloadError> {
    match open.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(PayloadError::Malformed(format!(
            "second root element <{}>",
            element.name
        ))),
    }
}

/// A complete toast document rooted at `<toast>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastXml {
    root: XmlElement,
}

impl ToastXml {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// Parse a document. The root element must be `<toast>`.
    ///
    /// Declarations, comments and whitespace between elements are dropped.
    pub fn parse(source: &str) -> Result<Self, PayloadError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(true);

        let mut open: Vec<XmlElement> = Vec::new();
        let mut root = None;
        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(start) => open.push(XmlElement::from_start(&start)?),
                Event::Empty(start) => {
                    attach(&mut open, &mut root, XmlElement::from_start(&start)?)?
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| PayloadError::Malformed("unexpected end tag".to_string()))?;
                    attach(&mut open, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(malformed)?;
                    match open.last_mut() {
                        Some(element) => element.text.push_str(&text),
                        None => return Err(malformed(format!("text outside the root: {}", text))),
                    }
                }
                Event::CData(data) => {
                    if let Some(element) = open.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = open.last() {
            return Err(malformed(format!("<{}> is never closed", element.name)));
        }
        match root {
            Some(root) if root.name == "toast" => Ok(Self { root }),
            Some(root) => Err(malformed(format!("root is <{}>, expected <toast>", root.name))),
            None => Err(malformed("empty document")),
        }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    pub fn first(&self, name: &str) -> Option<&XmlElement> {
        self.root.find(name)
    }

    pub fn first_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.root.find_mut(name)
    }

    pub fn elements(&self, name: &str) -> Vec<&XmlElement> {
        self.root.find_all(name)
    }

    pub fn count(&self, name: &str) -> usize {
        self.elements(name).len()
    }

    /// Serialize the document
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.root.write_to(&mut out);
        out
    }
}

impl FromStr for ToastXml {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ToastXml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToastXml {
        ToastXml::new(
            XmlElement::new("toast").with_child(
                XmlElement::new("visual").with_child(
                    XmlElement::new("binding")
                        .with_attribute("template", "ToastText02")
                        .with_child(XmlElement::new("text").with_attribute("id", "1"))
                        .with_child(XmlElement::new("text").with_attribute("id", "2")),
                ),
            ),
        )
    }

    #[test]
    fn renders_self_closing_and_nested() {
        let xml = sample().to_xml_string();
        assert_eq!(
            xml,
            "<toast><visual><binding template=\"ToastText02\"><text id=\"1\"/><text id=\"2\"/></binding></visual></toast>"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut element = XmlElement::new("action").with_attribute("content", "Say \"hi\" & <go>");
        element.set_text("a < b & c");
        let xml = ToastXml::new(element).to_xml_string();
        assert!(xml.contains("content=\"Say &quot;hi&quot; &amp; &lt;go&gt;\""));
        assert!(xml.contains(">a &lt; b &amp; c</action>"));
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let mut element = XmlElement::new("toast")
            .with_attribute("duration", "short")
            .with_attribute("scenario", "Default");
        element.set_attribute("duration", "long");
        assert_eq!(element.attribute("duration"), Some("long"));
        let xml = ToastXml::new(element).to_xml_string();
        assert_eq!(xml, "<toast duration=\"long\" scenario=\"Default\"/>");
    }

    #[test]
    fn descendants_in_document_order() {
        let mut doc = sample();
        let texts = doc.root_mut().descendants_named_mut("text");
        assert_eq!(texts.len(), 2);
        for (index, text) in texts.into_iter().enumerate() {
            text.set_text(format!("line {}", index));
        }
        let texts = doc.elements("text");
        assert_eq!(texts[0].text(), "line 0");
        assert_eq!(texts[1].text(), "line 1");
    }

    #[test]
    fn first_and_count() {
        let doc = sample();
        assert_eq!(doc.count("text"), 2);
        assert_eq!(
            doc.first("binding").and_then(|b| b.attribute("template")),
            Some("ToastText02")
        );
        assert!(doc.first("actions").is_none());
    }

    #[test]
    fn parses_catalog_shaped_document() {
        let source = r#"<?xml version="1.0"?>
            <toast>
              <visual>
                <binding template="ToastText02">
                  <text id="1"></text>
                  <text id="2"></text>
                </binding>
              </visual>
            </toast>"#;
        assert_eq!(ToastXml::parse(source).unwrap(), sample());
    }

    #[test]
    fn parse_decodes_entities() {
        let doc: ToastXml =
            "<toast launch=\"a=1&amp;b\"><visual><binding><text>Fish &amp; chips &lt;3</text></binding></visual></toast>"
                .parse()
                .unwrap();
        assert_eq!(doc.root().attribute("launch"), Some("a=1&b"));
        assert_eq!(doc.first("text").unwrap().text(), "Fish & chips <3");
    }

    #[test]
    fn rendered_output_parses_back() {
        let mut element = XmlElement::new("toast").with_attribute("launch", "say \"hi\" & <go>");
        element.append_child(XmlElement::new("text")).set_text("O'Brien & <co>");
        let doc = ToastXml::new(element);
        assert_eq!(ToastXml::parse(&doc.to_xml_string()).unwrap(), doc);
    }

    #[test]
    fn parse_rejects_other_roots() {
        let err = ToastXml::parse("<tile><visual/></tile>").unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(message) if message.contains("<tile>")));
    }

    #[test]
    fn parse_rejects_broken_documents() {
        assert!(ToastXml::parse("").is_err());
        assert!(ToastXml::parse("<toast><visual></toast>").is_err());
        assert!(ToastXml::parse("<toast>").is_err());
        assert!(ToastXml::parse("<toast/><toast/>").is_err());
    }
}
