//! Toasts written directly as XML

use std::fmt;
use std::str::FromStr;

use super::xml::ToastXml;
use crate::domain::error::PayloadError;

/// A toast whose payload the caller wrote by hand.
///
/// Nothing is compiled: the document goes to the notification center as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlToast {
    payload: ToastXml,
}

impl XmlToast {
    pub fn new(payload: ToastXml) -> Self {
        Self { payload }
    }

    pub fn parse(xml: &str) -> Result<Self, PayloadError> {
        ToastXml::parse(xml).map(Self::new)
    }

    /// The payload serialized again
    pub fn xml(&self) -> String {
        self.payload.to_xml_string()
    }

    /// Replace the payload. A document that does not parse leaves the
    /// current one in place.
    pub fn set_xml(&mut self, xml: &str) -> Result<(), PayloadError> {
        self.payload = ToastXml::parse(xml)?;
        Ok(())
    }

    pub fn payload(&self) -> &ToastXml {
        &self.payload
    }
}

impl From<ToastXml> for XmlToast {
    fn from(payload: ToastXml) -> Self {
        Self::new(payload)
    }
}

impl FromStr for XmlToast {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for XmlToast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.payload, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REMINDER: &str = r#"<toast scenario="reminder"><visual><binding template="ToastGeneric"><text>Standup</text></binding></visual></toast>"#;

    #[test]
    fn xml_is_normalized_rendering() {
        let toast = XmlToast::parse(REMINDER).unwrap();
        assert_eq!(toast.xml(), REMINDER);
        assert_eq!(toast.payload().first("text").unwrap().text(), "Standup");
    }

    #[test]
    fn set_xml_replaces_payload() {
        let mut toast: XmlToast = REMINDER.parse().unwrap();
        toast.set_xml("<toast><visual/></toast>").unwrap();
        assert_eq!(toast.xml(), "<toast><visual/></toast>");
    }

    #[test]
    fn failed_set_xml_keeps_previous_payload() {
        let mut toast = XmlToast::parse(REMINDER).unwrap();
        assert!(toast.set_xml("<toast>").is_err());
        assert_eq!(toast.xml(), REMINDER);
    }
}
