//! Legacy toast template catalog
//!
//! Same skeletons the OS hands out for the eight legacy layouts: a `visual`
//! binding named after the layout, an optional `image id="1"`, and one `text`
//! node per declared line.

use super::xml::{ToastXml, XmlElement};
use crate::domain::template::TemplateType;

/// Skeleton payload for a template type
pub fn template_skeleton(kind: TemplateType) -> ToastXml {
    let mut binding = XmlElement::new("binding").with_attribute("template", kind.catalog_name());

    if kind.has_image() {
        binding = binding.with_child(
            XmlElement::new("image")
                .with_attribute("id", "1")
                .with_attribute("src", ""),
        );
    }

    for id in 1..=kind.text_fields_count() {
        binding = binding.with_child(XmlElement::new("text").with_attribute("id", id.to_string()));
    }

    ToastXml::new(XmlElement::new("toast").with_child(XmlElement::new("visual").with_child(binding)))
}
