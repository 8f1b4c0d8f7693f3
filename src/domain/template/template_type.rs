//! Template type value object

use std::fmt;

/// Text field counts per template type, indexed by ordinal
const TEXT_FIELDS_COUNT: [usize; 8] = [1, 2, 2, 3, 1, 2, 2, 3];

/// All template types, in ordinal order
pub const ALL_TEMPLATE_TYPES: &[TemplateType] = &[
    TemplateType::ImageAndText01,
    TemplateType::ImageAndText02,
    TemplateType::ImageAndText03,
    TemplateType::ImageAndText04,
    TemplateType::Text01,
    TemplateType::Text02,
    TemplateType::Text03,
    TemplateType::Text04,
];

/// Notification layout: {with image, text only} x {1, 2, 2, 3} lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TemplateType {
    ImageAndText01,
    #[default]
    ImageAndText02,
    ImageAndText03,
    ImageAndText04,
    Text01,
    Text02,
    Text03,
    Text04,
}

impl TemplateType {
    const fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Number of text lines this layout declares
    pub const fn text_fields_count(&self) -> usize {
        TEXT_FIELDS_COUNT[self.ordinal()]
    }

    /// Image-bearing layouts are the ones ordered before `Text01`
    pub fn has_image(&self) -> bool {
        *self < Self::Text01
    }

    /// Name of the layout in the OS template catalog
    pub const fn catalog_name(&self) -> &'static str {
        match self {
            Self::ImageAndText01 => "ToastImageAndText01",
            Self::ImageAndText02 => "ToastImageAndText02",
            Self::ImageAndText03 => "ToastImageAndText03",
            Self::ImageAndText04 => "ToastImageAndText04",
            Self::Text01 => "ToastText01",
            Self::Text02 => "ToastText02",
            Self::Text03 => "ToastText03",
            Self::Text04 => "ToastText04",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_name())
    }
}

/// Position of a text line inside a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    FirstLine,
    SecondLine,
    ThirdLine,
}

impl TextField {
    pub const fn index(&self) -> usize {
        match self {
            Self::FirstLine => 0,
            Self::SecondLine => 1,
            Self::ThirdLine => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_counts_match_table() {
        let counts: Vec<usize> = ALL_TEMPLATE_TYPES
            .iter()
            .map(TemplateType::text_fields_count)
            .collect();
        assert_eq!(counts, vec![1, 2, 2, 3, 1, 2, 2, 3]);
    }

    #[test]
    fn only_first_four_have_images() {
        let with_image: Vec<bool> = ALL_TEMPLATE_TYPES.iter().map(|t| t.has_image()).collect();
        assert_eq!(
            with_image,
            vec![true, true, true, true, false, false, false, false]
        );
    }

    #[test]
    fn default_is_image_and_text_02() {
        assert_eq!(TemplateType::default(), TemplateType::ImageAndText02);
    }

    #[test]
    fn catalog_names() {
        assert_eq!(TemplateType::Text02.to_string(), "ToastText02");
        assert_eq!(
            TemplateType::ImageAndText04.catalog_name(),
            "ToastImageAndText04"
        );
    }
}
