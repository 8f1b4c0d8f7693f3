//! Toast template value object

use super::audio::{AudioOption, AudioSystemFile, Scenario, ToastDuration};
use super::template_type::{TemplateType, TextField};

/// Description of a single notification: text, image, audio, actions and
/// display hints.
///
/// The number of text lines is fixed by the [`TemplateType`] chosen at
/// construction. Writing a line the layout does not declare is a programming
/// error and panics; check [`ToastTemplate::text_fields_count`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastTemplate {
    kind: TemplateType,
    text_fields: Vec<String>,
    actions: Vec<String>,
    image_path: String,
    audio_path: String,
    attribution_text: String,
    scenario: Scenario,
    expiration_ms: i64,
    audio_option: AudioOption,
    duration: ToastDuration,
}

impl ToastTemplate {
    /// Create an empty template for the given layout
    pub fn new(kind: TemplateType) -> Self {
        Self {
            kind,
            text_fields: vec![String::new(); kind.text_fields_count()],
            actions: Vec::new(),
            image_path: String::new(),
            audio_path: String::new(),
            attribution_text: String::new(),
            scenario: Scenario::Default,
            expiration_ms: 0,
            audio_option: AudioOption::Default,
            duration: ToastDuration::System,
        }
    }

    /// Set a text line.
    ///
    /// # Panics
    /// If `field` is not declared by this template's layout.
    pub fn set_text_field(&mut self, text: impl Into<String>, field: TextField) -> &mut Self {
        let position = field.index();
        assert!(
            position < self.text_fields.len(),
            "text field {} out of range for {} ({} fields)",
            position,
            self.kind,
            self.text_fields.len()
        );
        self.text_fields[position] = text.into();
        self
    }

    pub fn set_first_line(&mut self, text: impl Into<String>) -> &mut Self {
        self.set_text_field(text, TextField::FirstLine)
    }

    pub fn set_second_line(&mut self, text: impl Into<String>) -> &mut Self {
        self.set_text_field(text, TextField::SecondLine)
    }

    pub fn set_third_line(&mut self, text: impl Into<String>) -> &mut Self {
        self.set_text_field(text, TextField::ThirdLine)
    }

    /// Attribution line, shown below the body on newer OS releases
    pub fn set_attribution_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.attribution_text = text.into();
        self
    }

    /// Absolute path of the image shown by image-bearing layouts
    pub fn set_image_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.image_path = path.into();
        self
    }

    /// Free-form audio path or URI
    pub fn set_audio_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.audio_path = path.into();
        self
    }

    /// Pick one of the named system sounds
    pub fn set_audio_file(&mut self, file: AudioSystemFile) -> &mut Self {
        self.audio_path = file.uri().to_string();
        self
    }

    pub fn set_audio_option(&mut self, option: AudioOption) -> &mut Self {
        self.audio_option = option;
        self
    }

    pub fn set_duration(&mut self, duration: ToastDuration) -> &mut Self {
        self.duration = duration;
        self
    }

    /// Expire the toast this many milliseconds after it is shown (0 = never)
    pub fn set_expiration(&mut self, milliseconds_from_now: i64) -> &mut Self {
        self.expiration_ms = milliseconds_from_now;
        self
    }

    pub fn set_scenario(&mut self, scenario: Scenario) -> &mut Self {
        self.scenario = scenario;
        self
    }

    /// Append an action button
    pub fn add_action(&mut self, label: impl Into<String>) -> &mut Self {
        self.actions.push(label.into());
        self
    }

    pub fn text_fields_count(&self) -> usize {
        self.text_fields.len()
    }

    pub fn actions_count(&self) -> usize {
        self.actions.len()
    }

    pub fn has_image(&self) -> bool {
        self.kind.has_image()
    }

    pub fn text_fields(&self) -> &[String] {
        &self.text_fields
    }

    /// # Panics
    /// If `field` is not declared by this template's layout.
    pub fn text_field(&self, field: TextField) -> &str {
        let position = field.index();
        assert!(position < self.text_fields.len());
        &self.text_fields[position]
    }

    /// # Panics
    /// If `position` is not below [`ToastTemplate::actions_count`].
    pub fn action_label(&self, position: usize) -> &str {
        assert!(position < self.actions.len());
        &self.actions[position]
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn audio_path(&self) -> &str {
        &self.audio_path
    }

    pub fn attribution_text(&self) -> &str {
        &self.attribution_text
    }

    pub fn scenario(&self) -> &'static str {
        self.scenario.as_str()
    }

    pub fn expiration(&self) -> i64 {
        self.expiration_ms
    }

    pub fn kind(&self) -> TemplateType {
        self.kind
    }

    pub fn audio_option(&self) -> AudioOption {
        self.audio_option
    }

    pub fn duration(&self) -> ToastDuration {
        self.duration
    }
}

impl Default for ToastTemplate {
    fn default() -> Self {
        Self::new(TemplateType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::ALL_TEMPLATE_TYPES;

    #[test]
    fn new_allocates_declared_fields() {
        for kind in ALL_TEMPLATE_TYPES {
            let template = ToastTemplate::new(*kind);
            assert_eq!(template.text_fields_count(), kind.text_fields_count());
            assert!(template.text_fields().iter().all(String::is_empty));
        }
    }

    #[test]
    fn defaults() {
        let template = ToastTemplate::default();
        assert_eq!(template.kind(), TemplateType::ImageAndText02);
        assert_eq!(template.scenario(), "Default");
        assert_eq!(template.expiration(), 0);
        assert_eq!(template.audio_option(), AudioOption::Default);
        assert_eq!(template.duration(), ToastDuration::System);
        assert_eq!(template.actions_count(), 0);
    }

    #[test]
    fn builder_chains() {
        let mut template = ToastTemplate::new(TemplateType::Text04);
        template
            .set_first_line("one")
            .set_second_line("two")
            .set_third_line("three")
            .add_action("Ok")
            .add_action("Cancel")
            .set_scenario(Scenario::Reminder)
            .set_expiration(5000);

        assert_eq!(template.text_field(TextField::ThirdLine), "three");
        assert_eq!(template.action_label(1), "Cancel");
        assert_eq!(template.scenario(), "Reminder");
        assert_eq!(template.expiration(), 5000);
    }

    #[test]
    #[should_panic]
    fn setting_undeclared_field_panics() {
        let mut template = ToastTemplate::new(TemplateType::Text01);
        template.set_second_line("no room");
    }

    #[test]
    #[should_panic]
    fn third_line_on_two_line_template_panics() {
        let mut template = ToastTemplate::new(TemplateType::ImageAndText03);
        template.set_text_field("x", TextField::ThirdLine);
    }

    #[test]
    #[should_panic]
    fn reading_missing_action_panics() {
        ToastTemplate::default().action_label(0);
    }

    #[test]
    fn audio_file_sets_uri() {
        let mut template = ToastTemplate::default();
        template.set_audio_file(AudioSystemFile::Mail);
        assert_eq!(template.audio_path(), "ms-winsoundevent:Notification.Mail");
    }

    #[test]
    fn has_image_follows_kind() {
        assert!(ToastTemplate::new(TemplateType::ImageAndText01).has_image());
        assert!(!ToastTemplate::new(TemplateType::Text03).has_image());
    }
}
