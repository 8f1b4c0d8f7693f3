//! Template-to-payload compiler
//!
//! Turns a [`ToastTemplate`] into the XML payload the notification center
//! renders. The skeleton comes from the backend's template catalog; the
//! compiler fills the text lines, adds the features newer OS releases
//! understand, and resolves the expiration offset into an absolute time.

use chrono::Utc;

use crate::domain::arguments::ToastArguments;
use crate::domain::error::PayloadError;
use crate::domain::payload::{CompiledToast, FileTime, ToastXml, XmlElement};
use crate::domain::template::{AudioOption, ToastDuration, ToastTemplate};

/// Longest image `src` the OS accepts, including the `file:///` prefix
pub const MAX_PATH: usize = 260;

const IMAGE_SCHEME: &str = "file:///";

/// Ticks between 1601-01-01 and the Unix epoch
const UNIX_EPOCH_FILE_TIME: i64 = 116_444_736_000_000_000;
const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Current UTC time as file-time ticks
pub fn file_time_now() -> FileTime {
    let now = Utc::now();
    now.timestamp() * 10_000_000
        + i64::from(now.timestamp_subsec_nanos() / 100)
        + UNIX_EPOCH_FILE_TIME
}

/// Builds toast payloads from templates
#[derive(Debug, Clone, Copy)]
pub struct PayloadCompiler {
    modern: bool,
}

impl PayloadCompiler {
    /// `modern` enables actions, audio, attribution, duration and scenario
    pub fn new(modern: bool) -> Self {
        Self { modern }
    }

    /// Compile `template` on top of `skeleton`.
    ///
    /// `now` is the file time the expiration offset is added to.
    pub fn compile(
        &self,
        template: &ToastTemplate,
        mut skeleton: ToastXml,
        now: FileTime,
    ) -> Result<CompiledToast, PayloadError> {
        fill_text_fields(&mut skeleton, template)?;

        if self.modern {
            if !template.attribution_text().is_empty() {
                add_attribution(&mut skeleton, template.attribution_text())?;
            }
            for (index, label) in template.actions().iter().enumerate() {
                add_action(&mut skeleton, index, label);
            }
            if template.audio_path().is_empty() && template.audio_option() == AudioOption::Default
            {
                set_audio(&mut skeleton, template.audio_path(), template.audio_option());
            }

            let toast = skeleton.root_mut();
            match template.duration() {
                ToastDuration::System => {}
                ToastDuration::Short => toast.set_attribute("duration", "short"),
                ToastDuration::Long => toast.set_attribute("duration", "long"),
            }
            toast.set_attribute("scenario", template.scenario());
        } else {
            tracing::debug!("Modern features (actions, audio, attribution) not supported on this OS version");
        }

        if template.has_image() {
            set_image(&mut skeleton, template.image_path())?;
        }

        let expiration = match template.expiration() {
            offset if offset > 0 => Some(expiration_time(now, offset)?),
            _ => None,
        };

        Ok(CompiledToast {
            payload: skeleton,
            expiration,
        })
    }
}

fn expiration_time(now: FileTime, offset_ms: i64) -> Result<FileTime, PayloadError> {
    offset_ms
        .checked_mul(TICKS_PER_MILLISECOND)
        .and_then(|ticks| now.checked_add(ticks))
        .ok_or(PayloadError::ExpirationOutOfRange {
            milliseconds: offset_ms,
        })
}

fn fill_text_fields(payload: &mut ToastXml, template: &ToastTemplate) -> Result<(), PayloadError> {
    let mut nodes = payload.root_mut().descendants_named_mut("text");
    let declared = template.text_fields_count();
    if nodes.len() < declared {
        return Err(PayloadError::TextFieldMismatch {
            declared,
            available: nodes.len(),
        });
    }
    for (node, line) in nodes.iter_mut().zip(template.text_fields()) {
        node.set_text(line.as_str());
    }
    Ok(())
}

fn add_attribution(payload: &mut ToastXml, text: &str) -> Result<(), PayloadError> {
    let binding = payload
        .first_mut("binding")
        .ok_or(PayloadError::MissingElement("binding"))?;
    let mut attribution = XmlElement::new("text").with_attribute("placement", "attribution");
    attribution.set_text(text);
    binding.append_child(attribution);
    Ok(())
}

/// The first action switches the toast to the generic template and a long duration
fn add_action(payload: &mut ToastXml, index: usize, label: &str) {
    let mut arguments = ToastArguments::new();
    arguments.add("actionId", index.to_string());

    let action = XmlElement::new("action")
        .with_attribute("content", label)
        .with_attribute("arguments", arguments.to_string());

    if payload.first("actions").is_none() {
        let toast = payload.root_mut();
        toast.set_attribute("template", "ToastGeneric");
        toast.set_attribute("duration", "long");
        toast.append_child(XmlElement::new("actions"));
    }
    if let Some(actions) = payload.first_mut("actions") {
        actions.append_child(action);
    }
}

fn set_audio(payload: &mut ToastXml, path: &str, option: AudioOption) {
    if payload.first("audio").is_none() {
        payload.root_mut().append_child(XmlElement::new("audio"));
    }
    let Some(audio) = payload.first_mut("audio") else {
        return;
    };

    if !path.is_empty() {
        audio.set_attribute("src", path);
    }
    match option {
        AudioOption::Loop => audio.set_attribute("loop", "true"),
        AudioOption::Silent => audio.set_attribute("silent", "true"),
        AudioOption::Default => {}
    }
}

fn set_image(payload: &mut ToastXml, path: &str) -> Result<(), PayloadError> {
    let src = format!("{}{}", IMAGE_SCHEME, path);
    let length = src.encode_utf16().count();
    if length >= MAX_PATH {
        return Err(PayloadError::PathTooLong {
            length,
            limit: MAX_PATH,
        });
    }
    let image = payload
        .first_mut("image")
        .ok_or(PayloadError::MissingElement("image"))?;
    image.set_attribute("src", src);
    Ok(())
}
