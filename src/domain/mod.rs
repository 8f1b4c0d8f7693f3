//! Domain layer - Core values of the toast library
//!
//! Contains value objects (templates, argument maps, identities) and domain
//! errors. This layer has no dependencies on OS services.

pub mod arguments;
pub mod clsid;
pub mod config;
pub mod error;
pub mod identity;
pub mod payload;
pub mod template;

// Re-export common types
pub use arguments::ToastArguments;
pub use clsid::Clsid;
pub use config::ToastConfig;
pub use error::*;
pub use identity::{configure_aumi, AppIdentity, ShortcutPolicy, ShortcutResult};
pub use payload::{CompiledToast, FileTime, ToastXml, XmlElement, XmlToast};
pub use template::{
    AudioOption, AudioSystemFile, Scenario, TemplateType, TextField, ToastDuration,
    ToastTemplate,
};
