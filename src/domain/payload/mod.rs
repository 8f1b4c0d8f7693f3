//! Toast payload document, template catalog and hand-written toasts

pub mod catalog;
pub mod raw;
pub mod xml;

pub use catalog::template_skeleton;
pub use raw::XmlToast;
pub use xml::{ToastXml, XmlElement};

/// Windows file-time ticks (100 ns units since 1601-01-01 UTC)
pub type FileTime = i64;

/// A fully compiled toast, ready for the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledToast {
    pub payload: ToastXml,
    /// Absolute expiration, when the template asked for one
    pub expiration: Option<FileTime>,
}
