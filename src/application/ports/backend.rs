//! Notification backend port interface

use crate::application::activation::ActivationSink;
use crate::domain::clsid::Clsid;
use crate::domain::error::PlatformError;
use crate::domain::payload::{template_skeleton, CompiledToast, ToastXml};
use crate::domain::template::TemplateType;

/// Port for the OS notification center and the COM plumbing around it.
///
/// Calls are synchronous; they map one-to-one onto OS services.
pub trait NotificationBackend {
    /// A created notification, kept by the toaster until it is hidden
    type Handle;

    /// Toasts are available at all (Windows 8 or later)
    fn is_compatible(&self) -> bool;

    /// Actions, audio, attribution and scenarios are available
    /// (OS major version above 6)
    fn supports_modern_features(&self) -> bool;

    /// Skeleton payload for a legacy template type.
    ///
    /// Defaults to the built-in catalog; the Windows backend asks the OS.
    fn template_content(&self, kind: TemplateType) -> Result<ToastXml, PlatformError> {
        Ok(template_skeleton(kind))
    }

    /// Join the multi-threaded apartment for this thread
    fn initialize_apartment(&mut self) -> Result<(), PlatformError>;

    /// Attach the AUMI to the running process
    fn set_process_aumi(&mut self, aumi: &str) -> Result<(), PlatformError>;

    /// Register the activation class factory; activations are forwarded to `sink`
    fn register_activator(&mut self, clsid: &Clsid, sink: ActivationSink)
        -> Result<(), PlatformError>;

    /// Build an OS notification object from a compiled payload
    fn create(&self, toast: &CompiledToast) -> Result<Self::Handle, PlatformError>;

    fn show(&self, aumi: &str, handle: &Self::Handle) -> Result<(), PlatformError>;

    fn hide(&self, aumi: &str, handle: &Self::Handle) -> Result<(), PlatformError>;

    /// Drop every scheduled (not yet shown) notification of the AUMI
    fn remove_scheduled(&self, aumi: &str) -> Result<(), PlatformError>;

    /// Clear the AUMI's entries from the notification center
    fn clear_history(&self, aumi: &str) -> Result<(), PlatformError>;
}
