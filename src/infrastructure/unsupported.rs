//! Adapters for platforms without a toast notification center
//!
//! The backend reports itself incompatible, so the toaster stops at the
//! first initialization step. Every OS call fails with
//! [`PlatformError::Unsupported`].

use std::path::{Path, PathBuf};

use crate::application::activation::ActivationSink;
use crate::application::ports::{NotificationBackend, RegistryStore, ShellLinkStore};
use crate::domain::clsid::Clsid;
use crate::domain::error::PlatformError;
use crate::domain::payload::CompiledToast;

/// Notification backend that supports nothing
#[derive(Debug, Default)]
pub struct UnsupportedBackend;

impl UnsupportedBackend {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationBackend for UnsupportedBackend {
    type Handle = ();

    fn is_compatible(&self) -> bool {
        false
    }

    fn supports_modern_features(&self) -> bool {
        false
    }

    fn initialize_apartment(&mut self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn set_process_aumi(&mut self, _aumi: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn register_activator(
        &mut self,
        _clsid: &Clsid,
        _sink: ActivationSink,
    ) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn create(&self, _toast: &CompiledToast) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn show(&self, _aumi: &str, _handle: &()) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn hide(&self, _aumi: &str, _handle: &()) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn remove_scheduled(&self, _aumi: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn clear_history(&self, _aumi: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }
}

/// Shortcut store with no Start menu behind it
#[derive(Debug, Default)]
pub struct UnsupportedShellLinks;

impl ShellLinkStore for UnsupportedShellLinks {
    fn shortcut_path(&self, _app_name: &str) -> Result<PathBuf, PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn exists(&self, _path: &Path) -> bool {
        false
    }

    fn read_aumi(&self, _path: &Path) -> Result<String, PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn write_aumi(&self, _path: &Path, _aumi: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn create(&self, _path: &Path, _target: &Path, _aumi: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }
}

/// Registry store with no registry behind it
#[derive(Debug, Default)]
pub struct UnsupportedRegistry;

impl RegistryStore for UnsupportedRegistry {
    fn set_string(&self, _subkey: &str, _name: &str, _value: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn delete_value(&self, _subkey: &str, _name: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn delete_key(&self, _subkey: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Toaster;
    use crate::domain::error::ToastError;
    use crate::domain::identity::{AppIdentity, ShortcutPolicy, ShortcutResult};

    #[test]
    fn toaster_reports_system_not_supported() {
        let mut toaster = Toaster::new(UnsupportedBackend, UnsupportedShellLinks, UnsupportedRegistry);
        toaster.set_identity(AppIdentity::new("Contoso", "Contoso.App"));
        assert_eq!(toaster.initialize(), Err(ToastError::SystemNotSupported));
        assert_eq!(toaster.create_shortcut(), ShortcutResult::IncompatibleOs);
    }

    #[test]
    fn uninstall_is_silent() {
        let mut toaster = Toaster::new(UnsupportedBackend, UnsupportedShellLinks, UnsupportedRegistry);
        toaster
            .set_identity(AppIdentity::new("Contoso", "Contoso.App"))
            .set_shortcut_policy(ShortcutPolicy::Ignore);
        toaster.uninstall();
    }
}
