//! Activation registration
//!
//! Registry layout, all below `HKEY_CURRENT_USER`:
//!
//! ```text
//! SOFTWARE\Classes\CLSID\{clsid}\LocalServer32   (default) = "<exe>" -ToastActivated
//! SOFTWARE\Classes\AppUserModelId\<aumi>         DisplayName, IconUri,
//!                                                IconBackgroundColor, CustomActivator
//! ```

use std::path::Path;

use crate::application::activation::ActivationSink;
use crate::application::ports::{NotificationBackend, RegistryStore};
use crate::domain::clsid::Clsid;
use crate::domain::error::PlatformError;
use crate::domain::identity::AppIdentity;

/// Command-line flag the OS passes when it launches the app to deliver an activation
pub const ACTIVATION_FLAG: &str = "-ToastActivated";

const CLSID_ROOT: &str = r"SOFTWARE\Classes\CLSID";
const AUMI_ROOT: &str = r"SOFTWARE\Classes\AppUserModelId";

pub fn identity_key(aumi: &str) -> String {
    format!(r"{}\{}", AUMI_ROOT, aumi)
}

pub fn clsid_key(clsid: &Clsid) -> String {
    format!(r"{}\{}", CLSID_ROOT, clsid.braced())
}

pub fn local_server_key(clsid: &Clsid) -> String {
    format!(r"{}\LocalServer32", clsid_key(clsid))
}

/// Writes and removes the registry entries that route activations to this app
pub struct ActivationRegistration<'a, R: RegistryStore> {
    registry: &'a R,
}

impl<'a, R: RegistryStore> ActivationRegistration<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    /// Register the activator with the backend and point the class id at `executable`
    pub fn register<B: NotificationBackend>(
        &self,
        backend: &mut B,
        clsid: &Clsid,
        executable: &Path,
        sink: ActivationSink,
    ) -> Result<(), PlatformError> {
        backend.register_activator(clsid, sink)?;

        let command = format!("\"{}\" {}", executable.display(), ACTIVATION_FLAG);
        self.registry
            .set_string(&local_server_key(clsid), "", &command)?;
        tracing::debug!(%clsid, %command, "Activator registered");
        Ok(())
    }

    /// Publish the display metadata the notification center shows for the AUMI
    pub fn write_identity(&self, identity: &AppIdentity, clsid: &Clsid) -> Result<(), PlatformError> {
        let key = identity_key(&identity.aumi);
        self.registry
            .set_string(&key, "DisplayName", &identity.app_name)?;

        match identity.icon_path.as_deref().filter(|p| !p.is_empty()) {
            Some(icon) => {
                self.registry
                    .set_string(&key, "IconUri", &format!("file:///{}", icon))?;
            }
            None => self.delete_optional(&key, "IconUri"),
        }

        // Only shown on the settings page; hex without leading '#', e.g. FFDDDDDD
        match identity
            .icon_background_color
            .as_deref()
            .filter(|c| !c.is_empty())
        {
            Some(color) => {
                self.registry
                    .set_string(&key, "IconBackgroundColor", color)?;
            }
            None => self.delete_optional(&key, "IconBackgroundColor"),
        }

        self.registry
            .set_string(&key, "CustomActivator", &clsid.braced())?;
        Ok(())
    }

    fn delete_optional(&self, key: &str, name: &str) {
        if let Err(e) = self.registry.delete_value(key, name) {
            tracing::debug!("Could not delete {}, probably never set: {}", name, e);
        }
    }

    /// Remove everything the app registered. Never fails; errors are logged.
    pub fn uninstall<B: NotificationBackend>(&self, backend: &B, aumi: &str, clsid: Option<&Clsid>) {
        if aumi.is_empty() {
            return;
        }

        if let Err(e) = backend.remove_scheduled(aumi) {
            tracing::warn!("Failed to remove scheduled toasts: {}", e);
        }
        if let Err(e) = backend.clear_history(aumi) {
            tracing::warn!("Failed to clear toast history: {}", e);
        }

        let mut keys = vec![identity_key(aumi)];
        if let Some(clsid) = clsid {
            keys.push(local_server_key(clsid));
            keys.push(clsid_key(clsid));
        }
        for key in keys {
            if let Err(e) = self.registry.delete_key(&key) {
                tracing::warn!("Failed to delete registry key {}: {}", key, e);
            }
        }
    }
}
