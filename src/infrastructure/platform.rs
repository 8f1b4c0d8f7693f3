//! Adapter selection for the current platform

use crate::application::Toaster;

#[cfg(windows)]
use super::winrt::{CurrentUserRegistry, ShellLinks, WinRtBackend};

#[cfg(not(windows))]
use super::unsupported::{UnsupportedBackend, UnsupportedRegistry, UnsupportedShellLinks};

/// Toaster wired to the OS services of this platform
#[cfg(windows)]
pub type PlatformToaster = Toaster<WinRtBackend, ShellLinks, CurrentUserRegistry>;

/// Toaster wired to the OS services of this platform
#[cfg(not(windows))]
pub type PlatformToaster = Toaster<UnsupportedBackend, UnsupportedShellLinks, UnsupportedRegistry>;

/// Create a toaster for this platform. The identity is still unset.
pub fn create_toaster() -> PlatformToaster {
    #[cfg(windows)]
    {
        Toaster::new(WinRtBackend::new(), ShellLinks::new(), CurrentUserRegistry::new())
    }

    #[cfg(not(windows))]
    {
        tracing::debug!("No toast notification center on this platform");
        Toaster::new(UnsupportedBackend, UnsupportedShellLinks, UnsupportedRegistry)
    }
}
