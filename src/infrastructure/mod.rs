//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the WinRT
//! notification center, COM activator, shell links and registry on Windows,
//! inert adapters elsewhere, in-memory adapters for tests (`test-util`
//! feature), and the config file store.

pub mod config;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod platform;
pub mod unsupported;
#[cfg(windows)]
pub mod winrt;

// Re-export adapters
pub use config::XdgConfigStore;
#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryBackend, MemoryRegistry, MemoryShellLinks};
pub use platform::{create_toaster, PlatformToaster};
pub use unsupported::{UnsupportedBackend, UnsupportedRegistry, UnsupportedShellLinks};
#[cfg(windows)]
pub use winrt::{CurrentUserRegistry, ShellLinks, WinRtBackend};
