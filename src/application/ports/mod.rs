//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers: the OS notification center, the shell-link
//! subsystem, the per-user registry, and the CLI's config file.

pub mod backend;
pub mod config;
pub mod registry;
pub mod shell_link;

// Re-export common types
pub use backend::NotificationBackend;
pub use config::ConfigStore;
pub use registry::RegistryStore;
pub use shell_link::ShellLinkStore;
