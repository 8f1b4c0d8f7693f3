//! Application layer - Use cases and port interfaces
//!
//! Contains the toast operations (compile, show, register, uninstall) and
//! the trait definitions for the OS services they drive.

pub mod activation;
pub mod compiler;
pub mod ports;
pub mod registration;
pub mod shortcut;
pub mod toaster;

// Re-export use cases
pub use activation::{Activation, ActivationHandler, ActivationRouter, ActivationSink, UserInput};
pub use compiler::{file_time_now, PayloadCompiler, MAX_PATH};
pub use registration::{ActivationRegistration, ACTIVATION_FLAG};
pub use shortcut::ShortcutManager;
pub use toaster::{ToastId, Toaster};
