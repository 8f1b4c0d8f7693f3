//! In-memory adapters
//!
//! Stand-ins for the OS services that record every call. Compiled for the
//! crate's own tests and, outside of it, behind the `test-util` feature.

mod backend;
mod registry;
mod shell_link;

pub use backend::{BackendCall, MemoryBackend, MemoryToast};
pub use registry::MemoryRegistry;
pub use shell_link::MemoryShellLinks;
