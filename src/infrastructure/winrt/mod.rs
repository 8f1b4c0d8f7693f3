//! Windows adapters
//!
//! WinRT toast notifier, COM activator, `IShellLinkW` shortcuts and the
//! `HKEY_CURRENT_USER` registry. COM objects are `windows` crate smart
//! pointers and are released when they go out of scope.

mod activator;
mod backend;
mod registry;
mod shell_link;

pub use backend::WinRtBackend;
pub use registry::CurrentUserRegistry;
pub use shell_link::ShellLinks;

use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::System::Com::{CoInitializeEx, COINIT_MULTITHREADED};

use crate::domain::error::PlatformError;

/// Attach a failing call's name to the OS error
fn os_error(operation: &str, err: windows::core::Error) -> PlatformError {
    PlatformError::Os {
        operation: operation.to_string(),
        code: err.code().0 as u32,
        message: err.message(),
    }
}

/// Make sure COM is usable on this thread. A thread already in a
/// single-threaded apartment is fine for in-process shell objects.
fn ensure_com() -> Result<(), PlatformError> {
    let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };
    if hr.is_err() && hr != RPC_E_CHANGED_MODE {
        return Err(os_error("CoInitializeEx", hr.into()));
    }
    Ok(())
}
