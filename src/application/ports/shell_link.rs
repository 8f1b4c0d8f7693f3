//! Start menu shortcut port interface

use std::path::{Path, PathBuf};

use crate::domain::error::PlatformError;

/// Port for `.lnk` files carrying an AUMI property
pub trait ShellLinkStore {
    /// Where the shortcut for `app_name` lives
    fn shortcut_path(&self, app_name: &str) -> Result<PathBuf, PlatformError>;

    fn exists(&self, path: &Path) -> bool;

    /// Read the AUMI stored on an existing shortcut
    fn read_aumi(&self, path: &Path) -> Result<String, PlatformError>;

    /// Rewrite the AUMI of an existing shortcut and persist it
    fn write_aumi(&self, path: &Path, aumi: &str) -> Result<(), PlatformError>;

    /// Create a shortcut to `target`, started in the target's directory,
    /// with the AUMI set
    fn create(&self, path: &Path, target: &Path, aumi: &str) -> Result<(), PlatformError>;
}
