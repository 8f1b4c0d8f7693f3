//! Registry port interface

use crate::domain::error::PlatformError;

/// Port for string values below `HKEY_CURRENT_USER`
pub trait RegistryStore {
    /// Write a string value, creating `subkey` as needed.
    /// An empty `name` addresses the key's default value.
    fn set_string(&self, subkey: &str, name: &str, value: &str) -> Result<(), PlatformError>;

    fn delete_value(&self, subkey: &str, name: &str) -> Result<(), PlatformError>;

    /// Delete a key that has no subkeys
    fn delete_key(&self, subkey: &str) -> Result<(), PlatformError>;
}
