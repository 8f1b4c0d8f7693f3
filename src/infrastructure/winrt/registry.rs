//! `HKEY_CURRENT_USER` registry adapter

use winreg::enums::{HKEY_CURRENT_USER, KEY_SET_VALUE};
use winreg::RegKey;

use crate::application::ports::RegistryStore;
use crate::domain::error::PlatformError;

/// Per-user registry hive
pub struct CurrentUserRegistry {
    root: RegKey,
}

impl CurrentUserRegistry {
    pub fn new() -> Self {
        Self {
            root: RegKey::predef(HKEY_CURRENT_USER),
        }
    }
}

impl Default for CurrentUserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryStore for CurrentUserRegistry {
    fn set_string(&self, subkey: &str, name: &str, value: &str) -> Result<(), PlatformError> {
        let (key, _) = self
            .root
            .create_subkey(subkey)
            .map_err(|e| PlatformError::io(format!("create key {}", subkey), e))?;
        key.set_value(name, &value)
            .map_err(|e| PlatformError::io(format!("set {}\\{}", subkey, name), e))
    }

    fn delete_value(&self, subkey: &str, name: &str) -> Result<(), PlatformError> {
        let key = self
            .root
            .open_subkey_with_flags(subkey, KEY_SET_VALUE)
            .map_err(|e| PlatformError::io(format!("open key {}", subkey), e))?;
        key.delete_value(name)
            .map_err(|e| PlatformError::io(format!("delete {}\\{}", subkey, name), e))
    }

    fn delete_key(&self, subkey: &str) -> Result<(), PlatformError> {
        self.root
            .delete_subkey(subkey)
            .map_err(|e| PlatformError::io(format!("delete key {}", subkey), e))
    }
}
