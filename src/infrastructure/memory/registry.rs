//! In-memory registry hive

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::application::ports::RegistryStore;
use crate::domain::error::PlatformError;

type Values = BTreeMap<String, String>;

/// A `HKEY_CURRENT_USER` stand-in. Writing a value creates the key and all
/// of its ancestors, deleting a key with subkeys fails, like the real hive.
#[derive(Default)]
pub struct MemoryRegistry {
    keys: Mutex<BTreeMap<String, Values>>,
    fail_writes: bool,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Value stored under `subkey`; an empty `name` reads the default value
    pub fn value(&self, subkey: &str, name: &str) -> Option<String> {
        self.keys
            .lock()
            .get(subkey)
            .and_then(|values| values.get(name).cloned())
    }

    pub fn has_key(&self, subkey: &str) -> bool {
        self.keys.lock().contains_key(subkey)
    }
}

impl RegistryStore for MemoryRegistry {
    fn set_string(&self, subkey: &str, name: &str, value: &str) -> Result<(), PlatformError> {
        if self.fail_writes {
            return Err(PlatformError::Os {
                operation: format!("RegSetKeyValue({})", subkey),
                code: 5,
                message: "Access is denied.".to_string(),
            });
        }
        let mut keys = self.keys.lock();
        let mut ancestor = String::new();
        for part in subkey.split('\\') {
            if !ancestor.is_empty() {
                ancestor.push('\\');
            }
            ancestor.push_str(part);
            keys.entry(ancestor.clone()).or_default();
        }
        keys.entry(subkey.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete_value(&self, subkey: &str, name: &str) -> Result<(), PlatformError> {
        self.keys
            .lock()
            .get_mut(subkey)
            .and_then(|values| values.remove(name))
            .map(|_| ())
            .ok_or_else(|| PlatformError::NotFound(format!("{}\\{}", subkey, name)))
    }

    fn delete_key(&self, subkey: &str) -> Result<(), PlatformError> {
        let mut keys = self.keys.lock();
        let prefix = format!("{}\\", subkey);
        if keys.keys().any(|key| key.starts_with(&prefix)) {
            return Err(PlatformError::Rejected(format!("{} has subkeys", subkey)));
        }
        keys.remove(subkey)
            .map(|_| ())
            .ok_or_else(|| PlatformError::NotFound(subkey.to_string()))
    }
}
