//! In-memory shortcut folder

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::application::ports::ShellLinkStore;
use crate::domain::error::PlatformError;

#[derive(Debug, Clone)]
struct Link {
    target: PathBuf,
    aumi: String,
}

/// Start menu folder kept in a map from path to shortcut
#[derive(Default)]
pub struct MemoryShellLinks {
    links: Mutex<BTreeMap<PathBuf, Link>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryShellLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-install a shortcut for `app_name` carrying `aumi`
    pub fn with_shortcut(self, app_name: &str, aumi: &str) -> Self {
        let path = Self::path_for(app_name);
        self.links.lock().insert(
            path,
            Link {
                target: PathBuf::from("existing.exe"),
                aumi: aumi.to_string(),
            },
        );
        self
    }

    /// Shortcuts exist but their property store cannot be read
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Nothing can be written or created
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    fn path_for(app_name: &str) -> PathBuf {
        PathBuf::from("Start Menu")
            .join("Programs")
            .join(format!("{}.lnk", app_name))
    }

    pub fn aumi_of(&self, app_name: &str) -> Option<String> {
        self.links
            .lock()
            .get(&Self::path_for(app_name))
            .map(|link| link.aumi.clone())
    }

    pub fn target_of(&self, app_name: &str) -> Option<PathBuf> {
        self.links
            .lock()
            .get(&Self::path_for(app_name))
            .map(|link| link.target.clone())
    }

    pub fn len(&self) -> usize {
        self.links.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.lock().is_empty()
    }

    fn check_writable(&self) -> Result<(), PlatformError> {
        if self.fail_writes {
            return Err(PlatformError::Rejected("shortcut folder is read-only".to_string()));
        }
        Ok(())
    }
}

impl ShellLinkStore for MemoryShellLinks {
    fn shortcut_path(&self, app_name: &str) -> Result<PathBuf, PlatformError> {
        Ok(Self::path_for(app_name))
    }

    fn exists(&self, path: &Path) -> bool {
        self.links.lock().contains_key(path)
    }

    fn read_aumi(&self, path: &Path) -> Result<String, PlatformError> {
        if self.fail_reads {
            return Err(PlatformError::Rejected("property store unavailable".to_string()));
        }
        self.links
            .lock()
            .get(path)
            .map(|link| link.aumi.clone())
            .ok_or_else(|| PlatformError::NotFound(path.display().to_string()))
    }

    fn write_aumi(&self, path: &Path, aumi: &str) -> Result<(), PlatformError> {
        self.check_writable()?;
        match self.links.lock().get_mut(path) {
            Some(link) => {
                link.aumi = aumi.to_string();
                Ok(())
            }
            None => Err(PlatformError::NotFound(path.display().to_string())),
        }
    }

    fn create(&self, path: &Path, target: &Path, aumi: &str) -> Result<(), PlatformError> {
        self.check_writable()?;
        self.links.lock().insert(
            path.to_path_buf(),
            Link {
                target: target.to_path_buf(),
                aumi: aumi.to_string(),
            },
        );
        Ok(())
    }
}
