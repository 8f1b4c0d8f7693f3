//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::ToastConfig;
use crate::domain::error::ConfigError;

/// Port for the CLI's persisted settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored settings.
    /// A missing file yields [`ToastConfig::empty`].
    async fn load(&self) -> Result<ToastConfig, ConfigError>;

    /// Persist `config`, creating parent directories as needed
    async fn save(&self, config: &ToastConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write [`ToastConfig::defaults`].
    /// Fails with [`ConfigError::AlreadyExists`] if the file is present.
    async fn init(&self) -> Result<(), ConfigError>;
}
