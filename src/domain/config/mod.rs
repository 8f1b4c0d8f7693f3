//! Configuration domain module

mod toast_config;

pub use toast_config::{ToastConfig, DEFAULT_APP_NAME, DEFAULT_AUMI, DEFAULT_WAIT_SECS};
