//! CLI argument definitions using Clap

use std::ffi::OsString;

use clap::{Parser, Subcommand};

use crate::application::ACTIVATION_FLAG;
use crate::domain::config::ToastConfig;
use crate::domain::template::AudioOption;

/// Toastwire - show a Windows toast notification and wait for the user
#[derive(Parser, Debug)]
#[command(name = "toastwire")]
#[command(version)]
#[command(about = "Show a Windows toast notification and report how the user reacted")]
#[command(long_about = None)]
pub struct Cli {
    /// Add an action button (repeatable)
    #[arg(long = "action", value_name = "LABEL")]
    pub actions: Vec<String>,

    /// App User Model Id of the application
    #[arg(long, visible_alias = "appid", value_name = "AUMI")]
    pub aumi: Option<String>,

    /// Display name of the application
    #[arg(long = "appname", value_name = "NAME")]
    pub app_name: Option<String>,

    /// Expire the toast this many milliseconds after it is shown
    #[arg(long = "expirems", value_name = "MS")]
    pub expire_ms: Option<u64>,

    /// Body text
    #[arg(long, value_name = "TEXT")]
    pub text: Vec<String>,

    /// Absolute path of an image to show
    #[arg(long, value_name = "PATH")]
    pub image: Option<String>,

    /// Attribution line shown below the body
    #[arg(long = "attribute", value_name = "TEXT")]
    pub attribution: Option<String>,

    /// Only create the Start menu shortcut, then exit
    #[arg(long)]
    pub only_create_shortcut: bool,

    /// Audio: 0 = default, 1 = silent, 2 = loop
    #[arg(long, value_name = "STATE", value_parser = clap::value_parser!(u8).range(0..=2))]
    pub audio_state: Option<u8>,

    /// Seconds to wait for the user when no expiration is given
    #[arg(long, value_name = "SECS")]
    pub wait_secs: Option<u64>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

impl Cli {
    /// Config overrides given on the command line
    pub fn config_overrides(&self) -> ToastConfig {
        ToastConfig {
            app_name: self.app_name.clone(),
            aumi: self.aumi.clone(),
            wait_secs: self.wait_secs,
            ..Default::default()
        }
    }

    /// Toast content requested besides the shortcut
    pub fn has_toast_content(&self) -> bool {
        self.image.is_some()
            || !self.text.is_empty()
            || !self.actions.is_empty()
            || self.expire_ms.is_some_and(|ms| ms > 0)
    }
}

/// Parsed toast options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastOptions {
    pub text: String,
    pub image: Option<String>,
    pub attribution: String,
    pub actions: Vec<String>,
    pub expire_ms: u64,
    pub audio: AudioOption,
}

/// Body text used when none is given
pub const DEFAULT_TEXT: &str = "Hello, world!";
/// Attribution used when none is given
pub const DEFAULT_ATTRIBUTION: &str = "default";

impl From<&Cli> for ToastOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            text: cli
                .text
                .first()
                .filter(|t| !t.is_empty())
                .cloned()
                .unwrap_or_else(|| DEFAULT_TEXT.to_string()),
            image: cli.image.clone().filter(|p| !p.is_empty()),
            attribution: cli
                .attribution
                .clone()
                .unwrap_or_else(|| DEFAULT_ATTRIBUTION.to_string()),
            actions: cli.actions.clone(),
            expire_ms: cli.expire_ms.unwrap_or(0),
            audio: cli
                .audio_state
                .and_then(AudioOption::from_state)
                .unwrap_or_default(),
        }
    }
}

/// Remove the activation flag the OS appends when it relaunches the
/// executable for a toast click. Returns the remaining arguments and whether
/// the flag was present.
pub fn strip_activation_flag<I>(args: I) -> (Vec<OsString>, bool)
where
    I: IntoIterator<Item = OsString>,
{
    let mut activated = false;
    let remaining = args
        .into_iter()
        .filter(|arg| {
            let is_flag = arg == ACTIVATION_FLAG;
            activated |= is_flag;
            !is_flag
        })
        .collect();
    (remaining, activated)
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "app_name",
    "aumi",
    "icon_path",
    "icon_background_color",
    "shortcut_policy",
    "wait_secs",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
