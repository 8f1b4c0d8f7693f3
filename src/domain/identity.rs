//! Application identity and shortcut policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidPolicyError;

/// Longest AUMI the OS accepts
pub const MAX_AUMI_LENGTH: usize = 128;

/// How the application presents itself to the notification center
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppIdentity {
    pub app_name: String,
    pub aumi: String,
    pub icon_path: Option<String>,
    /// Hex color without leading `#`, e.g. `FFDDDDDD`
    pub icon_background_color: Option<String>,
}

impl AppIdentity {
    pub fn new(app_name: impl Into<String>, aumi: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            aumi: aumi.into(),
            icon_path: None,
            icon_background_color: None,
        }
    }

    pub fn with_icon_path(mut self, path: impl Into<String>) -> Self {
        self.icon_path = Some(path.into());
        self
    }

    pub fn with_icon_background_color(mut self, color: impl Into<String>) -> Self {
        self.icon_background_color = Some(color.into());
        self
    }

    /// Both the app name and the AUMI are set
    pub fn is_complete(&self) -> bool {
        !self.app_name.is_empty() && !self.aumi.is_empty()
    }
}

/// Build an AUMI of the form `Company.Product[.SubProduct[.Version]]`.
///
/// The version is only appended together with a sub-product. Results longer
/// than [`MAX_AUMI_LENGTH`] are returned unchanged but logged.
pub fn configure_aumi(
    company_name: &str,
    product_name: &str,
    sub_product: &str,
    version_information: &str,
) -> String {
    let mut aumi = format!("{}.{}", company_name, product_name);
    if !sub_product.is_empty() {
        aumi.push('.');
        aumi.push_str(sub_product);
        if !version_information.is_empty() {
            aumi.push('.');
            aumi.push_str(version_information);
        }
    }

    if aumi.chars().count() > MAX_AUMI_LENGTH {
        tracing::error!(
            "AUMI is {} characters long, the maximum allowed is {}",
            aumi.chars().count(),
            MAX_AUMI_LENGTH
        );
    }
    aumi
}

/// Whether the shortcut manager may create or repair the Start menu shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShortcutPolicy {
    /// Don't check, create, or modify a shortcut
    Ignore,
    /// Require a shortcut with a matching AUMI, never create or modify one
    RequireNoCreate,
    /// Require a shortcut with a matching AUMI, create or fix it when needed
    #[default]
    RequireCreate,
}

impl ShortcutPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::RequireNoCreate => "require-no-create",
            Self::RequireCreate => "require-create",
        }
    }
}

impl fmt::Display for ShortcutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShortcutPolicy {
    type Err = InvalidPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "require-no-create" => Ok(Self::RequireNoCreate),
            "require-create" => Ok(Self::RequireCreate),
            _ => Err(InvalidPolicyError {
                input: s.to_string(),
            }),
        }
    }
}

/// Outcome of validating or creating the Start menu shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutResult {
    Unchanged,
    Changed,
    Created,
    MissingParameters,
    IncompatibleOs,
    CreateFailed,
}

impl ShortcutResult {
    /// Numeric code: non-negative on success, negative on failure
    pub const fn code(&self) -> i32 {
        match self {
            Self::Unchanged => 0,
            Self::Changed => 1,
            Self::Created => 2,
            Self::MissingParameters => -1,
            Self::IncompatibleOs => -2,
            Self::CreateFailed => -3,
        }
    }

    pub const fn is_success(&self) -> bool {
        self.code() >= 0
    }
}

impl fmt::Display for ShortcutResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unchanged => "shortcut unchanged",
            Self::Changed => "shortcut was changed",
            Self::Created => "shortcut was created",
            Self::MissingParameters => "app name or AUMI missing",
            Self::IncompatibleOs => "incompatible OS",
            Self::CreateFailed => "shortcut could not be created",
        };
        f.write_str(label)
    }
}
