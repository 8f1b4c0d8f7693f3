//! Toast configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::identity::{AppIdentity, ShortcutPolicy};

pub const DEFAULT_APP_NAME: &str = "Toastwire Console";
pub const DEFAULT_AUMI: &str = "Toastwire.Console";
pub const DEFAULT_WAIT_SECS: u64 = 15;

/// CLI configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastConfig {
    pub app_name: Option<String>,
    pub aumi: Option<String>,
    pub icon_path: Option<String>,
    pub icon_background_color: Option<String>,
    pub shortcut_policy: Option<String>,
    pub wait_secs: Option<u64>,
}

impl ToastConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            aumi: Some(DEFAULT_AUMI.to_string()),
            icon_path: None,
            icon_background_color: None,
            shortcut_policy: Some(ShortcutPolicy::default().to_string()),
            wait_secs: Some(DEFAULT_WAIT_SECS),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app_name: other.app_name.or(self.app_name),
            aumi: other.aumi.or(self.aumi),
            icon_path: other.icon_path.or(self.icon_path),
            icon_background_color: other.icon_background_color.or(self.icon_background_color),
            shortcut_policy: other.shortcut_policy.or(self.shortcut_policy),
            wait_secs: other.wait_secs.or(self.wait_secs),
        }
    }

    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    pub fn aumi_or_default(&self) -> &str {
        self.aumi.as_deref().unwrap_or(DEFAULT_AUMI)
    }

    /// Get shortcut policy as parsed value, or default if not set/invalid
    pub fn shortcut_policy_or_default(&self) -> ShortcutPolicy {
        self.shortcut_policy
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn wait_secs_or_default(&self) -> u64 {
        self.wait_secs.unwrap_or(DEFAULT_WAIT_SECS)
    }

    /// Identity the toaster registers with
    pub fn identity(&self) -> AppIdentity {
        let mut identity = AppIdentity::new(self.app_name_or_default(), self.aumi_or_default());
        identity.icon_path = self.icon_path.clone().filter(|p| !p.is_empty());
        identity.icon_background_color =
            self.icon_background_color.clone().filter(|c| !c.is_empty());
        identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = ToastConfig::defaults();
        assert_eq!(config.app_name, Some("Toastwire Console".to_string()));
        assert_eq!(config.aumi, Some("Toastwire.Console".to_string()));
        assert!(config.icon_path.is_none());
        assert!(config.icon_background_color.is_none());
        assert_eq!(config.shortcut_policy, Some("require-create".to_string()));
        assert_eq!(config.wait_secs, Some(15));
    }

    #[test]
    fn empty_has_all_none() {
        let config = ToastConfig::empty();
        assert!(config.app_name.is_none());
        assert!(config.aumi.is_none());
        assert!(config.shortcut_policy.is_none());
        assert!(config.wait_secs.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = ToastConfig {
            app_name: Some("Base".to_string()),
            aumi: Some("Base.App".to_string()),
            wait_secs: Some(15),
            ..Default::default()
        };

        let other = ToastConfig {
            app_name: Some("Other".to_string()),
            aumi: None, // Should not override
            wait_secs: Some(3),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.app_name, Some("Other".to_string()));
        assert_eq!(merged.aumi, Some("Base.App".to_string())); // Kept from base
        assert_eq!(merged.wait_secs, Some(3));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = ToastConfig {
            icon_path: Some("C:\\icon.png".to_string()),
            shortcut_policy: Some("ignore".to_string()),
            ..Default::default()
        };

        let merged = base.merge(ToastConfig::empty());

        assert_eq!(merged.icon_path, Some("C:\\icon.png".to_string()));
        assert_eq!(merged.shortcut_policy, Some("ignore".to_string()));
    }

    #[test]
    fn shortcut_policy_or_default_parses() {
        let config = ToastConfig {
            shortcut_policy: Some("require-no-create".to_string()),
            ..Default::default()
        };
        assert_eq!(config.shortcut_policy_or_default(), ShortcutPolicy::RequireNoCreate);
    }

    #[test]
    fn shortcut_policy_or_default_uses_default_on_invalid() {
        let config = ToastConfig {
            shortcut_policy: Some("sometimes".to_string()),
            ..Default::default()
        };
        assert_eq!(config.shortcut_policy_or_default(), ShortcutPolicy::RequireCreate);
    }

    #[test]
    fn scalar_defaults() {
        let config = ToastConfig::empty();
        assert_eq!(config.app_name_or_default(), DEFAULT_APP_NAME);
        assert_eq!(config.aumi_or_default(), DEFAULT_AUMI);
        assert_eq!(config.wait_secs_or_default(), 15);
    }

    #[test]
    fn identity_drops_empty_icon_settings() {
        let config = ToastConfig {
            app_name: Some("Contoso".to_string()),
            aumi: Some("Contoso.App".to_string()),
            icon_path: Some(String::new()),
            icon_background_color: Some("FFDDDDDD".to_string()),
            ..Default::default()
        };
        let identity = config.identity();
        assert_eq!(identity.app_name, "Contoso");
        assert_eq!(identity.aumi, "Contoso.App");
        assert!(identity.icon_path.is_none());
        assert_eq!(identity.icon_background_color.as_deref(), Some("FFDDDDDD"));
    }
}
