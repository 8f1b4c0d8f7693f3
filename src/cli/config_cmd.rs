//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::ToastConfig;
use crate::domain::error::ConfigError;
use crate::domain::identity::{ShortcutPolicy, MAX_AUMI_LENGTH};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    let config = store.load().await?;
    match get_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &get_value(&config, key).unwrap_or_else(|| "(not set)".to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Store an already validated value
fn set_value(config: &mut ToastConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "app_name" => config.app_name = Some(value.to_string()),
        "aumi" => config.aumi = Some(value.to_string()),
        "icon_path" => config.icon_path = Some(value.to_string()),
        "icon_background_color" => {
            config.icon_background_color = Some(value.trim_start_matches('#').to_uppercase())
        }
        "shortcut_policy" => config.shortcut_policy = Some(parse_policy(key, value)?.to_string()),
        "wait_secs" => config.wait_secs = Some(parse_secs(key, value)?),
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

fn get_value(config: &ToastConfig, key: &str) -> Option<String> {
    match key {
        "app_name" => config.app_name.clone(),
        "aumi" => config.aumi.clone(),
        "icon_path" => config.icon_path.clone(),
        "icon_background_color" => config.icon_background_color.clone(),
        "shortcut_policy" => config.shortcut_policy.clone(),
        "wait_secs" => config.wait_secs.map(|s| s.to_string()),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "app_name" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
        }
        "aumi" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
            if value.chars().count() > MAX_AUMI_LENGTH {
                return Err(invalid(format!(
                    "Value is longer than {} characters",
                    MAX_AUMI_LENGTH
                )));
            }
        }
        "icon_background_color" => {
            let hex = value.trim_start_matches('#');
            if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid(format!(
                    "Invalid color '{}'. Use RRGGBB or AARRGGBB hex digits",
                    value
                )));
            }
        }
        "shortcut_policy" => {
            parse_policy(key, value)?;
        }
        "wait_secs" => {
            parse_secs(key, value)?;
        }
        _ => {} // icon_path accepts any string
    }
    Ok(())
}

fn parse_policy(key: &str, value: &str) -> Result<ShortcutPolicy, ConfigError> {
    value
        .parse::<ShortcutPolicy>()
        .map_err(|e| ConfigError::ValidationError {
            key: key.to_string(),
            message: e.to_string(),
        })
}

fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be a whole number of seconds".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;
    use tempfile::TempDir;

    #[test]
    fn validate_aumi() {
        assert!(validate_config_value("aumi", "Contoso.App").is_ok());
        assert!(validate_config_value("aumi", "  ").is_err());
        assert!(validate_config_value("aumi", &"a".repeat(129)).is_err());
    }

    #[test]
    fn validate_color() {
        assert!(validate_config_value("icon_background_color", "FFDDDDDD").is_ok());
        assert!(validate_config_value("icon_background_color", "#1e90ff").is_ok());
        assert!(validate_config_value("icon_background_color", "blue").is_err());
        assert!(validate_config_value("icon_background_color", "FFF").is_err());
    }

    #[test]
    fn validate_policy() {
        assert!(validate_config_value("shortcut_policy", "ignore").is_ok());
        assert!(validate_config_value("shortcut_policy", "require-no-create").is_ok());
        assert!(validate_config_value("shortcut_policy", "always").is_err());
    }

    #[test]
    fn validate_wait_secs() {
        assert!(validate_config_value("wait_secs", "30").is_ok());
        assert!(validate_config_value("wait_secs", "-1").is_err());
        assert!(validate_config_value("wait_secs", "soon").is_err());
    }

    #[test]
    fn set_value_normalizes() {
        let mut config = ToastConfig::empty();
        set_value(&mut config, "icon_background_color", "#1e90ff").unwrap();
        set_value(&mut config, "shortcut_policy", "IGNORE").unwrap();
        set_value(&mut config, "wait_secs", "7").unwrap();
        assert_eq!(config.icon_background_color, Some("1E90FF".to_string()));
        assert_eq!(config.shortcut_policy, Some("ignore".to_string()));
        assert_eq!(config.wait_secs, Some(7));
    }

    #[test]
    fn get_value_for_every_key() {
        let config = ToastConfig::defaults();
        for key in VALID_CONFIG_KEYS {
            let _ = get_value(&config, key);
        }
        assert_eq!(get_value(&config, "wait_secs"), Some("15".to_string()));
        assert_eq!(get_value(&config, "icon_path"), None);
    }

    #[tokio::test]
    async fn set_then_get_through_store() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "aumi".to_string(),
                value: "Contoso.App".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.aumi, Some("Contoso.App".to_string()));
    }

    #[tokio::test]
    async fn set_unknown_key_fails() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let result = handle_config_command(
            ConfigAction::Set {
                key: "api_key".to_string(),
                value: "x".to_string(),
            },
            &store,
            &Presenter::new(),
        )
        .await;
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
        assert!(!store.exists());
    }
}
