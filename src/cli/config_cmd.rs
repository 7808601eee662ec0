//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::DisplayConfig;
use crate::domain::duration::Duration;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::panel::ConsolePanel;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    panel: &ConsolePanel,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, panel).await,
        ConfigAction::Set { key, value } => handle_set(store, panel, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, panel, &key).await,
        ConfigAction::List => handle_list(store, panel).await,
        ConfigAction::Path => handle_path(store, panel),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, panel: &ConsolePanel) -> Result<(), ConfigError> {
    store.init().await?;
    panel.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    panel: &ConsolePanel,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key_error(key));
    }

    let mut config = store.load().await?;

    match key {
        "output_dir" => config.output_dir = Some(value.to_string()),
        "duration" => {
            value
                .parse::<Duration>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
            config.duration = Some(value.to_string());
        }
        "notify" => config.notify = Some(parse_bool(key, value)?),
        "cue" => config.cue = Some(parse_bool(key, value)?),
        "display.screen" => {
            config
                .display
                .get_or_insert_with(DisplayConfig::default)
                .screen = Some(value.to_string());
        }
        "display.audio_source" => {
            config
                .display
                .get_or_insert_with(DisplayConfig::default)
                .audio_source = Some(value.to_string());
        }
        _ => return Err(unknown_key_error(key)),
    }

    store.save(&config).await?;
    panel.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    panel: &ConsolePanel,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key_error(key));
    }

    let config = store.load().await?;

    let value = match key {
        "output_dir" => config.output_dir,
        "duration" => config.duration,
        "notify" => config.notify.map(|b| b.to_string()),
        "cue" => config.cue.map(|b| b.to_string()),
        "display.screen" => config.display.as_ref().and_then(|d| d.screen.clone()),
        "display.audio_source" => config.display.as_ref().and_then(|d| d.audio_source.clone()),
        _ => None,
    };

    match value {
        Some(value) => panel.output(&value),
        None => panel.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, panel: &ConsolePanel) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let values: [(&str, Option<String>); VALID_CONFIG_KEYS.len()] = [
        ("output_dir", config.output_dir.clone()),
        ("duration", config.duration.clone()),
        ("notify", config.notify.map(|b| b.to_string())),
        ("cue", config.cue.map(|b| b.to_string())),
        (
            "display.screen",
            config.display.as_ref().and_then(|d| d.screen.clone()),
        ),
        (
            "display.audio_source",
            config.display.as_ref().and_then(|d| d.audio_source.clone()),
        ),
    ];

    for (key, value) in values {
        panel.key_value(key, value.as_deref().unwrap_or("(not set)"));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, panel: &ConsolePanel) -> Result<(), ConfigError> {
    panel.output(&store.path().display().to_string());
    Ok(())
}

fn unknown_key_error(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be 'true' or 'false'".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    fn store() -> (tempfile::TempDir, XdgConfigStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        (dir, store)
    }

    #[tokio::test]
    async fn set_and_get_duration() {
        let (_dir, store) = store();
        let panel = ConsolePanel::new();

        handle_config_command(
            ConfigAction::Set {
                key: "duration".into(),
                value: "30s".into(),
            },
            &store,
            &panel,
        )
        .await
        .expect("set");

        let config = store.load().await.expect("load");
        assert_eq!(config.duration.as_deref(), Some("30s"));
    }

    #[tokio::test]
    async fn set_rejects_invalid_duration() {
        let (_dir, store) = store();
        let panel = ConsolePanel::new();

        let err = handle_set(&store, &panel, "duration", "soon").await.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn set_rejects_unknown_key() {
        let (_dir, store) = store();
        let panel = ConsolePanel::new();

        let err = handle_set(&store, &panel, "api_key", "x").await.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn set_nested_display_key() {
        let (_dir, store) = store();
        let panel = ConsolePanel::new();

        handle_set(&store, &panel, "display.audio_source", "sink.monitor")
            .await
            .expect("set");

        let config = store.load().await.expect("load");
        assert_eq!(config.audio_source(), Some("sink.monitor"));
    }

    #[tokio::test]
    async fn bool_values_validate() {
        let (_dir, store) = store();
        let panel = ConsolePanel::new();

        handle_set(&store, &panel, "notify", "true").await.expect("set");
        let err = handle_set(&store, &panel, "cue", "yes").await.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}
