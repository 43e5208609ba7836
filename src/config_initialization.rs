//! Configuration initialization and hierarchy management

use std::path::Path;

use tracing::info;

use crate::adapters::toml_config::{AppConfig, ConfigOverrides, TomlConfigAdapter};
use crate::error::{AudioCutError, AudioCutResult};

pub const ENV_MKVMERGE: &str = "AUDIOCUT_MKVMERGE";
pub const ENV_TEMP_PREFIX: &str = "AUDIOCUT_TEMP_PREFIX";
pub const ENV_LOG_LEVEL: &str = "AUDIOCUT_LOG_LEVEL";

/// Build the configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(
    config_path: Option<&Path>,
    cli_overrides: ConfigOverrides,
) -> AudioCutResult<AppConfig> {
    initialize_with_env(config_path, cli_overrides, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration_hierarchy`] with an injectable environment
pub fn initialize_with_env<F>(
    config_path: Option<&Path>,
    cli_overrides: ConfigOverrides,
    lookup: F,
) -> AudioCutResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::default();

    if let Some(path) = TomlConfigAdapter::resolve_path(config_path) {
        TomlConfigAdapter::load(&path)?.apply(&mut config);
    }

    let env_overrides = load_environment_variables(&lookup)?;
    if env_overrides != ConfigOverrides::default() {
        info!("Applying environment overrides");
    }
    env_overrides.apply(&mut config);

    cli_overrides.apply(&mut config);
    Ok(config)
}

fn load_environment_variables<F>(lookup: &F) -> AudioCutResult<ConfigOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let log_level = match lookup(ENV_LOG_LEVEL) {
        Some(value) => Some(value.parse().map_err(|e| AudioCutError::Config {
            message: format!("{}: {}", ENV_LOG_LEVEL, e),
        })?),
        None => None,
    };

    Ok(ConfigOverrides {
        mkvmerge_path: lookup(ENV_MKVMERGE),
        temp_prefix: lookup(ENV_TEMP_PREFIX),
        log_level,
        log_format: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logging::LogLevel;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_precedence_cli_env_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audiocut.toml");
        std::fs::write(
            &path,
            "[audiocut]\nmkvmerge_path = \"file-mkvmerge\"\ntemp_prefix = \"file\"\nlog_level = \"warn\"\n",
        )
        .unwrap();

        let cli = ConfigOverrides {
            mkvmerge_path: Some("cli-mkvmerge".to_string()),
            ..ConfigOverrides::default()
        };
        let config = initialize_with_env(
            Some(&path),
            cli,
            env(&[(ENV_MKVMERGE, "env-mkvmerge"), (ENV_TEMP_PREFIX, "env")]),
        )
        .unwrap();

        assert_eq!(config.mkvmerge_path, "cli-mkvmerge");
        assert_eq!(config.temp_prefix, "env");
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_defaults_without_sources() {
        let dir = TempDir::new().unwrap();
        let missing_default = dir.path().join("none.toml");
        std::fs::write(&missing_default, "").unwrap();
        let config =
            initialize_with_env(Some(&missing_default), ConfigOverrides::default(), env(&[]))
                .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_bad_env_log_level() {
        let err = initialize_with_env(
            None,
            ConfigOverrides::default(),
            env(&[(ENV_LOG_LEVEL, "chatty")]),
        );
        assert!(matches!(err, Err(AudioCutError::Config { .. })));
    }
}
