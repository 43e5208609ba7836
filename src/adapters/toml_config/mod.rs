// TOML config adapter - Configuration loaded from an `[audiocut]` table

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AudioCutError, AudioCutResult};
use crate::utils::logging::{LogFormat, LogLevel};

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "audiocut.toml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// mkvmerge binary, looked up in PATH when not absolute
    pub mkvmerge_path: String,
    /// Prefix of the numbered temporary files for out-of-order cuts
    pub temp_prefix: String,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mkvmerge_path: "mkvmerge".to_string(),
            temp_prefix: "tmp".to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
        }
    }
}

/// Partial configuration as read from a file; unset keys keep lower layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverrides {
    pub mkvmerge_path: Option<String>,
    pub temp_prefix: Option<String>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
}

impl ConfigOverrides {
    /// Apply every set key on top of `config`
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(path) = self.mkvmerge_path {
            config.mkvmerge_path = path;
        }
        if let Some(prefix) = self.temp_prefix {
            config.temp_prefix = prefix;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    audiocut: ConfigOverrides,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse the `[audiocut]` table from TOML text
    pub fn parse(content: &str) -> AudioCutResult<ConfigOverrides> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| AudioCutError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })?;
        Ok(file.audiocut)
    }

    /// Load overrides from `path`
    pub fn load(path: &Path) -> AudioCutResult<ConfigOverrides> {
        let content = std::fs::read_to_string(path).map_err(|e| AudioCutError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        let overrides = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(overrides)
    }

    /// Explicit path if given, else the default file when it exists
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        }
    }

    /// Serialize a full configuration back to TOML
    pub fn serialize(config: &AppConfig) -> AudioCutResult<String> {
        #[derive(Serialize)]
        struct Wrapper<'a> {
            audiocut: &'a AppConfig,
        }
        toml::to_string(&Wrapper { audiocut: config }).map_err(|e| AudioCutError::Config {
            message: format!("Failed to serialize config: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_partial_table() {
        let overrides = TomlConfigAdapter::parse(
            r#"
            [audiocut]
            mkvmerge_path = "/opt/mkvtoolnix/mkvmerge"
            log_level = "debug"
            "#,
        )
        .unwrap();
        let mut config = AppConfig::default();
        overrides.apply(&mut config);
        assert_eq!(config.mkvmerge_path, "/opt/mkvtoolnix/mkvmerge");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.temp_prefix, "tmp");
    }

    #[test]
    fn test_parse_without_table_is_empty() {
        let overrides = TomlConfigAdapter::parse("").unwrap();
        assert_eq!(overrides, ConfigOverrides::default());
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let err = TomlConfigAdapter::parse("[audiocut]\nlog_level = \"loud\"\n").unwrap_err();
        assert!(matches!(err, AudioCutError::Config { .. }));
    }

    #[test]
    fn test_serialize_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audiocut.toml");
        let config = AppConfig {
            temp_prefix: "/scratch/cut".to_string(),
            log_format: LogFormat::Json,
            ..AppConfig::default()
        };
        std::fs::write(&path, TomlConfigAdapter::serialize(&config).unwrap()).unwrap();

        let mut loaded = AppConfig::default();
        TomlConfigAdapter::load(&path).unwrap().apply(&mut loaded);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfigAdapter::load(Path::new("/nonexistent/audiocut.toml")).unwrap_err();
        assert!(matches!(err, AudioCutError::Config { .. }));
    }
}
