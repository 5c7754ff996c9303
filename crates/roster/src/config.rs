//! Configuration management for roster.
//!
//! This module provides configuration loading and validation using figment,
//! supporting a TOML config file, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the platform config directory.
const APP_DIR_NAME: &str = "roster";

/// Default location of the backing file, relative to the working directory.
const DEFAULT_DATA_FILE: &str = "data/students.json";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "ROSTER_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROSTER_`, nested keys split on `__`)
/// 2. TOML config file at `<config dir>/roster/config.toml`
/// 3. Default values
///
/// The `--data-file` flag is applied on top by the binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backing file configuration.
    pub store: StoreConfig,
}

/// Backing file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the JSON document holding every student record.
    pub data_file: PathBuf,
    /// Copy an unparseable backing file to `<data_file>.corrupt` before it is
    /// replaced by an empty roster.
    pub backup_corrupt: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            backup_corrupt: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A config file that does not exist is skipped, not reported.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Replace the backing file path, as the `--data-file` flag does.
    #[must_use]
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.store.data_file = path;
        }
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.store.data_file.as_os_str().is_empty() {
            return Err(Error::config_validation("store.data_file must not be empty"));
        }
        Ok(())
    }

    /// Path of the backing file.
    #[must_use]
    pub fn data_file(&self) -> &std::path::Path {
        &self.store.data_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.data_file(), PathBuf::from("data/students.json"));
        assert!(config.store.backup_corrupt);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_data_file() {
        let mut config = Config::default();
        config.store.data_file = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data_file"));
    }

    #[test]
    fn test_with_data_file_override() {
        let config = Config::default().with_data_file(Some(PathBuf::from("/tmp/class.json")));
        assert_eq!(config.data_file(), PathBuf::from("/tmp/class.json"));

        let config = Config::default().with_data_file(None);
        assert_eq!(config.data_file(), PathBuf::from("data/students.json"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("roster"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[store]\ndata_file = \"class/roster.json\"\nbackup_corrupt = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.data_file(), PathBuf::from("class/roster.json"));
        assert!(!config.store.backup_corrupt);
    }

    #[test]
    fn test_load_rejects_empty_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\ndata_file = \"\"\n").unwrap();

        let result = Config::load_from(Some(path));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_store_config_deserialize_partial() {
        let json = r#"{"backup_corrupt": false}"#;
        let store: StoreConfig = serde_json::from_str(json).unwrap();
        assert_eq!(store.data_file, PathBuf::from("data/students.json"));
        assert!(!store.backup_corrupt);
    }
}
