//! Configuration management for travelrec.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::{
    StorePaths, AIRLINES_FILE, AVAILABLE_FLIGHTS_FILE, BOOKINGS_FILE, CLIENTS_FILE,
};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "travelrec";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "TRAVELREC_";

/// Shown in place of the agent password.
const REDACTED: &str = "********";

/// Widest ID column accepted.
const MAX_ID_WIDTH: usize = 20;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRAVELREC_`, sections split on `__`)
/// 2. TOML config file at `~/.config/travelrec/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Agent account configuration.
    pub agent: AgentConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the JSON files.
    /// Defaults to `~/.local/share/travelrec`
    pub data_dir: Option<PathBuf>,
    /// File name for clients.
    pub clients_file: String,
    /// File name for airlines.
    pub airlines_file: String,
    /// File name for available flights.
    pub available_flights_file: String,
    /// File name for bookings.
    pub bookings_file: String,
}

/// The single agent account allowed into back-office commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Login name.
    pub username: String,
    /// Login password, compared as plain text.
    pub password: String,
}

/// Display-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width IDs are zero-padded to.
    pub id_width: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // Will be resolved to default at runtime
            clients_file: CLIENTS_FILE.to_string(),
            airlines_file: AIRLINES_FILE.to_string(),
            available_flights_file: AVAILABLE_FLIGHTS_FILE.to_string(),
            bookings_file: BOOKINGS_FILE.to_string(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { id_width: 9 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file at `config_path`, or the default path when `None`
    ///    (skipped if the file does not exist)
    /// 3. Environment variables (prefixed with `TRAVELREC_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
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
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.agent.username.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "agent username must not be empty".to_string(),
            });
        }

        if self.display.id_width == 0 || self.display.id_width > MAX_ID_WIDTH {
            return Err(Error::ConfigValidation {
                message: format!(
                    "id_width must be between 1 and {MAX_ID_WIDTH}, got {}",
                    self.display.id_width
                ),
            });
        }

        let files = self.storage.file_names();
        for (key, name) in &files {
            if name.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{key} must not be empty"),
                });
            }
        }
        for (i, (key, name)) in files.iter().enumerate() {
            if let Some((other, _)) = files[i + 1..].iter().find(|(_, n)| n == name) {
                return Err(Error::ConfigValidation {
                    message: format!("{key} and {other} both point at '{name}'"),
                });
            }
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// A copy safe to print: the agent password is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.agent.password = REDACTED.to_string();
        config
    }

    /// Resolve the file of every collection.
    #[must_use]
    pub fn store_paths(&self) -> StorePaths {
        let data_dir = self.data_dir();
        StorePaths {
            clients: data_dir.join(&self.storage.clients_file),
            airlines: data_dir.join(&self.storage.airlines_file),
            available_flights: data_dir.join(&self.storage.available_flights_file),
            bookings: data_dir.join(&self.storage.bookings_file),
            data_dir,
        }
    }
}

impl StorageConfig {
    fn file_names(&self) -> [(&'static str, &str); 4] {
        [
            ("clients_file", self.clients_file.as_str()),
            ("airlines_file", self.airlines_file.as_str()),
            ("available_flights_file", self.available_flights_file.as_str()),
            ("bookings_file", self.bookings_file.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.agent.username, "admin");
        assert_eq!(config.agent.password, "admin");
        assert_eq!(config.display.id_width, 9);
    }

    #[test]
    fn test_default_storage_config() {
        let storage = StorageConfig::default();

        assert_eq!(storage.clients_file, "clients.json");
        assert_eq!(storage.airlines_file, "airlines.json");
        assert_eq!(storage.available_flights_file, "available_flights.json");
        assert_eq!(storage.bookings_file, "flights.json");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_username() {
        let mut config = Config::default();
        config.agent.username = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("username"));
    }

    #[test]
    fn test_validate_id_width_bounds() {
        let mut config = Config::default();
        config.display.id_width = 0;
        assert!(config.validate().unwrap_err().to_string().contains("id_width"));

        config.display.id_width = 21;
        assert!(config.validate().is_err());

        config.display.id_width = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_file_name() {
        let mut config = Config::default();
        config.storage.airlines_file = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("airlines_file"));
    }

    #[test]
    fn test_validate_shared_file_name() {
        let mut config = Config::default();
        config.storage.bookings_file = "clients.json".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("clients_file"));
        assert!(err.contains("bookings_file"));
    }

    #[test]
    fn test_data_dir_default() {
        let config = Config::default();
        assert!(config.data_dir().to_string_lossy().contains("travelrec"));
    }

    #[test]
    fn test_store_paths_custom() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/srv/agency"));
        config.storage.bookings_file = "bookings.json".to_string();

        let paths = config.store_paths();
        assert_eq!(paths.data_dir, PathBuf::from("/srv/agency"));
        assert_eq!(paths.clients, PathBuf::from("/srv/agency/clients.json"));
        assert_eq!(paths.bookings, PathBuf::from("/srv/agency/bookings.json"));
    }

    #[test]
    fn test_default_store_paths_match_store_defaults() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/data"));
        assert_eq!(config.store_paths(), StorePaths::in_dir("/data"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("travelrec"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[agent]\nusername = \"desk\"\n\n[display]\nid_width = 4\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.agent.username, "desk");
        assert_eq!(config.agent.password, "admin");
        assert_eq!(config.display.id_width, 4);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nid_width = 0\n").unwrap();

        assert!(Config::load_from(Some(path)).is_err());
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"data_dir": "/tmp/agency", "bookings_file": "b.json"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.data_dir, Some(PathBuf::from("/tmp/agency")));
        assert_eq!(storage.bookings_file, "b.json");
        assert_eq!(storage.clients_file, "clients.json");
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("id_width"));
        assert!(json.contains("available_flights_file"));
    }

    #[test]
    fn test_redacted_hides_password() {
        let config = Config {
            agent: AgentConfig {
                username: "desk".to_string(),
                password: "s3cret".to_string(),
            },
            ..Config::default()
        };

        let redacted = config.redacted();
        assert_eq!(redacted.agent.username, "desk");
        assert_eq!(redacted.storage, config.storage);
        assert_eq!(config.agent.password, "s3cret");

        let json = serde_json::to_string(&redacted).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(json.contains("desk"));
    }
}
