use crate::error::{DirectoryError, Result};
use crate::view::SortKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENDPOINT_ENV: &str = "USERDIR_ENDPOINT";
pub const TIMEOUT_ENV: &str = "USERDIR_TIMEOUT_SECS";

/// Configuration for userdir, stored as config.json in the config directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// URL returning the JSON array of users
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout for the initial load, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sort key used when none is given on the command line
    #[serde(default)]
    pub default_sort: SortKey,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_sort: SortKey::default(),
        }
    }
}

impl DirectoryConfig {
    pub const KEYS: [&'static str; 3] = ["endpoint", "timeout-secs", "default-sort"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DirectoryConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Apply `USERDIR_ENDPOINT` / `USERDIR_TIMEOUT_SECS` on top of the file values.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn with_overrides(mut self, endpoint: Option<String>, timeout: Option<String>) -> Result<Self> {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(raw) = timeout {
            self.timeout_secs = parse_timeout(&raw)
                .map_err(|e| DirectoryError::Config(format!("{}: {}", TIMEOUT_ENV, e)))?;
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "endpoint" => Some(self.endpoint.clone()),
            "timeout-secs" => Some(self.timeout_secs.to_string()),
            "default-sort" => Some(self.default_sort.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "endpoint" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("endpoint cannot be empty".to_string());
                }
                self.endpoint = value.to_string();
            }
            "timeout-secs" => self.timeout_secs = parse_timeout(value)?,
            "default-sort" => self.default_sort = SortKey::from(value),
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> std::result::Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("timeout must be at least 1 second".to_string()),
        Ok(secs) => Ok(secs),
        Err(_) => Err(format!("invalid timeout: {}", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DirectoryConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.default_sort, SortKey::Name);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DirectoryConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, DirectoryConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("userdir");

        let mut config = DirectoryConfig::default();
        config.set("endpoint", "http://localhost:9000/users").unwrap();
        config.set("default-sort", "company").unwrap();
        config.save(&nested).unwrap();

        let loaded = DirectoryConfig::load(&nested).unwrap();
        assert_eq!(loaded.endpoint, "http://localhost:9000/users");
        assert_eq!(loaded.default_sort, SortKey::Company);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{ "timeout_secs": 3 }"#,
        )
        .unwrap();

        let config = DirectoryConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "{ nope").unwrap();
        assert!(matches!(
            DirectoryConfig::load(temp_dir.path()),
            Err(DirectoryError::Serialization(_))
        ));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = DirectoryConfig::default();
        assert!(config.set("timeout-secs", "0").is_err());
        assert!(config.set("timeout-secs", "soon").is_err());
        assert!(config.set("endpoint", "  ").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, DirectoryConfig::default());
    }

    #[test]
    fn test_unknown_sort_falls_back_to_name() {
        let mut config = DirectoryConfig::default();
        config.set("default-sort", "age").unwrap();
        assert_eq!(config.get("default-sort").as_deref(), Some("name"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = DirectoryConfig::default()
            .with_overrides(Some("http://127.0.0.1:1/u".into()), Some("2".into()))
            .unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:1/u");
        assert_eq!(config.timeout_secs, 2);

        let untouched = DirectoryConfig::default()
            .with_overrides(Some("".into()), None)
            .unwrap();
        assert_eq!(untouched.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_bad_timeout_override_is_config_error() {
        let err = DirectoryConfig::default()
            .with_overrides(None, Some("later".into()))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Config(_)));
    }
}
