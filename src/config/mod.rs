use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend origin; paths under `/api/v1` are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. Unset means requests wait until they resolve.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// File holding the signed-in session between runs
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml(&content)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse configuration file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout_secs, None);
        assert_eq!(config.session.path, PathBuf::from("./data/session.json"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [api]
            base_url = "https://hotels.example.com"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://hotels.example.com");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.session.path, PathBuf::from("./data/session.json"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load(&temp_dir.path().join("staybook.toml")).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml("[api\nbase_url = 1").is_err());
    }
}
