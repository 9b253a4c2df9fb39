//! Application configuration
//!
//! Configuration is a JSON file whose fields are all optional, followed by
//! environment overrides:
//!
//! - `FIPE_APP_HOST`, `FIPE_APP_PORT`
//! - `FIPE_DATABASE_PATH`
//! - `FIPE_LOG_LEVEL`

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads a config file, then applies process environment overrides
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())
    }

    /// Parses a JSON config file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies environment overrides read through `lookup`
    pub fn apply_env<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FIPE_APP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FIPE_APP_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "FIPE_APP_PORT",
                value: port,
            })?;
        }
        if let Some(path) = lookup("FIPE_DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(level) = lookup("FIPE_LOG_LEVEL") {
            self.log.level = level;
        }
        Ok(self)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// SQLite database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

const MEMORY_PATH: &str = ":memory:";

fn default_db_path() -> String {
    "./data/fipe.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// In-memory database
    pub fn memory() -> Self {
        Self {
            path: MEMORY_PATH.to_string(),
            ..Self::default()
        }
    }

    /// Database file at `path`
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().display().to_string(),
            ..Self::default()
        }
    }

    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. "info" or "fipe=debug,tower_http=info"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.log.level, "info");
        assert!(!config.database.is_memory());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fipe.json");
        std::fs::write(&path, r#"{"server": {"port": 9000}, "log": {"json": true}}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.log.json);
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file(Path::new("/nonexistent/fipe.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fipe.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .apply_env(env(&[
                ("FIPE_APP_HOST", "127.0.0.1"),
                ("FIPE_APP_PORT", "3000"),
                ("FIPE_DATABASE_PATH", ":memory:"),
                ("FIPE_LOG_LEVEL", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.server.socket_addr(), "127.0.0.1:3000");
        assert!(config.database.is_memory());
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_invalid_port_override() {
        let err = AppConfig::default()
            .apply_env(env(&[("FIPE_APP_PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("FIPE_APP_PORT"));
    }
}
