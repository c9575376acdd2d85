//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::LayoutConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// States feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Pre-normalized per-state CSV
    #[serde(default = "default_states_file")]
    pub states_file: PathBuf,
}

fn default_states_file() -> PathBuf {
    PathBuf::from("./data/states.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            states_file: default_states_file(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Directory with the built browser UI, served at `/`
    #[serde(default)]
    pub ui_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8091".to_string(),
                "http://127.0.0.1:8091".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
            ui_dir: None,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Environment variable names
pub const ENV_STATES_FILE: &str = "COVID_COMPARE_STATES_FILE";
pub const ENV_API_HOST: &str = "COVID_COMPARE_API_HOST";
pub const ENV_API_PORT: &str = "COVID_COMPARE_API_PORT";
pub const ENV_LOG_LEVEL: &str = "COVID_COMPARE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "COVID_COMPARE_LOG_FORMAT";

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::search_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Default config file locations, in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("covid-compare").join("config.toml")),
            Some(PathBuf::from("/etc/covid-compare/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(states_file) = lookup(ENV_STATES_FILE) {
            self.data.states_file = PathBuf::from(states_file);
        }

        if let Some(host) = lookup(ENV_API_HOST) {
            self.api.host = host;
        }
        if let Some(port) = lookup(ENV_API_PORT) {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", ENV_API_PORT, port),
            }
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            match format.parse() {
                Ok(f) => self.logging.format = f,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_LOG_FORMAT, e),
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# covid-compare Configuration
#
# Environment variables override these settings:
# - COVID_COMPARE_STATES_FILE
# - COVID_COMPARE_API_HOST
# - COVID_COMPARE_API_PORT
# - COVID_COMPARE_LOG_LEVEL
# - COVID_COMPARE_LOG_FORMAT

[data]
# Per-state CSV, already aligned by day of outbreak
# Header: state,name,population,date,day,cases,new_cases,cases_per_1000
states_file = "./data/states.csv"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins (empty = any origin)
cors_origins = ["http://localhost:8091", "http://127.0.0.1:8091"]

# Request timeout in seconds
request_timeout_secs = 30

# Serve the built browser UI from this directory
# ui_dir = "./covid-compare-ui/dist"

[layout]
# Chart wrapper size as a fraction of the viewport
width_fraction = 0.9
height_fraction = 0.9

# Fixed vertical margins (px)
margin_top = 80.0
margin_bottom = 200.0

# Left and right margins, each as a fraction of the viewport width
side_margin_fraction = 0.1

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data.states_file, PathBuf::from("./data/states.csv"));
        assert_eq!(config.api.addr(), "0.0.0.0:8090");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.layout, LayoutConfig::default());
        assert!(config.api.ui_dir.is_none());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.data.states_file, defaults.data.states_file);
        assert_eq!(config.api.port, defaults.api.port);
        assert_eq!(config.api.cors_origins, defaults.api.cors_origins);
        assert_eq!(config.layout, defaults.layout);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
port = 9000

[layout]
margin_bottom = 120.0

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.layout.margin_bottom, 120.0);
        assert_eq!(config.layout.width_fraction, 0.9);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nport = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_STATES_FILE, "/srv/states.csv"),
            (ENV_API_HOST, "127.0.0.1"),
            (ENV_API_PORT, "7000"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data.states_file, PathBuf::from("/srv/states.csv"));
        assert_eq!(config.api.addr(), "127.0.0.1:7000");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_API_PORT => Some("not-a-port".to_string()),
            ENV_LOG_FORMAT => Some("xml".to_string()),
            _ => None,
        });

        assert_eq!(config.api.port, 8090);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }
}
