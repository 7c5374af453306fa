//! Configuration settings structure
//!
//! Defines the main settings structure and loading logic for the project helpers.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Log levels accepted by `logging.level`
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server configuration
    pub server: ServerSettings,
    /// Remote API configuration
    pub api: ApiSettings,
    /// Local store configuration
    pub store: StoreSettings,
    /// Version lookup configuration
    pub lookup: LookupSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

/// Remote API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the API host
    pub base_url: String,
    /// Token sent as `Authorization: Token <token>`
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Local SQLite store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path of the database file
    pub path: PathBuf,
}

/// Version lookup configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Resolve versions through the remote API instead of the local store
    pub dont_hit_db: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "::".to_string(),
            port: 8000,
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            path: base.join("docsite").join("docsite.db"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            verbose: false,
        }
    }
}

impl ApiSettings {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| Error::config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().merge_with_env()
    }

    /// Apply `DOCSITE_*` environment overrides
    pub fn merge_with_env(self) -> Result<Self> {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn merge_with<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("DOCSITE_HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("DOCSITE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::config(format!("Invalid port: {}", e)))?;
        }

        if let Some(url) = var("DOCSITE_API_URL") {
            self.api.base_url = url;
        }

        if let Some(token) = var("DOCSITE_API_TOKEN") {
            self.api.token = Some(token).filter(|t| !t.is_empty());
        }

        if let Some(timeout) = var("DOCSITE_API_TIMEOUT") {
            self.api.timeout_secs = timeout
                .parse()
                .map_err(|e| Error::config(format!("Invalid API timeout: {}", e)))?;
        }

        if let Some(path) = var("DOCSITE_DB_PATH") {
            self.store.path = PathBuf::from(path);
        }

        if let Some(flag) = var("DOCSITE_DONT_HIT_DB") {
            self.lookup.dont_hit_db = parse_flag(&flag)?;
        }

        if let Some(level) = var("DOCSITE_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }

        Ok(self)
    }

    /// Check the settings for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("Server port must not be 0"));
        }

        url::Url::parse(&self.api.base_url)
            .map_err(|e| Error::config(format!("Invalid API base URL: {}", e)))?;

        if self.api.timeout_secs == 0 {
            return Err(Error::config("API timeout must be positive"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "Unknown log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Effective log filter directive
    pub fn log_directive(&self) -> &str {
        if self.logging.verbose {
            "debug"
        } else {
            self.logging.level.as_str()
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::config(format!("Invalid boolean flag: {}", other))),
    }
}
