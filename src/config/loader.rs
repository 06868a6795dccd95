use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `<config_dir>/home-launcher/config.toml` via `dirs::config_dir()`,
    /// falling back to the current directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("home-launcher").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Capacities and the clock interval are non-zero
    /// - App packages are non-empty and unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        let launcher = &self.launcher;
        if launcher.recent_capacity == 0 {
            return Err(validation("recent_capacity must be at least 1"));
        }
        if launcher.clock_interval_ms == 0 {
            return Err(validation("clock_interval_ms must be at least 1"));
        }
        if launcher.intent_buffer == 0 || launcher.event_buffer == 0 {
            return Err(validation("intent_buffer and event_buffer must be at least 1"));
        }

        let mut seen = HashSet::new();
        for app in &self.apps {
            if app.package.trim().is_empty() {
                return Err(validation(format!("App '{}' has an empty package", app.label)));
            }
            if !seen.insert(app.package.as_str()) {
                return Err(validation(format!("Duplicate app package '{}'", app.package)));
            }
        }

        Ok(())
    }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
