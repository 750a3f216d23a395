use std::fs;
use std::net::SocketAddr;
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
    /// Uses `~/.config/blogtree/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("blogtree").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
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
    /// - Both bind addresses parse as socket addresses
    /// - The navigation parameter is not empty
    /// - The client script path is absolute
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (service, addr) in [
            ("render", &self.render.bind_addr),
            ("delivery", &self.delivery.bind_addr),
        ] {
            if addr.parse::<SocketAddr>().is_err() {
                return Err(ConfigError::ValidationError {
                    message: format!("Invalid {} bind address '{}'", service, addr),
                });
            }
        }

        if self.delivery.navigation_param.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Navigation parameter must not be empty".to_string(),
            });
        }

        if !self.delivery.client_script_path.starts_with('/') {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Client script path '{}' must start with '/'",
                    self.delivery.client_script_path
                ),
            });
        }

        Ok(())
    }

    /// Copyright year to print: the configured one, else the current UTC year.
    pub fn site_year(&self) -> i32 {
        self.site
            .year
            .unwrap_or_else(|| time::OffsetDateTime::now_utc().year())
    }
}
