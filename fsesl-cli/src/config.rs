//! CLI configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via FSESL_CONFIG or --config)
//! 3. Command-line flags and their environment variables

use fsesl_client::ConnectionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection settings as they appear in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Switch hostname or address.
    pub host: String,
    /// Event socket port.
    pub port: u16,
    /// Event socket password.
    pub password: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds (absent = wait indefinitely).
    pub read_timeout_secs: Option<u64>,
    /// Reconnect transparently when a command hits a dead session.
    pub auto_reconnect: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        let defaults = ConnectionConfig::default();
        Self {
            host: defaults.host,
            port: defaults.port,
            password: defaults.password,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            read_timeout_secs: None,
            auto_reconnect: defaults.auto_reconnect,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: FileConfig = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Converts into the client's connection configuration.
    pub fn connection_config(&self) -> ConnectionConfig {
        let mut config =
            ConnectionConfig::new(self.host.clone(), self.port, self.password.clone())
                .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
                .with_auto_reconnect(self.auto_reconnect);
        if let Some(secs) = self.read_timeout_secs {
            config = config.with_read_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
