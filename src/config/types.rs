//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::catalog::CatalogConfig;
use super::limits::LimitsConfig;
use super::listen::{ListenConfig, WebSocketConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Daemon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// Plaintext line listener.
    pub listen: ListenConfig,
    /// Optional WebSocket listener for browser clients.
    pub websocket: Option<WebSocketConfig>,
    /// Per-connection input limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Items offered for sale.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name shown in logs (e.g., "chowd.local").
    pub name: String,
    /// Prometheus metrics HTTP port. Metrics are not served when unset.
    pub metrics_port: Option<u16>,
}
