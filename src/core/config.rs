//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and a `.env` file, if present) or defaults.

use super::transport::TransportConfig;
use crate::domains::renshuu::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// OpenAPI document served by the HTTP façade when none is configured.
pub const DEFAULT_OPENAPI_PATH: &str = "api-docs-local.json";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Renshuu API credentials.
    pub credentials: CredentialsConfig,

    /// Remote service location and proxy assets.
    pub renshuu: RenshuuConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Bearer credentials for the Renshuu API.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Write-capable key (`RENSHUU_WRITE_KEY`).
    pub write_key: Option<String>,

    /// Read-only key (`RENSHUU_READ_KEY`).
    pub read_key: Option<String>,
}

impl CredentialsConfig {
    /// The key used for every remote call. The write key wins when both are set.
    pub fn api_key(&self) -> Option<&str> {
        self.write_key.as_deref().or(self.read_key.as_deref())
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("write_key", &self.write_key.as_ref().map(|_| "[REDACTED]"))
            .field("read_key", &self.read_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Remote service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenshuuConfig {
    /// Base URL every API path is joined onto.
    pub base_url: String,

    /// OpenAPI document served at `/openapi.json`.
    pub openapi_path: PathBuf,
}

impl Default for RenshuuConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            openapi_path: PathBuf::from(DEFAULT_OPENAPI_PATH),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "renshuu-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            renshuu: RenshuuConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Nothing is logged here since logging is not initialised yet; call
    /// [`Config::log_warnings`] once it is.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(value) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = !matches!(
                value.trim().to_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.credentials.write_key = non_empty_var("RENSHUU_WRITE_KEY");
        config.credentials.read_key = non_empty_var("RENSHUU_READ_KEY");

        if let Some(base_url) = non_empty_var("RENSHUU_BASE_URL") {
            config.renshuu.base_url = base_url;
        }

        if let Some(path) = non_empty_var("RENSHUU_OPENAPI_PATH") {
            config.renshuu.openapi_path = PathBuf::from(path);
        }

        config
    }

    /// Report configuration problems that do not prevent startup.
    pub fn log_warnings(&self) {
        match (&self.credentials.write_key, &self.credentials.read_key) {
            (Some(_), _) => info!("Using Renshuu write key"),
            (None, Some(_)) => info!("Using Renshuu read key; write operations may be rejected"),
            (None, None) => warn!(
                "Neither RENSHUU_WRITE_KEY nor RENSHUU_READ_KEY is set. \
                 Every Renshuu API call will fail until one is provided."
            ),
        }

        if self.renshuu.base_url != DEFAULT_BASE_URL {
            info!("Renshuu base URL overridden: {}", self.renshuu.base_url);
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
