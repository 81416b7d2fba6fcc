//! Configuration management for the MCP server.
//!
//! Configuration is assembled from defaults, a `.env` file when present and
//! environment variables.

use super::transport::TransportConfig;
use crate::domains::api::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Example API connection settings.
    pub api: ApiConfig,
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
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Example API connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bearer token for the Example API.
    pub api_key: Option<String>,

    /// Base URL every request path is appended to.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-example".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL`, loading `.env` first when present.
    ///
    /// Kept separate from [`Config::from_env`] so the subscriber can be
    /// installed before the rest of the configuration logs anything.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        match std::env::var("MCP_LOG_LEVEL") {
            Ok(level) if !level.is_empty() => Self { level },
            _ => Self::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). API settings use the
    /// `EXAMPLE_API_` prefix.
    pub fn from_env() -> Self {
        let mut config = Self {
            logging: LoggingConfig::from_env(),
            ..Self::default()
        };

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.transport = TransportConfig::from_env();

        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => {
                config.api.api_key = Some(key);
                info!("Example API key loaded from environment");
            }
            _ => warn!("{} not set - tool calls cannot be served", API_KEY_ENV),
        }

        if let Ok(base_url) = std::env::var("EXAMPLE_API_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("EXAMPLE_API_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.api.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid EXAMPLE_API_TIMEOUT_SECS '{}', using {}s",
                    timeout, config.api.timeout_secs
                ),
            }
        }

        config
    }
}
