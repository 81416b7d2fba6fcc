//! Client-side error types for the Example API.

use serde_json::Value;
use thiserror::Error;

/// Result type for Example API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Status reported for failures that never produced an HTTP response.
pub const NETWORK_ERROR_STATUS: u16 = 500;

/// Errors produced by the Example API client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Missing or invalid client configuration (credential, base URL).
    #[error("{0}")]
    Config(String),

    /// The API answered with a failure status, or the request never completed.
    #[error("Example API Error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Raw decoded response body, when one was received.
        details: Option<Value>,
    },

    /// A successful response did not match the expected schema.
    #[error("Schema violation: {0}")]
    Schema(String),
}

impl ClientError {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new API error.
    pub fn api(status: u16, message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            details,
        }
    }

    /// Create an API error for a transport-level failure.
    pub fn network(source: impl std::fmt::Display) -> Self {
        Self::api(
            NETWORK_ERROR_STATUS,
            format!("Network error: {}", source),
            None,
        )
    }

    /// Create a new schema violation error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// HTTP status carried by an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(msg) | Self::Schema(msg) => msg,
            Self::Api { message, .. } => message,
        }
    }

    /// Structured view of the error for tool results.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Config(msg) => serde_json::json!({ "kind": "config", "message": msg }),
            Self::Api {
                status,
                message,
                details,
            } => serde_json::json!({
                "kind": "api",
                "status": status,
                "message": message,
                "details": details,
            }),
            Self::Schema(msg) => serde_json::json!({ "kind": "schema", "message": msg }),
        }
    }
}
