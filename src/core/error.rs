//! Error types and handling for the MCP server.
//!
//! The crate-wide error type covers startup failures: configuration and the
//! Example API client.

use thiserror::Error;

use crate::domains::api::ClientError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the Example API client.
    #[error("API client error: {0}")]
    Client(#[from] ClientError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Lift client configuration failures into [`Error::Config`].
    pub fn from_client(err: ClientError) -> Self {
        match err {
            ClientError::Config(msg) => Self::Config(msg),
            other => Self::Client(other),
        }
    }
}
