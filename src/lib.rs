//! Example API MCP Server Library
//!
//! This crate exposes the Example API to Model Context Protocol clients as a
//! small set of tools, served over STDIO or JSON-RPC over HTTP.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **api**: async client for the Example API and its wire models
//!   - **tools**: MCP tools (`list_items`, `get_item`) backed by the client
//!
//! # Example
//!
//! ```rust,no_run
//! use example_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::from_config(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::api::{ClientError, ExampleClient, ItemsApi};

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
