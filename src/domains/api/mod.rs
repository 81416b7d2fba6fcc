//! Example API domain module.
//!
//! This module wraps the remote Example API that the server bridges to MCP.
//!
//! ## Architecture
//!
//! - `client.rs` - Authenticated HTTP client and the `ItemsApi` seam
//! - `models.rs` - Response schemas used to validate API payloads
//! - `error.rs` - Tagged client error (configuration, API, schema)
//!
//! Replace the items endpoints with the operations of your actual service.

mod client;
mod error;
pub mod models;

pub use client::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ExampleClient, ItemsApi, Session,
};
pub use error::{ClientError, ClientResult, NETWORK_ERROR_STATUS};
pub use models::{ErrorDetail, Item, ItemListResponse, ItemResponse, Pagination};
