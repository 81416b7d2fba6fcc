//! Domains module containing business logic organized by bounded contexts.
//!
//! - **api**: the remote Example API client and its response models
//! - **tools**: MCP tools exposing the client operations

pub mod api;
pub mod tools;
