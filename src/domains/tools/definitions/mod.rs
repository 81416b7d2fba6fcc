//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod items;

#[cfg(test)]
pub(crate) mod testing;

pub use items::{GetItemParams, GetItemTool, ListItemsParams, ListItemsResult, ListItemsTool};
