//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{GetItemTool, ListItemsTool};
#[cfg(feature = "http")]
use super::error::ToolError;
use crate::domains::api::ItemsApi;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Every tool shares the injected Example API client.
pub struct ToolRegistry {
    api: Arc<dyn ItemsApi>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(api: Arc<dyn ItemsApi>) -> Self {
        Self { api }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![ListItemsTool::NAME, GetItemTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![ListItemsTool::to_tool(), GetItemTool::to_tool()]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            ListItemsTool::NAME => ListItemsTool::http_handler(arguments, self.api.clone()).await,
            GetItemTool::NAME => GetItemTool::http_handler(arguments, self.api.clone()).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
