//! List items tool definition.
//!
//! Lists items from the Example API.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError, Peer, RoleServer,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::api::{ClientResult, Item, ItemsApi};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

use super::super::common::{
    client_error_result, default_limit, report_client_error, structured_result, validate_limit,
};
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_value};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list items tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListItemsParams {
    /// Maximum number of items to return.
    #[schemars(description = "Maximum number of items to return (1-100, default 20)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for ListItemsParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// Structured output for the list items tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListItemsResult {
    pub items: Vec<Item>,
    pub total_count: usize,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List items tool - returns items from the Example API.
pub struct ListItemsTool;

impl ListItemsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_items";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List items from the Example API. Returns up to `limit` items (1-100, default 20).";

    /// Delegate to the API, reporting failures before handing them back.
    #[instrument(skip_all, fields(limit = params.limit))]
    pub async fn execute(
        api: &dyn ItemsApi,
        params: &ListItemsParams,
        peer: Option<&Peer<RoleServer>>,
    ) -> ClientResult<Vec<Item>> {
        let limit = validate_limit(params.limit);
        info!("List items tool called with limit {}", limit);

        match api.list_items(limit).await {
            Ok(items) => {
                info!("Fetched {} item(s)", items.len());
                Ok(items)
            }
            Err(e) => {
                report_client_error(peer, Self::NAME, &e).await;
                Err(e)
            }
        }
    }

    /// Convert the API outcome into an MCP tool result.
    pub fn to_call_result(result: ClientResult<Vec<Item>>) -> CallToolResult {
        match result {
            Ok(items) => {
                let total_count = items.len();
                structured_result(
                    format!("Found {} item(s)", total_count),
                    ListItemsResult { items, total_count },
                )
            }
            Err(e) => client_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: Arc<dyn ItemsApi>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: ListItemsParams = parse_arguments(arguments)?;
        let result = Self::execute(api.as_ref(), &params, None).await;
        to_http_value(Self::to_call_result(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListItemsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("List items".into()),
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(api: Arc<dyn ItemsApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let peer = ctx.request_context.peer.clone();
            let api = api.clone();
            async move {
                let params: ListItemsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                let result = Self::execute(api.as_ref(), &params, Some(&peer)).await;
                Ok(Self::to_call_result(result))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
