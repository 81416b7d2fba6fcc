//! Get item tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError, Peer, RoleServer,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::api::{ClientResult, Item, ItemsApi};
use crate::domains::tools::ToolError;

use super::super::common::{client_error_result, report_client_error, structured_result};
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_value};

/// Parameters for the get item tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetItemParams {
    /// Identifier of the item to fetch.
    #[schemars(description = "The unique identifier of the item")]
    pub item_id: String,
}

impl GetItemParams {
    /// Reject blank or dot-segment identifiers before calling the API.
    pub fn validate(&self) -> Result<(), ToolError> {
        let id = self.item_id.trim();
        if id.is_empty() {
            return Err(ToolError::invalid_arguments("'item_id' must not be empty"));
        }
        if id == "." || id == ".." {
            return Err(ToolError::invalid_arguments(format!(
                "'item_id' is not a valid identifier: '{}'",
                self.item_id
            )));
        }
        Ok(())
    }
}

/// Get item tool - fetches a single item by ID.
pub struct GetItemTool;

impl GetItemTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_item";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a single item from the Example API by its ID.";

    /// Delegate to the API, reporting failures before handing them back.
    #[instrument(skip_all, fields(item_id = %params.item_id))]
    pub async fn execute(
        api: &dyn ItemsApi,
        params: &GetItemParams,
        peer: Option<&Peer<RoleServer>>,
    ) -> ClientResult<Item> {
        info!("Get item tool called for {}", params.item_id);

        match api.get_item(&params.item_id).await {
            Ok(item) => Ok(item),
            Err(e) => {
                report_client_error(peer, Self::NAME, &e).await;
                Err(e)
            }
        }
    }

    /// Convert the API outcome into an MCP tool result.
    pub fn to_call_result(result: ClientResult<Item>) -> CallToolResult {
        match result {
            Ok(item) => structured_result(format!("Item {}", item.id), item),
            Err(e) => client_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: Arc<dyn ItemsApi>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GetItemParams = parse_arguments(arguments)?;
        params.validate()?;
        let result = Self::execute(api.as_ref(), &params, None).await;
        to_http_value(Self::to_call_result(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetItemParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Get item".into()),
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
                let params: GetItemParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                params
                    .validate()
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                let result = Self::execute(api.as_ref(), &params, Some(&peer)).await;
                Ok(Self::to_call_result(result))
            }
            .boxed()
        })
    }
}
