//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Used by the STDIO transport. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{GetItemTool, ListItemsTool};
use crate::domains::api::ItemsApi;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: Arc<dyn ItemsApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListItemsTool::create_route(api.clone()))
        .with_route(GetItemTool::create_route(api))
}
