//! Common utilities shared across tools.
//!
//! Result formatting, limit handling and the error side channel used when
//! the Example API call fails.

use rmcp::{
    Peer, RoleServer,
    model::{CallToolResult, Content, LoggingLevel, LoggingMessageNotificationParam},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::domains::api::ClientError;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Default number of items returned by list tools.
pub const DEFAULT_LIMIT: u32 = 20;

/// Upper bound accepted by the Example API.
pub const MAX_LIMIT: u32 = 100;

/// Default limit for list results.
pub fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Clamp limit to the allowed range (1-100).
pub fn validate_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIMIT)
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with a summary line and structured content.
pub fn structured_result<T: Serialize>(summary: String, data: T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(value) => {
            let mut result = CallToolResult::structured(value);
            result.content.insert(0, Content::text(summary));
            result
        }
        Err(e) => error_result(&format!("Failed to serialize tool output: {}", e)),
    }
}

/// Turn a client error into an `isError` tool result.
pub fn client_error_result(err: &ClientError) -> CallToolResult {
    let mut result = CallToolResult::structured_error(err.to_json());
    result.content.insert(0, Content::text(err.to_string()));
    result
}

/// Report a client error through the side channel.
///
/// The error is always logged; when a peer is available it also receives an
/// MCP logging notification.
pub async fn report_client_error(peer: Option<&Peer<RoleServer>>, tool: &str, err: &ClientError) {
    error!(tool, status = ?err.status(), "API error: {}", err.message());

    let Some(peer) = peer else {
        return;
    };

    let notification = LoggingMessageNotificationParam {
        level: LoggingLevel::Error,
        logger: Some(tool.to_string()),
        data: serde_json::json!({
            "message": format!("API error: {}", err.message()),
            "error": err.to_json(),
        }),
    };
    if let Err(e) = peer.notify_logging_message(notification).await {
        warn!("Failed to forward error to client: {}", e);
    }
}

/// Decode HTTP tool arguments into a parameters struct.
#[cfg(feature = "http")]
pub fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: serde_json::Value,
) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Serialize a tool result for the HTTP transport.
#[cfg(feature = "http")]
pub fn to_http_value(result: CallToolResult) -> Result<serde_json::Value, ToolError> {
    serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(10), 10);
        assert_eq!(validate_limit(0), 1);
        assert_eq!(validate_limit(200), 100);
        assert_eq!(validate_limit(DEFAULT_LIMIT), 20);
    }

    #[test]
    fn test_structured_result_has_summary_first() {
        let result = structured_result("Found 1".to_string(), serde_json::json!({"n": 1}));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(serde_json::json!({"n": 1})));
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => assert_eq!(text.text, "Found 1"),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_client_error_result() {
        let err = ClientError::api(401, "Unauthorized", None);
        let result = client_error_result(&err);
        assert_eq!(result.is_error, Some(true));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["status"], 401);
        assert_eq!(structured["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_report_without_peer() {
        let err = ClientError::network("timed out");
        report_client_error(None, "list_items", &err).await;
    }
}
