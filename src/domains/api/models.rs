//! Response models for the Example API.
//!
//! Wire names are camelCase. Each aliased field also accepts its snake_case
//! name, so payloads produced by this crate decode back unchanged.
//! Decoding failures surface as [`ClientError::Schema`].

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::error::{ClientError, ClientResult};

// ============================================================================
// Common Models
// ============================================================================

/// Pagination information attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    /// Opaque cursor for the next page.
    #[serde(
        rename = "nextCursor",
        alias = "next_cursor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_cursor: Option<String>,

    /// Whether more pages exist.
    #[serde(rename = "hasMore", alias = "has_more", default)]
    pub has_more: bool,
}

impl Pagination {
    /// A missing cursor must not advertise more results.
    pub fn is_consistent(&self) -> bool {
        self.next_cursor.is_some() || !self.has_more
    }
}

// ============================================================================
// Resource Models
// ============================================================================

/// An item returned by the Example API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Item {
    /// Item identifier, never empty.
    #[serde(deserialize_with = "non_empty_string")]
    #[schemars(with = "String")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp as sent by the API.
    #[serde(
        rename = "createdAt",
        alias = "created_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    /// Last update timestamp as sent by the API.
    #[serde(
        rename = "updatedAt",
        alias = "updated_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,

    /// Additional free-form metadata.
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Fields the API sends beyond the ones above, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Create an item carrying only its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            created_at: None,
            updated_at: None,
            metadata: Map::new(),
            extra: Map::new(),
        }
    }

    /// Set the item name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Response for listing items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemListResponse {
    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub pagination: Pagination,
}

/// Response envelope for a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemResponse {
    pub data: Item,
}

// ============================================================================
// Error Models
// ============================================================================

/// Error detail as reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Correlation identifier of the failed request.
    #[serde(
        rename = "requestId",
        alias = "request_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_id: Option<String>,
}

// ============================================================================
// Decoding helpers
// ============================================================================

/// Decode a JSON value into a model, mapping failures to schema violations.
pub fn decode<T: DeserializeOwned>(value: Value, what: &str) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::schema(format!("{}: {}", what, e)))
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(serde::de::Error::custom("identifier must not be empty"));
    }
    Ok(value)
}
