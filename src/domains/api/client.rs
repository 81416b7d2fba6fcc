//! Async HTTP client for the Example API.
//!
//! The client owns at most one `reqwest::Client` session. The session is
//! opened lazily on first use, reused across calls and dropped by
//! [`ExampleClient::close`] or when a [`Session`] guard goes out of scope.

use std::ops::Deref;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, header};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::{ClientError, ClientResult};
use super::models::{Item, decode};
use crate::core::config::ApiConfig;

/// Environment variable holding the bearer token.
pub const API_KEY_ENV: &str = "EXAMPLE_API_KEY";

/// Base URL of the Example API.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const UNKNOWN_ERROR: &str = "Unknown error";

// ============================================================================
// Items API
// ============================================================================

/// Operations the tool layer needs from the Example API.
#[async_trait]
pub trait ItemsApi: Send + Sync {
    /// List up to `limit` items.
    async fn list_items(&self, limit: u32) -> ClientResult<Vec<Item>>;

    /// Fetch a single item by identifier.
    async fn get_item(&self, item_id: &str) -> ClientResult<Item>;
}

// ============================================================================
// Client
// ============================================================================

/// Authenticated client for the Example API.
pub struct ExampleClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    session: Mutex<Option<reqwest::Client>>,
}

impl std::fmt::Debug for ExampleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExampleClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("session_open", &self.is_open())
            .finish()
    }
}

impl ExampleClient {
    /// Create a client from an explicit key, falling back to `EXAMPLE_API_KEY`.
    pub fn new(api_key: Option<String>) -> ClientResult<Self> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()))
            .ok_or_else(|| ClientError::config(format!("{} is required", API_KEY_ENV)))?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            session: Mutex::new(None),
        })
    }

    /// Create a client from the API section of the server configuration.
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        Ok(Self::new(config.api_key.clone())?
            .with_base_url(&config.base_url)?
            .with_timeout(Duration::from_secs(config.timeout_secs)))
    }

    /// Point the client at another base URL.
    pub fn with_base_url(mut self, base_url: &str) -> ClientResult<Self> {
        parse_base_url(base_url)?;
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session is currently open.
    pub fn is_open(&self) -> bool {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Open a session scoped to the returned guard.
    ///
    /// The session is closed when the guard is dropped, whichever way the
    /// enclosing scope is left.
    pub fn session(&self) -> ClientResult<Session<'_>> {
        self.ensure_session()?;
        Ok(Session { client: self })
    }

    /// Close the HTTP session. Does nothing when no session is open.
    pub fn close(&self) {
        let closed = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if closed.is_some() {
            debug!("Closed Example API session");
        }
    }

    fn ensure_session(&self) -> ClientResult<reqwest::Client> {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = session.as_ref() {
            return Ok(client.clone());
        }

        let client = self.build_session()?;
        debug!(base_url = %self.base_url, "Opened Example API session");
        *session = Some(client.clone());
        Ok(client)
    }

    fn build_session(&self) -> ClientResult<reqwest::Client> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| ClientError::config("Invalid API key format"))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| ClientError::config(format!("Failed to build HTTP client: {}", e)))
    }

    /// Append `segments` to the base URL path, percent-encoding each one.
    ///
    /// A segment containing `/` stays a single segment, so caller-supplied
    /// identifiers cannot walk out of the resource they address.
    fn url_for(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::config(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a request to the Example API and decode the JSON response.
    ///
    /// `segments` are appended to the base URL path. Query parameters whose
    /// value is `None` are dropped.
    #[instrument(skip(self, query, body))]
    pub async fn request(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, Option<String>)],
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let url = self.url_for(segments)?;
        let session = self.ensure_session()?;

        let params: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
            .collect();

        let mut request = session.request(method, url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Request to Example API failed: {}", e);
            ClientError::network(e)
        })?;

        let status = response.status().as_u16();
        let result: Value = response.json().await.map_err(|e| {
            warn!("Failed to decode Example API response: {}", e);
            ClientError::network(e)
        })?;

        if status >= 400 {
            let message = extract_error_message(&result);
            debug!(status, %message, "Example API returned an error");
            return Err(ClientError::api(status, message, Some(result)));
        }

        Ok(result)
    }

    // ========================================================================
    // API Methods
    // ========================================================================

    /// List items, returning an empty list when the response has no `items`.
    pub async fn list_items(&self, limit: u32) -> ClientResult<Vec<Item>> {
        let mut data = self
            .request(
                Method::GET,
                &["items"],
                &[("limit", Some(limit.to_string()))],
                None,
            )
            .await?;

        match data.as_object_mut().and_then(|body| body.remove("items")) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(items) => decode(items, "items"),
        }
    }

    /// Get a single item by ID.
    pub async fn get_item(&self, item_id: &str) -> ClientResult<Item> {
        let data = self
            .request(Method::GET, &["items", item_id], &[], None)
            .await?;
        decode(data, "item")
    }
}

#[async_trait]
impl ItemsApi for ExampleClient {
    async fn list_items(&self, limit: u32) -> ClientResult<Vec<Item>> {
        ExampleClient::list_items(self, limit).await
    }

    async fn get_item(&self, item_id: &str) -> ClientResult<Item> {
        ExampleClient::get_item(self, item_id).await
    }
}

/// Guard over an open client session; closes it on drop.
pub struct Session<'a> {
    client: &'a ExampleClient,
}

impl Deref for Session<'_> {
    type Target = ExampleClient;

    fn deref(&self) -> &Self::Target {
        self.client
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.client.close();
    }
}

fn parse_base_url(base_url: &str) -> ClientResult<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| ClientError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::config(format!(
            "Invalid base URL '{}': not a hierarchical URL",
            base_url
        )));
    }
    Ok(url)
}

/// Pull a human-readable message out of an error response body.
fn extract_error_message(body: &Value) -> String {
    let Some(map) = body.as_object() else {
        return UNKNOWN_ERROR.to_string();
    };

    match map.get("error") {
        Some(Value::Object(error)) => error
            .get("message")
            .map(value_text)
            .unwrap_or_else(|| Value::Object(error.clone()).to_string()),
        Some(Value::Null) | None => map
            .get("message")
            .map(value_text)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        Some(scalar) => value_text(scalar),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ExampleClient {
        ExampleClient::new(Some("test-key".to_string()))
            .unwrap()
            .with_base_url(&format!("{}/v1", server.uri()))
            .unwrap()
    }

    #[test]
    fn test_missing_api_key() {
        let _lock = crate::ENV_TEST_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        unsafe {
            std::env::remove_var(API_KEY_ENV);
        }
        let err = ExampleClient::new(None).unwrap_err();
        assert_eq!(err, ClientError::config("EXAMPLE_API_KEY is required"));
    }

    #[test]
    fn test_api_key_from_env() {
        let _lock = crate::ENV_TEST_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        unsafe {
            std::env::set_var(API_KEY_ENV, "env-key");
        }
        let client = ExampleClient::new(None);
        unsafe {
            std::env::remove_var(API_KEY_ENV);
        }
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ExampleClient::new(Some("k".to_string()))
            .unwrap()
            .with_base_url("not a url");
        assert!(matches!(result, Err(ClientError::Config(_))));

        let result = ExampleClient::new(Some("k".to_string()))
            .unwrap()
            .with_base_url("mailto:api@example.com");
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = ExampleClient::new(Some("super_secret_key".to_string())).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_extract_error_message_variants() {
        assert_eq!(
            extract_error_message(&json!({"error": {"message": "Bad key"}})),
            "Bad key"
        );
        assert_eq!(
            extract_error_message(&json!({"error": {"code": "x"}})),
            r#"{"code":"x"}"#
        );
        assert_eq!(extract_error_message(&json!({"error": "Forbidden"})), "Forbidden");
        assert_eq!(extract_error_message(&json!({"error": 42})), "42");
        assert_eq!(extract_error_message(&json!({"message": "Slow down"})), "Slow down");
        assert_eq!(extract_error_message(&json!({"other": true})), UNKNOWN_ERROR);
        assert_eq!(extract_error_message(&json!(["not", "an", "object"])), UNKNOWN_ERROR);
    }

    #[tokio::test]
    async fn test_list_items_sends_auth_and_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/items"))
            .and(query_param("limit", "10"))
            .and(header("Authorization", "Bearer test-key"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"id": "1", "name": "Item 1"}, {"id": "2", "name": "Item 2"}],
                "pagination": {"hasMore": false}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let items = client.list_items(10).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[1].name.as_deref(), Some("Item 2"));
    }

    #[tokio::test]
    async fn test_list_items_without_items_field() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.list_items(20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_items_schema_violation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/items"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"items": [{"name": "no id"}]})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.list_items(5).await.unwrap_err();
        assert!(matches!(err, ClientError::Schema(_)));
    }

    #[tokio::test]
    async fn test_get_item() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/items/item_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "item_1",
                "name": "Item 1",
                "description": "Test item"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let item = client.get_item("item_1").await.unwrap();
        assert_eq!(item.id, "item_1");
        assert_eq!(item.description.as_deref(), Some("Test item"));
    }

    #[tokio::test]
    async fn test_get_item_passes_unmodeled_fields_through() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1",
                "name": "n",
                "price": 5,
                "tags": ["a"]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let item = client.get_item("1").await.unwrap();
        let result = crate::domains::tools::definitions::GetItemTool::to_call_result(Ok(item));

        assert_eq!(
            result.structured_content,
            Some(json!({"id": "1", "name": "n", "metadata": {}, "price": 5, "tags": ["a"]}))
        );
    }

    #[tokio::test]
    async fn test_get_item_id_is_a_single_path_segment() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/admin/keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "secret"})))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Item not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_item("../admin/keys").await.unwrap_err();
        assert_eq!(err.status(), Some(404));

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].url.path(), "/v1/items/..%2Fadmin%2Fkeys");
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let client = ExampleClient::new(Some("k".to_string()))
            .unwrap()
            .with_base_url("https://api.example.com/v1/")
            .unwrap();
        let url = client.url_for(&["items", "a b"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/items/a%20b");
    }

    #[tokio::test]
    async fn test_error_object_message() {
        let server = MockServer::start().await;
        let body = json!({"error": {"message": "Unauthorized", "code": "auth"}});

        Mock::given(method("GET"))
            .and(path("/v1/items"))
            .respond_with(ResponseTemplate::new(401).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.list_items(20).await.unwrap_err();
        assert_eq!(err, ClientError::api(401, "Unauthorized", Some(body)));
    }

    #[tokio::test]
    async fn test_error_top_level_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/items/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Item not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_item("missing").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "Item not found");
    }

    #[tokio::test]
    async fn test_error_without_message_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/items"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"retry": true})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.list_items(1).await {
            Err(ClientError::Api {
                status,
                message,
                details,
            }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Unknown error");
                assert_eq!(details, Some(json!({"retry": true})));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_network_error_normalized() {
        let client = ExampleClient::new(Some("k".to_string()))
            .unwrap()
            .with_base_url("http://127.0.0.1:1")
            .unwrap()
            .with_timeout(Duration::from_secs(2));

        let err = client.list_items(20).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.message().starts_with("Network error: "));
        assert!(matches!(err, ClientError::Api { details: None, .. }));
    }

    #[tokio::test]
    async fn test_request_strips_none_query_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("q", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .request(
                Method::GET,
                &["search"],
                &[("q", Some("abc".to_string())), ("cursor", None)],
                None,
            )
            .await
            .unwrap();
        assert_eq!(result, json!({"ok": true}));

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), Some("q=abc"));
    }

    #[tokio::test]
    async fn test_request_sends_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/items"))
            .and(wiremock::matchers::body_json(json!({"name": "new"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "n1"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .request(Method::POST, &["items"], &[], Some(&json!({"name": "new"})))
            .await
            .unwrap();
        assert_eq!(result["id"], "n1");
    }

    #[tokio::test]
    async fn test_session_is_lazy_and_reused() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(!client.is_open());

        client.list_items(1).await.unwrap();
        assert!(client.is_open());
        client.list_items(1).await.unwrap();
        assert!(client.is_open());

        client.close();
        assert!(!client.is_open());
        client.close();
        assert!(!client.is_open());
    }

    #[tokio::test]
    async fn test_scoped_session_closes_on_error() {
        let client = ExampleClient::new(Some("k".to_string()))
            .unwrap()
            .with_base_url("http://127.0.0.1:1")
            .unwrap();

        let outcome: ClientResult<Vec<Item>> = async {
            let session = client.session()?;
            assert!(session.is_open());
            session.list_items(1).await
        }
        .await;

        assert!(outcome.is_err());
        assert!(!client.is_open());
    }
}
