//! In-memory `ItemsApi` double for tool tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domains::api::{ClientError, ClientResult, Item, ItemsApi};

/// Records every call and answers with canned responses.
pub(crate) struct MockItemsApi {
    list_response: ClientResult<Vec<Item>>,
    get_response: ClientResult<Item>,
    list_calls: Mutex<Vec<u32>>,
    get_calls: Mutex<Vec<String>>,
}

impl MockItemsApi {
    /// Two items for `list_items`, item "1" for `get_item`.
    pub(crate) fn new() -> Self {
        let mut item = Item::new("1").with_name("Item 1");
        item.description = Some("Test item".to_string());

        Self {
            list_response: Ok(vec![
                Item::new("1").with_name("Item 1"),
                Item::new("2").with_name("Item 2"),
            ]),
            get_response: Ok(item),
            list_calls: Mutex::new(Vec::new()),
            get_calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `err`.
    pub(crate) fn failing(err: ClientError) -> Self {
        Self {
            list_response: Err(err.clone()),
            get_response: Err(err),
            ..Self::new()
        }
    }

    pub(crate) fn list_calls(&self) -> Vec<u32> {
        self.list_calls.lock().unwrap().clone()
    }

    pub(crate) fn get_calls(&self) -> Vec<String> {
        self.get_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemsApi for MockItemsApi {
    async fn list_items(&self, limit: u32) -> ClientResult<Vec<Item>> {
        self.list_calls.lock().unwrap().push(limit);
        self.list_response.clone()
    }

    async fn get_item(&self, item_id: &str) -> ClientResult<Item> {
        self.get_calls.lock().unwrap().push(item_id.to_string());
        self.get_response.clone()
    }
}
