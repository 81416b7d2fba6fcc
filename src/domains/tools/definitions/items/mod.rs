//! Example API item tools.
//!
//! - `list`: List items with an optional limit
//! - `get`: Fetch a single item by ID

pub mod get;
pub mod list;

pub use get::{GetItemParams, GetItemTool};
pub use list::{ListItemsParams, ListItemsResult, ListItemsTool};
