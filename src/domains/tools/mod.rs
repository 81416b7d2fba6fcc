//! Tools domain module.
//!
//! Tools are the MCP-callable operations of this server. Each one maps a
//! protocol call onto an Example API client method and forwards its result
//! or error unchanged.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder for STDIO transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add the operation to the `ItemsApi` trait and `ExampleClient`
//! 2. Create a new file in `definitions/` with params, `execute()`,
//!    `http_handler()` and `create_route()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add route in `router.rs` using `with_route()`
//! 5. Register in `registry.rs` for HTTP support

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
