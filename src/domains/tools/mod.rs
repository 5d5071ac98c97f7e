//! Tools domain module.
//!
//! Tools are the developer utilities exposed to MCP clients. Each one takes
//! text arguments, runs a pure transform from `crate::transforms`, and
//! returns the output (optionally copied to the clipboard).
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool definitions (one file per tool)
//! - `handlers.rs` - Shared pipeline: arguments, transform, result, clipboard
//! - `registry.rs` - `ToolKind`, descriptors, lookup by name or path
//! - `router.rs` - rmcp ToolRouter builder for the STDIO transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a file in `definitions/` with a params struct and a
//!    `ToolDefinition` impl
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a `ToolKind` variant, list it in `ToolKind::ALL`, and map it in
//!    `with_definition!`

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use definitions::ToolDefinition;
pub use error::ToolError;
pub use handlers::*;
pub use registry::{ToolDescriptor, ToolKind, ToolRegistry};
pub use router::build_tool_router;
