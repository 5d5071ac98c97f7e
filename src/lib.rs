//! Developer utilities over MCP.
//!
//! This crate serves a small toolbox of text utilities (JSON formatting,
//! Base64, slugs, CPF numbers, UUIDs, JWT inspection, timestamp conversion,
//! regex testing) as MCP tools, over STDIO or HTTP.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the clipboard capability, the
//!   MCP server handler and the transports
//! - **domains**: the MCP-facing surface
//!   - **tools**: one tool per utility, plus the registry that lists them
//!   - **resources**: the tool catalog and server information
//! - **transforms**: the pure text transforms the tools wrap
//!
//! # Example
//!
//! ```rust,no_run
//! use devkit_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     let slug = server
//!         .call_tool("slug_generator", serde_json::json!({"input": "Hello World"}))
//!         .await?;
//!     println!("{}", slug["content"][0]["text"]);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod transforms;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
