//! Transport layer for the devkit server.
//!
//! - **STDIO**: standard input/output, the default MCP mode - feature: `stdio`
//! - **HTTP**: JSON-RPC over POST plus plain per-tool routes - feature: `http`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server handler.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
