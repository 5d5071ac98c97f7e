//! Pure text transforms behind every tool.
//!
//! Nothing in here knows about MCP: each function takes input text and
//! returns a value or a [`TransformError`]. The tool definitions in
//! `domains::tools` wrap these for clients.
//!
//! - `base64`: Base64 codec and the Base64url decoder used for JWT segments
//! - `json`: pretty-printing and minifying
//! - `slug`: URL slugs
//! - `cpf`: CPF generation and check-digit validation
//! - `uuid`: UUID v1/v4/v5
//! - `jwt`: decode-only JWT inspection
//! - `timestamp`: format classification and epoch conversions
//! - `regex`: regex tester and pattern explainer

pub mod base64;
pub mod cpf;
mod error;
pub mod json;
pub mod jwt;
pub mod regex;
pub mod slug;
pub mod timestamp;
pub mod uuid;

pub use error::{ErrorKind, TransformError};
