//! Domains module containing the MCP-facing surface, organized by bounded
//! context.
//!
//! - `tools`: the developer utilities, one MCP tool each
//! - `resources`: read-only catalog and server information

pub mod resources;
pub mod tools;
