//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The closed set of tools (`ToolKind`) in registration order
//! - Descriptors for listing (name, title, URL path, description)
//! - Lookup by MCP name or URL path and dispatch of tool calls

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::Serialize;
use tracing::warn;

use super::definitions::{
    Base64Tool, CpfTool, JsonFormatterTool, JwtDecoderTool, RegexTool, SlugTool, TimestampTool,
    ToolDefinition, UuidTool,
};
use super::error::ToolError;
use super::handlers;
use crate::core::clipboard::SharedClipboard;

/// Run `$body` with `$def` bound to the definition type of `$kind`.
macro_rules! with_definition {
    ($kind:expr, $def:ident => $body:expr) => {
        match $kind {
            ToolKind::JsonFormatter => {
                type $def = JsonFormatterTool;
                $body
            }
            ToolKind::Base64 => {
                type $def = Base64Tool;
                $body
            }
            ToolKind::Slug => {
                type $def = SlugTool;
                $body
            }
            ToolKind::Cpf => {
                type $def = CpfTool;
                $body
            }
            ToolKind::Uuid => {
                type $def = UuidTool;
                $body
            }
            ToolKind::Jwt => {
                type $def = JwtDecoderTool;
                $body
            }
            ToolKind::Timestamp => {
                type $def = TimestampTool;
                $body
            }
            ToolKind::Regex => {
                type $def = RegexTool;
                $body
            }
        }
    };
}

// ============================================================================
// Tool Kinds
// ============================================================================

/// Every tool the server knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    JsonFormatter,
    Base64,
    Slug,
    Cpf,
    Uuid,
    Jwt,
    Timestamp,
    Regex,
}

impl ToolKind {
    /// All tools, in listing order.
    pub const ALL: [ToolKind; 8] = [
        ToolKind::JsonFormatter,
        ToolKind::Base64,
        ToolKind::Slug,
        ToolKind::Cpf,
        ToolKind::Uuid,
        ToolKind::Jwt,
        ToolKind::Timestamp,
        ToolKind::Regex,
    ];

    /// Static metadata of this tool.
    pub fn descriptor(self) -> ToolDescriptor {
        with_definition!(self, T => ToolDescriptor::of::<T>())
    }

    /// MCP tool name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// URL path.
    pub fn path(self) -> &'static str {
        self.descriptor().path
    }

    /// MCP tool model, including the input schema.
    pub fn to_tool(self) -> Tool {
        with_definition!(self, T => handlers::to_tool::<T>())
    }

    /// rmcp route for this tool.
    pub fn route<S>(self, clipboard: SharedClipboard) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        with_definition!(self, T => handlers::create_route::<T, S>(clipboard))
    }

    /// Run this tool with raw JSON arguments.
    pub async fn call(
        self,
        arguments: Option<JsonObject>,
        clipboard: &SharedClipboard,
    ) -> Result<CallToolResult, ToolError> {
        with_definition!(self, T => handlers::run::<T>(arguments, clipboard.as_ref()).await)
    }

    /// Look a tool up by its MCP name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Look a tool up by its URL path. A missing leading `/` is tolerated.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|kind| kind.path().trim_start_matches('/') == path)
    }
}

// ============================================================================
// Tool Descriptor
// ============================================================================

/// Listing entry for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

impl ToolDescriptor {
    /// Descriptor of a definition.
    pub fn of<T: ToolDefinition>() -> Self {
        Self {
            name: T::NAME,
            title: T::TITLE,
            path: T::PATH,
            description: T::DESCRIPTION,
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - lists tools and dispatches calls by name or path.
///
/// Both the MCP handler and the HTTP transport go through this type, so
/// both see exactly `ToolKind::ALL`.
#[derive(Clone)]
pub struct ToolRegistry {
    clipboard: SharedClipboard,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(clipboard: SharedClipboard) -> Self {
        Self { clipboard }
    }

    /// Descriptors of all tools, in listing order.
    pub fn list_all() -> Vec<ToolDescriptor> {
        ToolKind::ALL.iter().map(|kind| kind.descriptor()).collect()
    }

    /// All tools as MCP tool models.
    pub fn get_all_tools() -> Vec<Tool> {
        ToolKind::ALL.iter().map(|kind| kind.to_tool()).collect()
    }

    /// Descriptor of the tool with this MCP name.
    pub fn find_by_name(name: &str) -> Option<ToolDescriptor> {
        ToolKind::from_name(name).map(ToolKind::descriptor)
    }

    /// Descriptor of the tool served at this URL path.
    pub fn find_by_path(path: &str) -> Option<ToolDescriptor> {
        ToolKind::from_path(path).map(ToolKind::descriptor)
    }

    /// Dispatch a call by MCP tool name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let Some(kind) = ToolKind::from_name(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };
        kind.call(arguments, &self.clipboard).await
    }

    /// Dispatch a call by URL path.
    pub async fn call_path(
        &self,
        path: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let Some(kind) = ToolKind::from_path(path) else {
            warn!("Unknown tool path requested: {}", path);
            return Err(ToolError::not_found(path));
        };
        kind.call(arguments, &self.clipboard).await
    }
}
