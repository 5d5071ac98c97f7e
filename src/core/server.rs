//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools and resources domains.
//!
//! The ToolRouter is built from `ToolKind::ALL` in `domains/tools/router.rs`;
//! adding a tool does not touch this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::ToolRouter,
    model::*,
    service::RequestContext,
    tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::clipboard::{self, SharedClipboard};
use super::config::Config;
use super::error;
use crate::domains::resources::{ResourceService, ServerSnapshot};
use crate::domains::tools::{
    ToolDescriptor, ToolError, ToolRegistry, build_tool_router, call_result_to_json,
};

const INSTRUCTIONS: &str = "Developer utilities: JSON formatter, Base64 encoder/decoder, slug \
generator, CPF generator/validator, UUID generator, JWT decoder (no signature verification), \
timestamp converter and regex tester/explainer. Pass `copy: true` to also place the output on \
the server's clipboard. Read devkit://tools for the catalog.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It holds only
/// immutable shared state, so clones are cheap and independent.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool lookup and dispatch by name or path (HTTP transport).
    tools: ToolRegistry,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new server, with the clipboard described by the configuration.
    pub fn new(config: Config) -> Self {
        let clipboard = clipboard::from_config(&config.clipboard);
        Self::with_clipboard(config, clipboard)
    }

    /// Create a new server using the given clipboard.
    pub fn with_clipboard(config: Config, clipboard: SharedClipboard) -> Self {
        let config = Arc::new(config);

        let snapshot = ServerSnapshot {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
            transport: config.transport.name().to_string(),
            clipboard: clipboard.describe(),
        };
        let resource_service = Arc::new(ResourceService::new(snapshot));

        Self {
            tool_router: build_tool_router::<Self>(clipboard.clone()),
            tools: ToolRegistry::new(clipboard),
            config,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools in MCP `tools/list` shape.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Tool descriptors in listing order.
    pub fn tool_catalog(&self) -> Vec<ToolDescriptor> {
        ToolRegistry::list_all()
    }

    /// Call a tool by MCP name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> error::Result<serde_json::Value> {
        let result = self.tools.call_tool(name, into_arguments(arguments)?).await?;
        Ok(call_result_to_json(&result)?)
    }

    /// Call the tool served at a URL path.
    pub async fn call_tool_at_path(
        &self,
        path: &str,
        arguments: serde_json::Value,
    ) -> error::Result<serde_json::Value> {
        let result = self.tools.call_path(path, into_arguments(arguments)?).await?;
        Ok(call_result_to_json(&result)?)
    }

    /// List all available resources in MCP `resources/list` shape.
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.raw.uri,
                    "name": r.raw.name,
                    "description": r.raw.description,
                    "mimeType": r.raw.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> error::Result<serde_json::Value> {
        let result = self.resource_service.read_resource(uri).await?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }
}

/// Tool arguments must be a JSON object; `null` means none.
fn into_arguments(arguments: serde_json::Value) -> Result<Option<JsonObject>, ToolError> {
    match arguments {
        serde_json::Value::Object(map) => Ok(Some(map)),
        serde_json::Value::Null => Ok(None),
        other => Err(ToolError::invalid_arguments(format!(
            "arguments must be a JSON object, got {}",
            other
        ))),
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}
