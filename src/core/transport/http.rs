//! HTTP transport implementation.
//!
//! Two surfaces share one listener:
//! - JSON-RPC over POST at the configured path, for MCP clients
//! - Plain routes per tool: `GET /tools` lists the catalog and
//!   `POST /tools/{path}` runs the tool registered at `/{path}` with the
//!   request body as its arguments

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use ::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use super::{TransportConfig, TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::error::Error;

/// Protocol version reported when the client does not ask for one.
const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }

    /// Map a server error to invalid-params or internal.
    fn from_error(id: Option<serde_json::Value>, error: Error) -> Self {
        if error.is_client_error() {
            Self::invalid_params(id, error.to_string())
        } else {
            Self::internal_error(id, error.to_string())
        }
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// Session state for maintaining conversation context.
    session: Arc<RwLock<Option<SessionState>>>,
}

impl AppState {
    fn new(server: McpServer) -> Self {
        Self {
            server,
            session: Arc::new(RwLock::new(None)),
        }
    }
}

/// Session state for a client.
#[derive(Debug, Clone)]
struct SessionState {
    initialized: bool,
    protocol_version: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Create from TransportConfig (extracts HTTP config).
    pub fn from_transport_config(config: &TransportConfig) -> Option<Self> {
        match config {
            TransportConfig::Http(http_config) => Some(Self::new(http_config.clone())),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router for `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/tools", get(handle_tool_catalog))
            .route("/tools/{path}", post(handle_tool_path))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(AppState::new(server));

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Tools:    GET /tools, POST /tools/{{path}}");
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": "POST (configured JSON-RPC path)",
            "tools": "GET /tools",
            "tool": "POST /tools/{path}",
            "health": "GET /health"
        },
        "protocol": "JSON-RPC 2.0"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// List tool descriptors.
async fn handle_tool_catalog(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "tools": state.server.tool_catalog() }))
}

/// Run the tool registered at `/{path}`.
#[instrument(skip(state, body))]
async fn handle_tool_path(
    State(state): State<AppState>,
    Path(path): Path<String>,
    body: Option<Json<serde_json::Value>>,
) -> impl IntoResponse {
    let arguments = body.map(|Json(v)| v).unwrap_or(serde_json::Value::Null);

    match state.server.call_tool_at_path(&path, arguments).await {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(e) => {
            let status = match &e {
                Error::Tool(crate::domains::tools::ToolError::NotFound(_)) => StatusCode::NOT_FOUND,
                e if e.is_client_error() => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!("Tool call at /{} failed: {}", path, e);
            (status, Json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", &request.method);
    info!("Received JSON-RPC request: {}", request.method);

    let response = process_request(&state, request).await;

    (StatusCode::OK, Json(response))
}

/// Process a JSON-RPC request and return the response.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(state, request).await,
        "tools/list" => handle_tools_list(state, request).await,
        "tools/call" => handle_tools_call(state, request).await,
        "resources/list" => handle_resources_list(state, request).await,
        "resources/read" => handle_resources_read(state, request).await,

        // Notifications (no response needed for stateless HTTP)
        method if method.starts_with("notifications/") => {
            handle_notification(state, &request).await;
            JsonRpcResponse::success(request.id, serde_json::json!(null))
        }

        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// Handle initialize request.
async fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let protocol_version = request
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_PROTOCOL_VERSION)
        .to_string();

    let mut session = state.session.write().await;
    *session = Some(SessionState {
        initialized: false,
        protocol_version: protocol_version.clone(),
    });

    let instructions = rmcp::ServerHandler::get_info(&state.server).instructions;
    let result = serde_json::json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {},
            "resources": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": instructions
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
async fn handle_tools_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let tools = state.server.list_tools();
    JsonRpcResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle tools/call request.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/call request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing tool name"),
    };

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    match state.server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::from_error(request.id, e),
    }
}

/// Handle resources/list request.
async fn handle_resources_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing resources/list request");

    let resources = state.server.list_resources().await;
    JsonRpcResponse::success(request.id, serde_json::json!({ "resources": resources }))
}

/// Handle resources/read request.
async fn handle_resources_read(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing resources/read request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"),
    };

    let uri = match params.get("uri").and_then(|v| v.as_str()) {
        Some(u) => u.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing resource URI"),
    };

    match state.server.read_resource(&uri).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::from_error(request.id, e),
    }
}

/// Handle notifications (no response needed).
async fn handle_notification(state: &AppState, request: &JsonRpcRequest) {
    match request.method.as_str() {
        "notifications/initialized" => {
            let mut session = state.session.write().await;
            if let Some(ref mut s) = *session {
                s.initialized = true;
                info!("Client initialized (protocol {})", s.protocol_version);
            }
        }
        _ => {
            info!("Received notification: {}", request.method);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::core::clipboard::NoClipboard;

    fn test_state() -> AppState {
        AppState::new(McpServer::with_clipboard(Config::default(), Arc::new(NoClipboard)))
    }

    fn request(method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(serde_json::json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_initialize_and_notification() {
        let state = test_state();
        let response = process_request(&state, request("initialize", serde_json::json!({}))).await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
        assert!(result["capabilities"].get("prompts").is_none());

        process_request(&state, request("notifications/initialized", serde_json::json!({}))).await;
        assert!(state.session.read().await.as_ref().unwrap().initialized);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = process_request(&test_state(), request("tools/list", serde_json::json!({}))).await;
        assert_eq!(response.result.unwrap()["tools"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_tools_call() {
        let params = serde_json::json!({"name": "slug_generator", "arguments": {"input": "Hello World"}});
        let response = process_request(&test_state(), request("tools/call", params)).await;
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "hello-world");
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let params = serde_json::json!({"name": "dns_lookup", "arguments": {}});
        let response = process_request(&test_state(), request("tools/call", params)).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_resources_read() {
        let params = serde_json::json!({"uri": "devkit://tools"});
        let response = process_request(&test_state(), request("resources/read", params)).await;
        assert!(response.result.unwrap()["contents"][0]["text"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_method_and_version() {
        let response = process_request(&test_state(), request("prompts/list", serde_json::json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32601);

        let mut bad = request("tools/list", serde_json::json!({}));
        bad.jsonrpc = "1.0".to_string();
        let response = process_request(&test_state(), bad).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    async fn send(router: Router, request: ::http::Request<axum::body::Body>) -> (StatusCode, serde_json::Value) {
        use tower::ServiceExt;

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn test_router() -> Router {
        HttpTransport::new(HttpConfig::default())
            .router(McpServer::with_clipboard(Config::default(), Arc::new(NoClipboard)))
    }

    #[tokio::test]
    async fn test_tool_catalog_route() {
        let request = ::http::Request::get("/tools").body(axum::body::Body::empty()).unwrap();
        let (status, body) = send(test_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tools"][0]["path"], "/json-formatter-and-schema-validator");
    }

    #[tokio::test]
    async fn test_tool_path_route() {
        let request = ::http::Request::post("/tools/base64-encoder")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"input":"hello"}"#))
            .unwrap();
        let (status, body) = send(test_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"][0]["text"], "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_tool_path_route_not_found() {
        let request = ::http::Request::post("/tools/cron-expression-generator")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, _) = send(test_router(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
