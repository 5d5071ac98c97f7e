//! Server info resource definition.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{ResourceContent, ServerSnapshot};
use crate::domains::tools::ToolKind;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ServerInfoResource {
    /// Render server name, version, transport, clipboard status and tool names.
    pub fn render(snapshot: &ServerSnapshot) -> Result<String, ResourceError> {
        let tools: Vec<&str> = ToolKind::ALL.iter().map(|kind| kind.name()).collect();
        let info = json!({
            "server": snapshot.name,
            "version": snapshot.version,
            "transport": snapshot.transport,
            "clipboard": snapshot.clipboard,
            "tools": tools,
        });

        serde_json::to_string_pretty(&info).map_err(|e| ResourceError::internal(e.to_string()))
    }
}

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "devkit://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Name, version, transport and clipboard status of this server";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::ServerInfo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_metadata() {
        assert_eq!(ServerInfoResource::URI, "devkit://server/info");
        assert_eq!(ServerInfoResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_server_info_render() {
        let snapshot = ServerSnapshot {
            name: "devkit".to_string(),
            version: "1.2.3".to_string(),
            transport: "stdio".to_string(),
            clipboard: "unavailable".to_string(),
        };
        let value: serde_json::Value =
            serde_json::from_str(&ServerInfoResource::render(&snapshot).unwrap()).unwrap();
        assert_eq!(value["server"], "devkit");
        assert_eq!(value["clipboard"], "unavailable");
        assert_eq!(value["tools"].as_array().unwrap().len(), 8);
    }
}
