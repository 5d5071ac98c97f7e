//! Tool catalog resource: the listing a home page would show.

use super::ResourceDefinition;
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::ResourceContent;
use crate::domains::tools::ToolRegistry;

/// Catalog of every tool with its title, URL path and description.
pub struct ToolCatalogResource;

impl ToolCatalogResource {
    /// Render the catalog as a JSON array of descriptors.
    pub fn render() -> Result<String, ResourceError> {
        serde_json::to_string_pretty(&ToolRegistry::list_all())
            .map_err(|e| ResourceError::internal(e.to_string()))
    }
}

impl ResourceDefinition for ToolCatalogResource {
    const URI: &'static str = "devkit://tools";
    const NAME: &'static str = "Tool Catalog";
    const DESCRIPTION: &'static str = "Every available tool with its title, URL path and description";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::ToolCatalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let text = ToolCatalogResource::render().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0]["name"], "json_formatter");
        assert_eq!(entries[0]["path"], "/json-formatter-and-schema-validator");
        assert_eq!(entries[1]["title"], "Base64 Encoder / Decoder");
    }
}
