//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use super::definitions::{ServerInfoResource, ToolCatalogResource};
use super::error::ResourceError;
use super::registry::get_all_resources;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// What the server-info resource reports.
    snapshot: ServerSnapshot,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata
    resources: HashMap<String, ResourceEntry>,
}

/// Facts about the running server, fixed at startup.
#[derive(Debug, Clone, Serialize)]
pub struct ServerSnapshot {
    pub name: String,
    pub version: String,
    pub transport: String,
    pub clipboard: String,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Content providers; every resource is rendered when read.
#[derive(Debug, Clone, Copy)]
pub enum ResourceContent {
    /// Server name, version, transport and clipboard status.
    ServerInfo,

    /// Descriptors of every tool.
    ToolCatalog,
}

impl ResourceService {
    /// Create a new ResourceService reporting the given server facts.
    pub fn new(snapshot: ServerSnapshot) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            snapshot,
            resources: HashMap::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources, ordered by URI.
    pub async fn list_resources(&self) -> Vec<Resource> {
        let mut resources: Vec<Resource> = self
            .resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect();
        resources.sort_by(|a, b| a.raw.uri.cmp(&b.raw.uri));
        resources
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let text = match entry.content {
            ResourceContent::ServerInfo => ServerInfoResource::render(&self.snapshot)?,
            ResourceContent::ToolCatalog => ToolCatalogResource::render()?,
        };

        let content = ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: entry.resource.raw.mime_type.clone(),
            text,
            meta: None,
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }
}
