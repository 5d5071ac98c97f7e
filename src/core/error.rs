//! Error types and handling for the devkit server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Error raised while running a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),
}

impl Error {
    /// Whether the caller (rather than the server) is at fault.
    pub fn is_client_error(&self) -> bool {
        use crate::domains::tools::ToolError;

        matches!(
            self,
            Self::Tool(ToolError::NotFound(_) | ToolError::InvalidArguments(_))
                | Self::Resource(crate::domains::resources::ResourceError::NotFound(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resources::ResourceError;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_from_conversions() {
        let err: Error = ToolError::not_found("cron_tool").into();
        assert_eq!(err.to_string(), "Tool error: Tool not found: cron_tool");
        assert!(err.is_client_error());

        let err: Error = ResourceError::not_found("devkit://x").into();
        assert!(err.is_client_error());

        let err: Error = ToolError::internal("boom").into();
        assert!(!err.is_client_error());
        let err: Error = crate::core::transport::TransportError::http("closed").into();
        assert!(!err.is_client_error());
    }
}
