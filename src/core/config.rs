//! Configuration management for the devkit server.
//!
//! Defaults are overridden by `DEVKIT_*` environment variables; a `.env`
//! file in the working directory is loaded first when present.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Clipboard configuration.
    pub clipboard: ClipboardConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "devkit_mcp_server=trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Clipboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Command that receives copied text on stdin, e.g. `wl-copy` or
    /// `xclip -selection clipboard`. `None` disables copying.
    pub command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "devkit-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            clipboard: ClipboardConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognized: `DEVKIT_SERVER_NAME`, `DEVKIT_LOG_LEVEL`,
    /// `DEVKIT_LOG_TIMESTAMPS`, `DEVKIT_CLIPBOARD_COMMAND`, and the
    /// transport variables read by [`TransportConfig::from_env`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("DEVKIT_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("DEVKIT_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("DEVKIT_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        config.transport = TransportConfig::from_env();

        if let Ok(command) = std::env::var("DEVKIT_CLIPBOARD_COMMAND") {
            let command = command.trim();
            if !command.is_empty() {
                info!("Clipboard command set to '{}'", command);
                config.clipboard.command = Some(command.to_string());
            }
        }

        config
    }
}
