//! Tool definitions module.
//!
//! One file per tool. A definition names the tool, declares its parameter
//! type, and maps parameters to a transform outcome; the shared pipeline in
//! `handlers` does the rest.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::handlers::ToolOutput;
use crate::transforms::TransformError;

pub mod base64;
pub mod cpf;
pub mod json_formatter;
pub mod jwt;
pub mod regex;
pub mod slug;
pub mod timestamp;
pub mod uuid;

pub use self::base64::{Base64Action, Base64Params, Base64Tool};
pub use self::cpf::{CpfAction, CpfParams, CpfTool};
pub use self::json_formatter::{JsonFormatterParams, JsonFormatterTool};
pub use self::jwt::{JwtDecoderParams, JwtDecoderTool};
pub use self::regex::{RegexAction, RegexParams, RegexTool};
pub use self::slug::{SlugParams, SlugTool};
pub use self::timestamp::{TimestampAction, TimestampParams, TimestampTool};
pub use self::uuid::{UuidParams, UuidTool, UuidVersionParam};

/// Trait for tool definitions.
///
/// Implement this for a unit struct to get a route, a descriptor and HTTP
/// dispatch through `ToolKind`.
pub trait ToolDefinition: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Human-readable title.
    const TITLE: &'static str;

    /// URL path of the tool.
    const PATH: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Arguments accepted by the tool.
    type Params: DeserializeOwned + JsonSchema + Send + Sync + 'static;

    /// Run the transform.
    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError>;

    /// Whether the caller asked for the output on the clipboard.
    fn wants_copy(params: &Self::Params) -> bool;
}
