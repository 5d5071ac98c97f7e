//! JSON formatter tool definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ToolDefinition;
use crate::domains::tools::handlers::ToolOutput;
use crate::transforms::{TransformError, json};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the JSON formatter.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JsonFormatterParams {
    /// JSON text to format.
    pub input: String,

    /// Emit compact JSON instead of 2-space indentation.
    #[serde(default)]
    pub minify: bool,

    /// Copy the formatted JSON to the clipboard.
    #[serde(default)]
    pub copy: bool,
}

// ============================================================================
// Output Structure
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonFormatterResult<'a> {
    formatted: &'a str,
    minified: bool,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// JSON formatter - validates and re-indents JSON text.
pub struct JsonFormatterTool;

impl ToolDefinition for JsonFormatterTool {
    const NAME: &'static str = "json_formatter";
    const TITLE: &'static str = "JSON Formatter";
    const PATH: &'static str = "/json-formatter-and-schema-validator";
    const DESCRIPTION: &'static str = "Format your JSON with 2-space indentation (or minify it). \
        Key order is kept as written. Invalid JSON is reported with the parser message.";

    type Params = JsonFormatterParams;

    #[instrument(skip_all, fields(minify = params.minify))]
    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError> {
        let formatted = if params.minify {
            json::minify(&params.input)?
        } else {
            json::format(&params.input)?
        };

        let data = JsonFormatterResult {
            formatted: &formatted,
            minified: params.minify,
        };
        Ok(ToolOutput::new(formatted.clone(), data).with_message("Valid JSON!"))
    }

    fn wants_copy(params: &Self::Params) -> bool {
        params.copy
    }
}

// ============================================================================
// Tests
// ============================================================================
