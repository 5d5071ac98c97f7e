//! Tool handlers: the glue between a [`ToolDefinition`] and MCP.
//!
//! Every tool runs the same pipeline: deserialize the arguments, run the
//! pure transform, turn the outcome into a `CallToolResult`, and copy the
//! primary output to the clipboard when asked. Transform failures are tool
//! results with `is_error` set; only malformed arguments are protocol errors.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::definitions::ToolDefinition;
use super::error::ToolError;
use crate::core::clipboard::{Clipboard, SharedClipboard, copy_text};
use crate::transforms::TransformError;

/// Notice appended to a result after a successful copy.
pub const COPIED_NOTICE: &str = "Copied!";

/// Successful output of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    /// Primary output, the text that gets copied.
    pub text: String,

    /// Structured payload returned as `structuredContent`.
    pub data: Value,

    /// Optional short status line ("Encoded successfully!").
    pub message: Option<String>,
}

impl ToolOutput {
    /// Create an output from its text and a serializable payload.
    ///
    /// A payload that fails to serialize becomes `null`; the text is kept.
    pub fn new(text: impl Into<String>, data: impl Serialize) -> Self {
        let data = serde_json::to_value(data).unwrap_or_else(|e| {
            warn!("Structured output dropped, serialization failed: {}", e);
            Value::Null
        });
        Self {
            text: text.into(),
            data,
            message: None,
        }
    }

    /// Attach a status line.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Build the MCP tool model for a definition.
pub fn to_tool<T: ToolDefinition>() -> Tool {
    Tool {
        name: T::NAME.into(),
        title: Some(T::TITLE.into()),
        description: Some(T::DESCRIPTION.into()),
        input_schema: schema_for_type::<T::Params>().into(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
    }
}

/// Deserialize tool arguments; a missing argument object counts as empty.
pub fn parse_params<T: ToolDefinition>(arguments: Option<JsonObject>) -> Result<T::Params, ToolError> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| ToolError::invalid_arguments(format!("{}: {}", T::NAME, e)))
}

/// Run a tool end to end.
pub async fn run<T: ToolDefinition>(
    arguments: Option<JsonObject>,
    clipboard: &dyn Clipboard,
) -> Result<CallToolResult, ToolError> {
    let params = parse_params::<T>(arguments)?;
    info!("Tool called: {}", T::NAME);

    let outcome = T::execute(&params);
    Ok(deliver(T::NAME, outcome, T::wants_copy(&params), clipboard).await)
}

/// Turn a transform outcome into a tool result, copying on request.
///
/// Clipboard problems only add a warning line; they never flip the result
/// into an error.
pub async fn deliver(
    tool: &str,
    outcome: Result<ToolOutput, TransformError>,
    copy: bool,
    clipboard: &dyn Clipboard,
) -> CallToolResult {
    let output = match outcome {
        Ok(output) => output,
        Err(e) => {
            warn!(tool, kind = e.kind().as_str(), "Tool failed: {}", e);
            return CallToolResult::error(vec![Content::text(e.to_string())]);
        }
    };

    let mut content = vec![Content::text(output.text.clone())];
    if let Some(message) = &output.message {
        content.push(Content::text(message.clone()));
    }

    if copy {
        match copy_text(clipboard, &output.text).await {
            Ok(()) => {
                debug!(tool, "Output copied to clipboard");
                content.push(Content::text(COPIED_NOTICE));
            }
            Err(e) => {
                warn!(tool, kind = e.kind().as_str(), "Copy failed: {}", e);
                content.push(Content::text(format!("Warning: {}", e)));
            }
        }
    }

    CallToolResult {
        content,
        structured_content: Some(output.data),
        is_error: Some(false),
        meta: None,
    }
}

/// Create the rmcp route for a definition.
pub fn create_route<T, S>(clipboard: SharedClipboard) -> ToolRoute<S>
where
    T: ToolDefinition,
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(to_tool::<T>(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone();
        let clipboard = clipboard.clone();
        async move {
            run::<T>(args, clipboard.as_ref())
                .await
                .map_err(|e| McpError::invalid_params(e.to_string(), None))
        }
        .boxed()
    })
}

/// Serialize a tool result for the HTTP transport, keeping `structuredContent`.
pub fn call_result_to_json(result: &CallToolResult) -> Result<Value, ToolError> {
    serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
}

/// Collect the text blocks of a result, in order.
pub fn result_texts(result: &CallToolResult) -> Vec<&str> {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            rmcp::model::RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::{ClipboardError, NoClipboard};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClipboard {
        written: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for RecordingClipboard {
        fn describe(&self) -> String {
            "recording".to_string()
        }

        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_deliver_success() {
        let output = ToolOutput::new("aGVsbG8=", serde_json::json!({"output": "aGVsbG8="}))
            .with_message("Encoded successfully!");
        let result = deliver("base64_codec", Ok(output), false, &NoClipboard).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_texts(&result), vec!["aGVsbG8=", "Encoded successfully!"]);
        assert_eq!(result.structured_content.unwrap()["output"], "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_deliver_error() {
        let result = deliver("base64_codec", Err(TransformError::InvalidBase64), true, &NoClipboard).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_texts(&result), vec!["Invalid Base64!"]);
        assert!(result.structured_content.is_none());
    }

    #[tokio::test]
    async fn test_deliver_copies() {
        let clipboard = RecordingClipboard::default();
        let output = ToolOutput::new("hello-world", Value::Null);
        let result = deliver("slug_generator", Ok(output), true, &clipboard).await;

        assert_eq!(result_texts(&result), vec!["hello-world", COPIED_NOTICE]);
        assert_eq!(*clipboard.written.lock().unwrap(), vec!["hello-world"]);
    }

    #[tokio::test]
    async fn test_deliver_copy_failure_is_warning() {
        let output = ToolOutput::new("hello-world", Value::Null);
        let result = deliver("slug_generator", Ok(output), true, &NoClipboard).await;

        assert_eq!(result.is_error, Some(false));
        let texts = result_texts(&result);
        assert_eq!(texts.len(), 2);
        assert!(texts[1].starts_with("Warning: Clipboard unavailable"));
    }

    #[tokio::test]
    async fn test_deliver_nothing_to_copy() {
        let clipboard = RecordingClipboard::default();
        let output = ToolOutput::new("", Value::Null);
        let result = deliver("slug_generator", Ok(output), true, &clipboard).await;

        assert_eq!(result_texts(&result)[1], "Warning: Nothing to copy.");
        assert!(clipboard.written.lock().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_deliver_hanging_clipboard_is_bounded() {
        use crate::core::clipboard::CommandClipboard;
        use std::time::Duration;

        let clipboard = CommandClipboard::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; sleep 20".to_string()],
        )
        .with_timeout(Duration::from_millis(300));
        let output = ToolOutput::new("hello-world", Value::Null);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            deliver("slug_generator", Ok(output), true, &clipboard),
        )
        .await
        .expect("copy should give up before the outer deadline");

        assert_eq!(result.is_error, Some(false));
        assert!(result_texts(&result)[1].starts_with("Warning: Clipboard write failed"));
    }

    #[test]
    fn test_output_with_unserializable_payload() {
        let payload = std::collections::BTreeMap::from([(vec![1u8], 1u8)]);
        let output = ToolOutput::new("text", payload);
        assert_eq!(output.text, "text");
        assert_eq!(output.data, Value::Null);
    }
}
