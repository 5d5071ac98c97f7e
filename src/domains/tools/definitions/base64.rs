//! Base64 encoder / decoder tool definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ToolDefinition;
use crate::domains::tools::handlers::ToolOutput;
use crate::transforms::{TransformError, base64};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Direction of the conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Base64Action {
    /// Text to Base64.
    #[default]
    Encode,
    /// Base64 to text.
    Decode,
}

/// Parameters for the Base64 tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Base64Params {
    /// Text to encode, or Base64 to decode.
    pub input: String,

    /// `encode` (default) or `decode`.
    #[serde(default)]
    pub action: Base64Action,

    /// Copy the result to the clipboard.
    #[serde(default)]
    pub copy: bool,
}

#[derive(Debug, Serialize)]
struct Base64Result<'a> {
    action: Base64Action,
    output: &'a str,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Base64 codec (standard alphabet, padded).
pub struct Base64Tool;

impl ToolDefinition for Base64Tool {
    const NAME: &'static str = "base64_codec";
    const TITLE: &'static str = "Base64 Encoder / Decoder";
    const PATH: &'static str = "/base64-encoder";
    const DESCRIPTION: &'static str = "Encode or decode Base64 strings easily. \
        Decoding ignores whitespace and fails when the bytes are not valid UTF-8.";

    type Params = Base64Params;

    #[instrument(skip_all, fields(action = ?params.action))]
    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError> {
        let (output, message) = match params.action {
            Base64Action::Encode => (base64::encode(&params.input), "Encoded successfully!"),
            Base64Action::Decode => (base64::decode(&params.input)?, "Decoded successfully!"),
        };

        let data = Base64Result {
            action: params.action,
            output: &output,
        };
        Ok(ToolOutput::new(output.clone(), data).with_message(message))
    }

    fn wants_copy(params: &Self::Params) -> bool {
        params.copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(input: &str, action: Base64Action) -> Base64Params {
        Base64Params {
            input: input.to_string(),
            action,
            copy: false,
        }
    }

    #[test]
    fn test_encode() {
        let output = Base64Tool::execute(&params("hello", Base64Action::Encode)).unwrap();
        assert_eq!(output.text, "aGVsbG8=");
        assert_eq!(output.message.as_deref(), Some("Encoded successfully!"));
        assert_eq!(output.data["action"], "encode");
    }

    #[test]
    fn test_decode() {
        let output = Base64Tool::execute(&params("dGVzdGluZw==", Base64Action::Decode)).unwrap();
        assert_eq!(output.text, "testing");
        assert_eq!(output.message.as_deref(), Some("Decoded successfully!"));
    }

    #[test]
    fn test_decode_invalid() {
        let err = Base64Tool::execute(&params("@@@", Base64Action::Decode)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Base64!");
    }

    #[test]
    fn test_action_parsing() {
        let p: Base64Params =
            serde_json::from_value(serde_json::json!({"input": "x", "action": "decode"})).unwrap();
        assert_eq!(p.action, Base64Action::Decode);

        let p: Base64Params = serde_json::from_value(serde_json::json!({"input": "x"})).unwrap();
        assert_eq!(p.action, Base64Action::Encode);

        assert!(serde_json::from_value::<Base64Params>(serde_json::json!({"input": "x", "action": "rot13"})).is_err());
    }
}
