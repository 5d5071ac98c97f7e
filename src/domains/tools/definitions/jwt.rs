//! JWT decoder tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::ToolDefinition;
use crate::domains::tools::handlers::ToolOutput;
use crate::transforms::{TransformError, jwt};

/// Parameters for the JWT decoder.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JwtDecoderParams {
    /// Compact JWT (`header.payload[.signature]`).
    pub token: String,

    /// Copy the decoded header and payload to the clipboard.
    #[serde(default)]
    pub copy: bool,
}

/// JWT decoder - shows header and payload; the signature is not verified.
pub struct JwtDecoderTool;

impl ToolDefinition for JwtDecoderTool {
    const NAME: &'static str = "jwt_decoder";
    const TITLE: &'static str = "JWT Decoder";
    const PATH: &'static str = "/jwt-decoder";
    const DESCRIPTION: &'static str = "A simple tool that decodes your JWT. Shows the header, the \
        payload and the iat/nbf/exp claims as dates. The signature is NOT verified.";

    type Params = JwtDecoderParams;

    #[instrument(skip_all)]
    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError> {
        let decoded = jwt::decode(&params.token)?;

        let view = json!({ "header": decoded.header, "payload": decoded.payload });
        let text = serde_json::to_string_pretty(&view)
            .map_err(|e| TransformError::jwt_decode("payload", e.to_string()))?;

        Ok(ToolOutput::new(text, &decoded).with_message("JWT decoded!"))
    }

    fn wants_copy(params: &Self::Params) -> bool {
        params.copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_JWT: &str = concat!(
        "eyJhbGciOiJIUzI1NiJ9.",
        "eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiYWRtaW4iOnRydWV9.",
        "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c"
    );

    fn params(token: &str) -> JwtDecoderParams {
        JwtDecoderParams {
            token: token.to_string(),
            copy: false,
        }
    }

    #[test]
    fn test_decode() {
        let output = JwtDecoderTool::execute(&params(VALID_JWT)).unwrap();
        assert!(output.text.contains(r#""name": "John Doe""#));
        assert!(output.text.contains(r#""alg": "HS256""#));
        assert_eq!(output.message.as_deref(), Some("JWT decoded!"));
        assert_eq!(output.data["signature_present"], true);
    }

    #[test]
    fn test_invalid_format() {
        let err = JwtDecoderTool::execute(&params("invalid-token")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid JWT format.");
    }

    #[test]
    fn test_undecodable() {
        let err = JwtDecoderTool::execute(&params("invalid.jwt")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to decode JWT header"));
    }
}
