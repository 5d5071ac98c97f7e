//! Regex tester / explainer tool definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use super::ToolDefinition;
use crate::domains::tools::handlers::ToolOutput;
use crate::transforms::TransformError;
use crate::transforms::regex as pattern;

// ============================================================================
// Tool Parameters
// ============================================================================

/// What the regex tool should do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegexAction {
    /// Run the pattern over `sample`.
    #[default]
    Test,
    /// Describe each part of the pattern.
    Explain,
}

/// Parameters for the regex tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RegexParams {
    /// Regular expression, without surrounding slashes.
    pub pattern: String,

    /// Flags: g (all matches), i, m, s, u, x. Defaults to `g`.
    #[serde(default = "default_flags")]
    pub flags: String,

    /// Text to search. Used by `test`.
    #[serde(default)]
    pub sample: String,

    /// `test` (default) or `explain`.
    #[serde(default)]
    pub action: RegexAction,

    /// Copy the result to the clipboard.
    #[serde(default)]
    pub copy: bool,
}

fn default_flags() -> String {
    "g".to_string()
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Regex tester - lists matches, or explains what a pattern means.
pub struct RegexTool;

impl ToolDefinition for RegexTool {
    const NAME: &'static str = "regex_tester";
    const TITLE: &'static str = "Regex Tester";
    const PATH: &'static str = "/regex-tester-tool";
    const DESCRIPTION: &'static str = "Test regular expressions and understand what each part of \
        the pattern means. Match indices are character offsets into the sample. \
        Backreferences and lookaround are not supported by the matcher.";

    type Params = RegexParams;

    #[instrument(skip_all, fields(action = ?params.action, flags = %params.flags))]
    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError> {
        match params.action {
            RegexAction::Test => {
                let matches = pattern::test(&params.pattern, &params.flags, &params.sample)?;
                debug!("{} match(es)", matches.len());

                let text = matches
                    .iter()
                    .map(|m| format!("[{}] {}", m.index, m.text))
                    .collect::<Vec<_>>()
                    .join("\n");
                let data = json!({ "count": matches.len(), "matches": matches });
                Ok(ToolOutput::new(text, data).with_message("Regex executed!"))
            }
            RegexAction::Explain => {
                let tokens = pattern::explain(&params.pattern);
                let text = pattern::render_explanation(&params.pattern, &tokens);
                let data = json!({ "pattern": params.pattern, "tokens": tokens });
                Ok(ToolOutput::new(text, data))
            }
        }
    }

    fn wants_copy(params: &Self::Params) -> bool {
        params.copy
    }
}
