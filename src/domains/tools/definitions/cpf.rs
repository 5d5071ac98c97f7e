//! CPF generator / validator tool definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::ToolDefinition;
use crate::domains::tools::handlers::ToolOutput;
use crate::transforms::{TransformError, cpf};

/// Upper bound on CPFs produced by one call.
pub const MAX_COUNT: u32 = 50;

// ============================================================================
// Tool Parameters
// ============================================================================

/// What the CPF tool should do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CpfAction {
    /// Produce new valid CPFs.
    #[default]
    Generate,
    /// Check the check digits of `input`.
    Validate,
}

/// Parameters for the CPF tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CpfParams {
    /// `generate` (default) or `validate`.
    #[serde(default)]
    pub action: CpfAction,

    /// CPF to validate, bare or `ddd.ddd.ddd-dd`. Required for `validate`.
    #[serde(default)]
    pub input: Option<String>,

    /// How many CPFs to generate (1 to 50, clamped).
    #[serde(default = "default_count")]
    pub count: u32,

    /// Punctuate generated CPFs as `ddd.ddd.ddd-dd`.
    #[serde(default = "default_formatted")]
    pub formatted: bool,

    /// Copy the result to the clipboard.
    #[serde(default)]
    pub copy: bool,
}

fn default_count() -> u32 {
    1
}

fn default_formatted() -> bool {
    true
}

// ============================================================================
// Output Structure
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum CpfResult {
    Generated { cpfs: Vec<String> },
    Validated { cpf: String, valid: bool },
}

// ============================================================================
// Tool Definition
// ============================================================================

/// CPF tool - generates or validates Brazilian taxpayer numbers.
pub struct CpfTool;

impl CpfTool {
    fn generate(params: &CpfParams) -> ToolOutput {
        let count = params.count.clamp(1, MAX_COUNT);
        let mut rng = rand::thread_rng();
        let cpfs: Vec<String> = (0..count)
            .map(|_| {
                let digits = cpf::generate_digits(&mut rng);
                if params.formatted {
                    cpf::format_digits(&digits)
                } else {
                    cpf::bare_digits(&digits)
                }
            })
            .collect();
        debug!("Generated {} CPF(s)", cpfs.len());

        let message = if cpfs.len() == 1 {
            "CPF generated!"
        } else {
            "CPFs generated!"
        };
        ToolOutput::new(cpfs.join("\n"), CpfResult::Generated { cpfs }).with_message(message)
    }

    fn validate(input: &str) -> ToolOutput {
        let valid = cpf::validate(input);
        let text = if valid { "Valid CPF" } else { "Invalid CPF" };
        let data = CpfResult::Validated {
            cpf: input.trim().to_string(),
            valid,
        };
        ToolOutput::new(text, data)
    }
}

impl ToolDefinition for CpfTool {
    const NAME: &'static str = "cpf_generator";
    const TITLE: &'static str = "CPF Generator";
    const PATH: &'static str = "/cpf-generator";
    const DESCRIPTION: &'static str = "Generate a dynamic CPF (Brazilian Person ID), or validate \
        the check digits of an existing one.";

    type Params = CpfParams;

    #[instrument(skip_all, fields(action = ?params.action))]
    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError> {
        match params.action {
            CpfAction::Generate => Ok(Self::generate(params)),
            CpfAction::Validate => {
                let input = params
                    .input
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(TransformError::MissingField("input"))?;
                Ok(Self::validate(input))
            }
        }
    }

    fn wants_copy(params: &Self::Params) -> bool {
        params.copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::ErrorKind;

    fn params(value: serde_json::Value) -> CpfParams {
        serde_json::from_value(value).unwrap()
    }

    fn is_formatted(s: &str) -> bool {
        s.len() == 14
            && s.chars().enumerate().all(|(i, c)| match i {
                3 | 7 => c == '.',
                11 => c == '-',
                _ => c.is_ascii_digit(),
            })
    }

    #[test]
    fn test_generate_default() {
        let p = params(serde_json::json!({}));
        assert_eq!(p.count, 1);
        assert!(p.formatted);

        let output = CpfTool::execute(&p).unwrap();
        assert!(is_formatted(&output.text), "unexpected CPF: {}", output.text);
        assert!(cpf::validate(&output.text));
        assert_eq!(output.message.as_deref(), Some("CPF generated!"));
    }

    #[test]
    fn test_generate_many_bare() {
        let p = params(serde_json::json!({"count": 5, "formatted": false}));
        let output = CpfTool::execute(&p).unwrap();
        let cpfs = output.data["cpfs"].as_array().unwrap();
        assert_eq!(cpfs.len(), 5);
        for value in cpfs {
            let s = value.as_str().unwrap();
            assert_eq!(s.len(), 11);
            assert!(cpf::validate(s));
        }
    }

    #[test]
    fn test_generate_count_clamped() {
        let output = CpfTool::execute(&params(serde_json::json!({"count": 500}))).unwrap();
        assert_eq!(output.data["cpfs"].as_array().unwrap().len(), MAX_COUNT as usize);

        let output = CpfTool::execute(&params(serde_json::json!({"count": 0}))).unwrap();
        assert_eq!(output.data["cpfs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_validate() {
        let output =
            CpfTool::execute(&params(serde_json::json!({"action": "validate", "input": "529.982.247-25"})))
                .unwrap();
        assert_eq!(output.text, "Valid CPF");
        assert_eq!(output.data["valid"], true);

        let output =
            CpfTool::execute(&params(serde_json::json!({"action": "validate", "input": "111.111.111-11"})))
                .unwrap();
        assert_eq!(output.text, "Invalid CPF");
        assert_eq!(output.data["valid"], false);
    }

    #[test]
    fn test_validate_requires_input() {
        let err = CpfTool::execute(&params(serde_json::json!({"action": "validate"}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageError);
        assert_eq!(err.to_string(), "input required");
    }
}
