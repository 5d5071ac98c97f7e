//! Timestamp tool definition.
//!
//! One tool, four actions: classify an input, turn a Unix timestamp into
//! dates, turn a date into a Unix timestamp, or report the current time.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use super::ToolDefinition;
use crate::domains::tools::handlers::ToolOutput;
use crate::transforms::TransformError;
use crate::transforms::timestamp::{self, EpochValue};

// ============================================================================
// Tool Parameters
// ============================================================================

/// What the timestamp tool should do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimestampAction {
    /// Report which format the input looks like.
    #[default]
    Detect,
    /// Unix seconds/milliseconds to UTC, ISO and local dates.
    ToDate,
    /// Date or date-time to Unix seconds and milliseconds.
    ToTimestamp,
    /// Current Unix time.
    Now,
}

/// Parameters for the timestamp tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TimestampParams {
    /// Timestamp or date text. Not needed for `now`.
    #[serde(default)]
    pub input: String,

    /// `detect` (default), `to_date`, `to_timestamp` or `now`.
    #[serde(default)]
    pub action: TimestampAction,

    /// Copy the result to the clipboard.
    #[serde(default)]
    pub copy: bool,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Timestamp converter and format recognizer.
pub struct TimestampTool;

fn epoch_output(value: EpochValue) -> ToolOutput {
    let text = format!(
        "Unix (s): {}\nUnix (ms): {}",
        value.seconds, value.milliseconds
    );
    ToolOutput::new(text, value)
}

impl ToolDefinition for TimestampTool {
    const NAME: &'static str = "timestamp_tool";
    const TITLE: &'static str = "Timestamp Tools";
    const PATH: &'static str = "/timestamp-tools";
    const DESCRIPTION: &'static str = "A simple tool to convert and recognize common timestamp and \
        date formats: Unix seconds, Unix milliseconds, ISO 8601, YYYY-MM-DD and HH:mm.";

    type Params = TimestampParams;

    #[instrument(skip_all, fields(action = ?params.action))]
    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError> {
        match params.action {
            TimestampAction::Detect => {
                let classification = timestamp::classify(&params.input);
                let data = json!({
                    "classification": classification,
                    "label": classification.label(),
                });
                Ok(ToolOutput::new(classification.label(), data))
            }
            TimestampAction::ToDate => {
                let date = timestamp::to_date(&params.input)?;
                let text = format!("UTC: {}\nISO: {}\nLocal: {}", date.utc, date.iso, date.local);
                Ok(ToolOutput::new(text, date))
            }
            TimestampAction::ToTimestamp => Ok(epoch_output(timestamp::to_timestamp(&params.input)?)),
            TimestampAction::Now => Ok(epoch_output(timestamp::now())),
        }
    }

    fn wants_copy(params: &Self::Params) -> bool {
        params.copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, action: TimestampAction) -> Result<ToolOutput, TransformError> {
        TimestampTool::execute(&TimestampParams {
            input: input.to_string(),
            action,
            copy: false,
        })
    }

    #[test]
    fn test_detect() {
        let cases = [
            ("1700000000", "Unix Timestamp (seconds)"),
            ("1700000000123", "Unix Timestamp (milliseconds)"),
            ("2024-06-01T14:30:00Z", "ISO 8601"),
            ("2025-01-30", "Date (YYYY-MM-DD)"),
            ("14:45", "Time (HH:mm)"),
            ("123abc", "Unknown format"),
        ];
        for (input, label) in cases {
            let output = run(input, TimestampAction::Detect).unwrap();
            assert_eq!(output.text, label, "input: {}", input);
        }
    }

    #[test]
    fn test_detect_data() {
        let output = run("1700000000", TimestampAction::Detect).unwrap();
        assert_eq!(output.data["classification"], "unix_seconds");
    }

    #[test]
    fn test_to_date() {
        let output = run("1700000000", TimestampAction::ToDate).unwrap();
        assert!(output.text.contains("UTC: Tue, 14 Nov 2023 22:13:20 GMT"));
        assert!(output.text.contains("ISO: 2023-11-14T22:13:20.000Z"));
        assert!(output.text.contains("Local:"));
    }

    #[test]
    fn test_to_date_invalid() {
        let err = run("invalid", TimestampAction::ToDate).unwrap_err();
        assert!(err.to_string().starts_with("Invalid timestamp"));
    }

    #[test]
    fn test_to_timestamp() {
        let output = run("2024-12-25T18:00:00Z", TimestampAction::ToTimestamp).unwrap();
        assert_eq!(output.text, "Unix (s): 1735149600\nUnix (ms): 1735149600000");
        assert_eq!(output.data["seconds"], 1_735_149_600i64);
    }

    #[test]
    fn test_to_timestamp_invalid() {
        let err = run("not-a-date", TimestampAction::ToTimestamp).unwrap_err();
        assert!(err.to_string().starts_with("Invalid date input"));
    }

    #[test]
    fn test_now_ignores_input() {
        let output = run("", TimestampAction::Now).unwrap();
        assert!(output.text.starts_with("Unix (s): "));
    }
}
