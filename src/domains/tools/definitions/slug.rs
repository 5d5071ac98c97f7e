//! Slug generator tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::ToolDefinition;
use crate::domains::tools::handlers::ToolOutput;
use crate::transforms::{TransformError, slug};

/// Parameters for the slug generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlugParams {
    /// Text to turn into a slug.
    pub input: String,

    /// Copy the slug to the clipboard.
    #[serde(default)]
    pub copy: bool,
}

/// Slug generator - lowercase ASCII words joined by hyphens.
pub struct SlugTool;

impl ToolDefinition for SlugTool {
    const NAME: &'static str = "slug_generator";
    const TITLE: &'static str = "Slug Generator";
    const PATH: &'static str = "/slug-generator";
    const DESCRIPTION: &'static str = "Convert text into URL-friendly slugs. Accents are stripped \
        and every run of other characters becomes a single hyphen.";

    type Params = SlugParams;

    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError> {
        let slug = slug::slugify(&params.input);
        let data = json!({ "slug": slug });
        Ok(ToolOutput::new(slug, data))
    }

    fn wants_copy(params: &Self::Params) -> bool {
        params.copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        let params = SlugParams {
            input: "Hello World! Test 123".to_string(),
            copy: true,
        };
        let output = SlugTool::execute(&params).unwrap();
        assert_eq!(output.text, "hello-world-test-123");
        assert_eq!(output.data["slug"], "hello-world-test-123");
        assert!(SlugTool::wants_copy(&params));
    }

    #[test]
    fn test_slug_of_symbols_is_empty() {
        let params = SlugParams {
            input: "!!!".to_string(),
            copy: false,
        };
        assert_eq!(SlugTool::execute(&params).unwrap().text, "");
    }
}
