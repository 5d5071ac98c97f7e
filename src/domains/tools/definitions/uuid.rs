//! UUID generator tool definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ToolDefinition;
use crate::domains::tools::handlers::ToolOutput;
use crate::transforms::TransformError;
use crate::transforms::uuid::{self as uuid_gen, UuidVersion};

/// UUID version selector as it appears in tool arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UuidVersionParam {
    /// Time-based.
    V1,
    /// Random.
    #[default]
    V4,
    /// Name-based (SHA-1); needs `name`.
    V5,
}

impl From<UuidVersionParam> for UuidVersion {
    fn from(value: UuidVersionParam) -> Self {
        match value {
            UuidVersionParam::V1 => UuidVersion::V1,
            UuidVersionParam::V4 => UuidVersion::V4,
            UuidVersionParam::V5 => UuidVersion::V5,
        }
    }
}

/// Parameters for the UUID generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UuidParams {
    /// `v1`, `v4` (default) or `v5`.
    #[serde(default)]
    pub version: UuidVersionParam,

    /// Name hashed by v5. Required for v5, ignored otherwise.
    #[serde(default)]
    pub name: Option<String>,

    /// v5 namespace: `dns` (default), `url`, `oid`, `x500`, or a UUID.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Copy the UUID to the clipboard.
    #[serde(default)]
    pub copy: bool,
}

#[derive(Debug, Serialize)]
struct UuidResult<'a> {
    uuid: &'a str,
    version: usize,
}

/// UUID generator (RFC 4122 versions 1, 4 and 5).
pub struct UuidTool;

impl ToolDefinition for UuidTool {
    const NAME: &'static str = "uuid_generator";
    const TITLE: &'static str = "UUID Generator";
    const PATH: &'static str = "/uuid-generator";
    const DESCRIPTION: &'static str = "Generate a dynamic UUID: v1 (time-based), v4 (random) or \
        v5 (name-based, deterministic for a namespace and name).";

    type Params = UuidParams;

    #[instrument(skip_all, fields(version = ?params.version))]
    fn execute(params: &Self::Params) -> Result<ToolOutput, TransformError> {
        let version = UuidVersion::from(params.version);
        let uuid = uuid_gen::generate(version, params.namespace.as_deref(), params.name.as_deref())?;

        let data = UuidResult {
            uuid: &uuid,
            version: version.number(),
        };
        Ok(ToolOutput::new(uuid.clone(), data))
    }

    fn wants_copy(params: &Self::Params) -> bool {
        params.copy
    }
}
