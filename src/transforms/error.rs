//! Transform error types.
//!
//! Every transform returns its failure as a value. The [`ErrorKind`]
//! taxonomy groups the variants the way they are surfaced to clients.

use thiserror::Error;

/// Coarse classification of everything that can go wrong in one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed JSON, Base64, regex, JWT or date input.
    InvalidInputFormat,

    /// A required field is missing (e.g. the UUID v5 name).
    UsageError,

    /// An external capability (the clipboard) is denied or has nothing to do.
    CapabilityUnavailable,
}

impl ErrorKind {
    /// Stable identifier used in logs and structured output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInputFormat => "invalid_input_format",
            Self::UsageError => "usage_error",
            Self::CapabilityUnavailable => "capability_unavailable",
        }
    }
}

/// Errors produced by the pure transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The input is not valid JSON.
    #[error("Invalid JSON! {0}")]
    InvalidJson(String),

    /// The input is not canonical Base64 or does not decode to UTF-8.
    #[error("Invalid Base64!")]
    InvalidBase64,

    /// The token does not have a header and a payload segment.
    #[error("Invalid JWT format.")]
    InvalidJwtFormat,

    /// A JWT segment could not be Base64url-decoded or parsed as JSON.
    #[error("Failed to decode JWT {segment}: {reason}")]
    JwtDecode {
        segment: &'static str,
        reason: String,
    },

    /// The regular expression (or its flags) failed to compile.
    #[error("Invalid regex pattern. {0}")]
    InvalidPattern(String),

    /// The input is not a Unix timestamp in seconds or milliseconds.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The input could not be parsed as a date.
    #[error("Invalid date input: {0}")]
    InvalidDateInput(String),

    /// The UUID namespace is neither a well-known name nor a UUID.
    #[error("Invalid UUID namespace: {0}")]
    InvalidNamespace(String),

    /// A required field was empty.
    #[error("{0} required")]
    MissingField(&'static str),
}

impl TransformError {
    /// Create a new "invalid JSON" error.
    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self::InvalidJson(msg.into())
    }

    /// Create a new "JWT decode" error for the named segment.
    pub fn jwt_decode(segment: &'static str, reason: impl Into<String>) -> Self {
        Self::JwtDecode {
            segment,
            reason: reason.into(),
        }
    }

    /// Create a new "invalid pattern" error.
    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::InvalidPattern(msg.into())
    }

    /// Create a new "invalid timestamp" error.
    pub fn invalid_timestamp(input: impl Into<String>) -> Self {
        Self::InvalidTimestamp(input.into())
    }

    /// Create a new "invalid date input" error.
    pub fn invalid_date_input(input: impl Into<String>) -> Self {
        Self::InvalidDateInput(input.into())
    }

    /// The taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) => ErrorKind::UsageError,
            _ => ErrorKind::InvalidInputFormat,
        }
    }
}
