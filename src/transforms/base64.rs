//! Base64 codec over UTF-8 text.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

use super::error::TransformError;

/// Encode the UTF-8 bytes of `text` with the standard padded alphabet.
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode standard Base64 back to UTF-8 text.
///
/// ASCII whitespace is ignored. Characters outside the alphabet, wrong
/// padding and byte sequences that are not UTF-8 all fail with
/// [`TransformError::InvalidBase64`].
pub fn decode(b64: &str) -> Result<String, TransformError> {
    let compact: String = b64.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|_| TransformError::InvalidBase64)?;
    String::from_utf8(bytes).map_err(|_| TransformError::InvalidBase64)
}

/// Decode a Base64url segment (`-`/`_` alphabet, padding optional) to bytes.
pub fn decode_url_safe(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(segment.trim_end_matches('='))
}
