//! Decode-only JWT inspection.
//!
//! The signature segment is never verified: this is an informational
//! decoder, and a decoded token carries no trust.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::base64::decode_url_safe;
use super::error::TransformError;
use super::timestamp::iso_from_millis;

/// Header and payload of a token plus whether a signature segment exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedJwt {
    pub header: Value,
    pub payload: Value,
    pub signature_present: bool,
    pub claims: JwtClaims,
}

/// Registered time claims rendered as ISO 8601 UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JwtClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

/// Decode `token`, judging expiry against the current clock.
pub fn decode(token: &str) -> Result<DecodedJwt, TransformError> {
    decode_at(token, Utc::now().timestamp_millis())
}

/// Decode `token`, judging expiry against `now_ms` (epoch milliseconds).
pub fn decode_at(token: &str, now_ms: i64) -> Result<DecodedJwt, TransformError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() < 2 {
        return Err(TransformError::InvalidJwtFormat);
    }

    let header = decode_segment("header", segments[0])?;
    let payload = decode_segment("payload", segments[1])?;
    let signature_present = segments.get(2).is_some_and(|s| !s.is_empty());
    let claims = read_claims(&payload, now_ms);

    Ok(DecodedJwt {
        header,
        payload,
        signature_present,
        claims,
    })
}

fn decode_segment(segment: &'static str, raw: &str) -> Result<Value, TransformError> {
    let bytes = decode_url_safe(raw).map_err(|e| TransformError::jwt_decode(segment, e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| TransformError::jwt_decode(segment, e.to_string()))
}

fn claim_millis(payload: &Value, claim: &str) -> Option<i64> {
    let seconds = payload.get(claim)?.as_f64()?;
    let millis = seconds * 1000.0;
    if millis.is_finite() && millis.abs() < i64::MAX as f64 {
        Some(millis as i64)
    } else {
        None
    }
}

fn read_claims(payload: &Value, now_ms: i64) -> JwtClaims {
    let exp = claim_millis(payload, "exp");
    JwtClaims {
        issued_at: claim_millis(payload, "iat").and_then(iso_from_millis),
        not_before: claim_millis(payload, "nbf").and_then(iso_from_millis),
        expires_at: exp.and_then(iso_from_millis),
        expired: exp.map(|exp| exp <= now_ms),
    }
}
