//! RFC 4122 UUID generation (versions 1, 4 and 5).

use rand::Rng;
use uuid::Uuid;

use super::error::TransformError;

/// Supported UUID versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UuidVersion {
    V1,
    V4,
    V5,
}

impl UuidVersion {
    pub fn number(&self) -> usize {
        match self {
            Self::V1 => 1,
            Self::V4 => 4,
            Self::V5 => 5,
        }
    }
}

/// Time-based UUID with a random node identifier.
///
/// The node gets the multicast bit set, which marks it as not being a real
/// IEEE 802 address.
pub fn v1() -> Uuid {
    let mut node = [0u8; 6];
    rand::thread_rng().fill(&mut node);
    node[0] |= 0x01;
    Uuid::now_v1(&node)
}

/// Random UUID.
pub fn v4() -> Uuid {
    Uuid::new_v4()
}

/// Name-based (SHA-1) UUID.
///
/// `namespace` is one of `dns`, `url`, `oid`, `x500` or a UUID string; `None`
/// means `dns`. An empty name is a usage error.
pub fn v5(namespace: Option<&str>, name: &str) -> Result<Uuid, TransformError> {
    if name.trim().is_empty() {
        return Err(TransformError::MissingField("name"));
    }
    let namespace = resolve_namespace(namespace.unwrap_or("dns"))?;
    Ok(Uuid::new_v5(&namespace, name.as_bytes()))
}

/// Resolve a namespace alias or literal UUID.
pub fn resolve_namespace(namespace: &str) -> Result<Uuid, TransformError> {
    let trimmed = namespace.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "dns" => Ok(Uuid::NAMESPACE_DNS),
        "url" => Ok(Uuid::NAMESPACE_URL),
        "oid" => Ok(Uuid::NAMESPACE_OID),
        "x500" => Ok(Uuid::NAMESPACE_X500),
        _ => Uuid::parse_str(trimmed)
            .map_err(|_| TransformError::InvalidNamespace(trimmed.to_string())),
    }
}

/// Generate a UUID of the requested version in canonical hyphenated form.
pub fn generate(
    version: UuidVersion,
    namespace: Option<&str>,
    name: Option<&str>,
) -> Result<String, TransformError> {
    let uuid = match version {
        UuidVersion::V1 => v1(),
        UuidVersion::V4 => v4(),
        UuidVersion::V5 => v5(namespace, name.unwrap_or_default())?,
    };
    Ok(uuid.hyphenated().to_string())
}
