//! Entity identifiers.
//!
//! Identifiers are UUID-v4 shaped strings. They are generated from the OS
//! random source when it is available and from a non-cryptographic source
//! otherwise; generation itself never fails.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Opaque identifier of a bean or a shot.
///
/// Backups written by other tools may carry any non-empty string here, so
/// parsing does not insist on the UUID shape. Deserializing goes through
/// [`EntityId::new`], so a loaded id is trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl TryFrom<String> for EntityId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which collection an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Bean,
    Shot,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bean => "bean",
            Self::Shot => "shot",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generate a new identifier.
pub fn generate_id() -> EntityId {
    let bytes = match secure_bytes() {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(%error, "OS random source unavailable, using fallback id generator");
            fallback_bytes()
        }
    };
    EntityId(shape_v4(bytes))
}

/// Generate an identifier that `is_taken` does not reject.
pub fn generate_unique_id(is_taken: impl Fn(&EntityId) -> bool) -> EntityId {
    loop {
        let id = generate_id();
        if !is_taken(&id) {
            return id;
        }
        tracing::debug!(%id, "generated id already in use, retrying");
    }
}

fn secure_bytes() -> Result<[u8; 16], getrandom::Error> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)?;
    Ok(bytes)
}

fn fallback_bytes() -> [u8; 16] {
    let mut bytes = [0u8; 16];
    fastrand::fill(&mut bytes);
    bytes
}

/// Fix the version nibble to 4 and the variant bits to `10`.
fn shape_v4(bytes: [u8; 16]) -> String {
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::{Uuid, Variant};

    #[test]
    fn test_generated_id_is_uuid_v4() {
        let id = generate_id();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(parsed.get_variant(), Variant::RFC4122);
    }

    #[test]
    fn test_fallback_id_is_uuid_v4_shaped() {
        for _ in 0..100 {
            let id = shape_v4(fallback_bytes());
            assert_eq!(id.len(), 36);
            assert_eq!(&id[14..15], "4");
            assert!(matches!(&id[19..20], "8" | "9" | "a" | "b"));
            let parsed = Uuid::parse_str(&id).unwrap();
            assert_eq!(parsed.get_version_num(), 4);
        }
    }

    #[test]
    fn test_shape_v4_overrides_version_bits() {
        let id = shape_v4([0xff; 16]);
        assert_eq!(id, "ffffffff-ffff-4fff-bfff-ffffffffffff");
        let id = shape_v4([0x00; 16]);
        assert_eq!(id, "00000000-0000-4000-8000-000000000000");
    }

    #[test]
    fn test_entity_id_rejects_blank() {
        assert!(EntityId::new("   ").is_err());
        assert_eq!(EntityId::new(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_entity_id_deserializes_through_new() {
        let id: EntityId = serde_json::from_str("\" b1 \"").unwrap();
        assert_eq!(id.as_str(), "b1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"b1\"");

        let err = serde_json::from_str::<EntityId>("\"  \"").unwrap_err();
        assert!(err.to_string().contains("invalid id"), "{err}");
    }

    #[test]
    fn test_generate_unique_id_skips_taken() {
        let taken = generate_id();
        let id = generate_unique_id(|candidate| candidate == &taken);
        assert_ne!(id, taken);
    }
}
