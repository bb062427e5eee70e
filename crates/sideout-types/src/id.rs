use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Globally unique identifier of a match report.
///
/// A `MatchId` is generated server-side at creation time and never reused:
/// once a report has been deleted, its id stays retired forever. Ids are
/// random (UUID v4), so knowing one id reveals nothing about creation order
/// or about any other id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from the canonical hyphenated form.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|e| TypeError::InvalidMatchId(e.to_string()))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifier of an account as issued by the authentication collaborator.
///
/// The backend never inspects the format — JWT subjects, nanoids and UUIDs
/// are all valid — but an id is always trimmed and non-empty. That guard is
/// enforced here so the stores can take a `UserId` and trust it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Build from an externally issued id. Trims surrounding whitespace and
    /// rejects the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyUserId);
        }
        Ok(Self(trimmed))
    }

    /// Generate a fresh id for a locally created account.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_match_ids_are_unique() {
        let a = MatchId::generate();
        let b = MatchId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn match_id_parse_roundtrip() {
        let id = MatchId::generate();
        let parsed = MatchId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn match_id_parse_trims_whitespace() {
        let id = MatchId::generate();
        let parsed: MatchId = format!("  {id} ").parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn match_id_rejects_garbage() {
        let err = MatchId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, TypeError::InvalidMatchId(_)));
    }

    #[test]
    fn match_id_serde_is_a_plain_string() {
        let id = MatchId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let parsed: MatchId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn user_id_trims() {
        let id = UserId::new("  abc123 ").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn user_id_rejects_empty_and_blank() {
        assert_eq!(UserId::new("").unwrap_err(), TypeError::EmptyUserId);
        assert_eq!(UserId::new("   ").unwrap_err(), TypeError::EmptyUserId);
    }

    #[test]
    fn user_id_accepts_arbitrary_formats() {
        // JWT subjects and nanoids are valid ids, not only UUIDs.
        assert!(UserId::new("V1StGXR8_Z5jdHi6B-myT").is_ok());
        assert!(UserId::new("auth0|12345").is_ok());
    }

    #[test]
    fn generated_user_ids_are_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn user_id_serde_roundtrip() {
        let id = UserId::new("owner-1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"owner-1\"");
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
