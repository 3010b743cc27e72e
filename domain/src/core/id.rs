//! Object identifiers

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a domain object.
///
/// Identifiers are compared verbatim; no namespace or key structure is
/// interpreted by the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ObjectId {
    type Err = DomainError;

    /// Parse user-supplied input, rejecting blank identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id: ObjectId = "  mine ".parse().unwrap();
        assert_eq!(id.as_str(), "mine");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(matches!(
            "   ".parse::<ObjectId>(),
            Err(DomainError::InvalidId(_))
        ));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ObjectId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
