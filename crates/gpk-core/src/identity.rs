//! # Identity Newtypes
//!
//! Map codes are the in-game share codes players type to load a map.
//! User and thread ids are opaque 64-bit identifiers issued by the chat
//! platform that hosts the community.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// Minimum length of a map share code.
pub const MAP_CODE_MIN_LEN: usize = 4;
/// Maximum length of a map share code.
pub const MAP_CODE_MAX_LEN: usize = 6;

/// A validated map share code (`^[A-Z0-9]{4,6}$`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MapCode(String);

impl MapCode {
    /// Validate and wrap a map code.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        if code.len() < MAP_CODE_MIN_LEN || code.len() > MAP_CODE_MAX_LEN {
            return Err(CoreError::InvalidMapCode {
                code,
                reason: "length must be between 4 and 6",
            });
        }
        if !code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(CoreError::InvalidMapCode {
                code,
                reason: "only uppercase letters and digits are allowed",
            });
        }
        Ok(Self(code))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MapCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MapCode> for String {
    fn from(code: MapCode) -> Self {
        code.0
    }
}

impl FromStr for MapCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for MapCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A community member (player, voter, verifier, or creator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Reference to the discussion thread that accompanies a playtest.
///
/// Opaque to the engine; thread creation belongs to an external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "thread:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_code_accepts_valid() {
        for code in ["ABCD", "A1B2C", "XYZ123", "0000"] {
            let parsed = MapCode::new(code).unwrap();
            assert_eq!(parsed.as_str(), code);
        }
    }

    #[test]
    fn test_map_code_rejects_length() {
        assert!(MapCode::new("ABC").is_err());
        assert!(MapCode::new("ABCDEFG").is_err());
        assert!(MapCode::new("").is_err());
    }

    #[test]
    fn test_map_code_rejects_lowercase_and_symbols() {
        assert!(MapCode::new("abcd").is_err());
        assert!(MapCode::new("AB-CD").is_err());
        assert!(MapCode::new("AB CD").is_err());
    }

    #[test]
    fn test_map_code_serde_validates() {
        let ok: MapCode = serde_json::from_str("\"K3W9Z\"").unwrap();
        assert_eq!(ok.to_string(), "K3W9Z");
        assert!(serde_json::from_str::<MapCode>("\"bad\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"K3W9Z\"");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&UserId(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&ThreadId(7)).unwrap(), "7");
        assert_eq!(UserId(42).to_string(), "user:42");
    }
}
