//! # Top-Level Difficulty Tiers
//!
//! The six coarse buckets every map is published under. The set is fixed:
//! adding a tier forces every `match` in the workspace to handle it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ScaleError;

/// Coarse difficulty tier, ordered from easiest to hardest.
///
/// The derived `Ord` follows declaration order, so `Easy < Hell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    #[serde(rename = "Very Hard")]
    VeryHard,
    Extreme,
    Hell,
}

/// Number of top-level tiers.
pub const DIFFICULTY_TIER_COUNT: usize = 6;

impl DifficultyTier {
    /// All tiers in rank order.
    pub fn all() -> &'static [DifficultyTier] {
        &[
            Self::Easy,
            Self::Medium,
            Self::Hard,
            Self::VeryHard,
            Self::Extreme,
            Self::Hell,
        ]
    }

    /// Zero-based rank of the tier (`Easy` = 0).
    pub fn rank(&self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
            Self::VeryHard => 3,
            Self::Extreme => 4,
            Self::Hell => 5,
        }
    }

    /// Display name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::VeryHard => "Very Hard",
            Self::Extreme => "Extreme",
            Self::Hell => "Hell",
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyTier {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| ScaleError::UnknownTier {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tiers_ranked_in_order() {
        assert_eq!(DifficultyTier::all().len(), DIFFICULTY_TIER_COUNT);
        for (i, tier) in DifficultyTier::all().iter().enumerate() {
            assert_eq!(tier.rank(), i);
        }
        assert!(DifficultyTier::Easy < DifficultyTier::Hell);
        assert!(DifficultyTier::VeryHard < DifficultyTier::Extreme);
    }

    #[test]
    fn test_as_str_roundtrip() {
        for tier in DifficultyTier::all() {
            let parsed: DifficultyTier = tier.as_str().parse().unwrap();
            assert_eq!(*tier, parsed);
        }
        assert!("very hard".parse::<DifficultyTier>().is_err());
        assert!("".parse::<DifficultyTier>().is_err());
    }

    #[test]
    fn test_serde_matches_display() {
        for tier in DifficultyTier::all() {
            let json = serde_json::to_string(tier).unwrap();
            assert_eq!(json, format!("\"{tier}\""));
        }
    }
}
