//! # Tier Ladder
//!
//! The XP ladder is a fixed sequence of main tiers, each split into the same
//! ordered sub-tiers, each sub-tier a fixed number of XP wide. Climbing past
//! the last sub-tier of the last main tier starts a new prestige cycle at the
//! bottom of the ladder.
//!
//! ```text
//! |<------------------------- cycle_xp ------------------------->|
//! |<-- main_tier_xp -->|                                         |
//! | I | II | III | IV | V | I | II | ... | I | II | III | IV | V |
//!   ^ sub_tier_xp
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SUB_TIER_XP: u64 = 100;

const DEFAULT_SUB_TIERS: &[&str] = &["I", "II", "III", "IV", "V"];

const DEFAULT_MAIN_TIERS: &[&str] = &[
    "Newcomer",
    "Roadrunner",
    "Jumper",
    "Skipper",
    "Hopper",
    "Dasher",
    "Bouncer",
    "Climber",
    "Vaulter",
    "Runner",
    "Sprinter",
    "Glider",
    "Flyer",
    "Ninja",
    "Sensei",
    "Shogun",
    "Samurai",
    "Phantom",
    "Legend",
    "Mythic",
];

/// Errors raised while validating a ladder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    /// Sub-tiers must be at least one XP wide.
    #[error("sub-tier width must be positive")]
    ZeroWidth,

    /// The ladder has no main tiers.
    #[error("ladder has no main tiers")]
    NoMainTiers,

    /// Main tiers have no sub-tiers.
    #[error("ladder has no sub-tiers")]
    NoSubTiers,

    /// A tier name is blank.
    #[error("tier names must not be blank")]
    BlankName,

    /// One prestige cycle does not fit in 64 bits of XP.
    #[error("ladder cycle length overflows")]
    Overflow,
}

/// Validated XP ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTierLadder")]
pub struct TierLadder {
    sub_tier_xp: u64,
    sub_tiers: Vec<String>,
    main_tiers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTierLadder {
    #[serde(default = "default_sub_tier_xp")]
    sub_tier_xp: u64,
    #[serde(default = "default_sub_tiers")]
    sub_tiers: Vec<String>,
    #[serde(default = "default_main_tiers")]
    main_tiers: Vec<String>,
}

fn default_sub_tier_xp() -> u64 {
    DEFAULT_SUB_TIER_XP
}

fn default_sub_tiers() -> Vec<String> {
    DEFAULT_SUB_TIERS.iter().map(|s| s.to_string()).collect()
}

fn default_main_tiers() -> Vec<String> {
    DEFAULT_MAIN_TIERS.iter().map(|s| s.to_string()).collect()
}

impl TryFrom<RawTierLadder> for TierLadder {
    type Error = LadderError;

    fn try_from(raw: RawTierLadder) -> Result<Self, Self::Error> {
        Self::new(raw.sub_tier_xp, raw.sub_tiers, raw.main_tiers)
    }
}

impl TierLadder {
    /// Validate and build a ladder.
    pub fn new(
        sub_tier_xp: u64,
        sub_tiers: Vec<String>,
        main_tiers: Vec<String>,
    ) -> Result<Self, LadderError> {
        if sub_tier_xp == 0 {
            return Err(LadderError::ZeroWidth);
        }
        if main_tiers.is_empty() {
            return Err(LadderError::NoMainTiers);
        }
        if sub_tiers.is_empty() {
            return Err(LadderError::NoSubTiers);
        }
        if main_tiers
            .iter()
            .chain(sub_tiers.iter())
            .any(|name| name.trim().is_empty())
        {
            return Err(LadderError::BlankName);
        }
        let rungs = (main_tiers.len() as u64)
            .checked_mul(sub_tiers.len() as u64)
            .ok_or(LadderError::Overflow)?;
        rungs.checked_mul(sub_tier_xp).ok_or(LadderError::Overflow)?;
        Ok(Self {
            sub_tier_xp,
            sub_tiers,
            main_tiers,
        })
    }

    /// XP width of one sub-tier.
    pub fn sub_tier_xp(&self) -> u64 {
        self.sub_tier_xp
    }

    /// XP width of one main tier.
    pub fn main_tier_xp(&self) -> u64 {
        self.sub_tier_xp * self.sub_tiers.len() as u64
    }

    /// XP needed to traverse the whole ladder once.
    pub fn cycle_xp(&self) -> u64 {
        self.main_tier_xp() * self.main_tiers.len() as u64
    }

    /// Number of sub-tier rungs in one cycle.
    pub fn rungs_per_cycle(&self) -> u64 {
        (self.main_tiers.len() * self.sub_tiers.len()) as u64
    }

    /// Main tier names, lowest first.
    pub fn main_tiers(&self) -> &[String] {
        &self.main_tiers
    }

    /// Sub-tier names, lowest first.
    pub fn sub_tiers(&self) -> &[String] {
        &self.sub_tiers
    }
}

impl Default for TierLadder {
    /// 20 main tiers of 5 sub-tiers, 100 XP per sub-tier.
    fn default() -> Self {
        Self {
            sub_tier_xp: DEFAULT_SUB_TIER_XP,
            sub_tiers: default_sub_tiers(),
            main_tiers: default_main_tiers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_ladder_dimensions() {
        let ladder = TierLadder::default();
        assert_eq!(ladder.main_tiers().len(), 20);
        assert_eq!(ladder.sub_tiers().len(), 5);
        assert_eq!(ladder.main_tier_xp(), 500);
        assert_eq!(ladder.cycle_xp(), 10_000);
        assert_eq!(ladder.rungs_per_cycle(), 100);
    }

    #[test]
    fn test_default_ladder_is_valid() {
        let d = TierLadder::default();
        let rebuilt = TierLadder::new(
            d.sub_tier_xp(),
            d.sub_tiers().to_vec(),
            d.main_tiers().to_vec(),
        )
        .unwrap();
        assert_eq!(rebuilt, d);
    }

    #[test]
    fn test_rejects_invalid_ladders() {
        assert_eq!(
            TierLadder::new(0, names(&["I"]), names(&["A"])),
            Err(LadderError::ZeroWidth)
        );
        assert_eq!(
            TierLadder::new(10, names(&["I"]), vec![]),
            Err(LadderError::NoMainTiers)
        );
        assert_eq!(
            TierLadder::new(10, vec![], names(&["A"])),
            Err(LadderError::NoSubTiers)
        );
        assert_eq!(
            TierLadder::new(10, names(&["I", " "]), names(&["A"])),
            Err(LadderError::BlankName)
        );
        assert_eq!(
            TierLadder::new(u64::MAX, names(&["I", "II"]), names(&["A"])),
            Err(LadderError::Overflow)
        );
    }

    #[test]
    fn test_deserialize_partial_ladder() {
        let ladder: TierLadder = serde_yaml::from_str("sub_tier_xp: 50\n").unwrap();
        assert_eq!(ladder.sub_tier_xp(), 50);
        assert_eq!(ladder.main_tiers().len(), 20);
        assert!(serde_yaml::from_str::<TierLadder>("main_tiers: []\n").is_err());
    }
}
