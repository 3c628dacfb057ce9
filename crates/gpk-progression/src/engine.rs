//! # Progression Tier Engine
//!
//! Pure classification of XP totals onto the [`TierLadder`], and of the
//! delta between two totals into a [`TierChangeRecord`] for notifications.
//!
//! The mapping is explicit modular arithmetic:
//!
//! ```text
//! prestige = xp / cycle_xp
//! within   = xp % cycle_xp
//! main     = within / main_tier_xp
//! sub      = (within % main_tier_xp) / sub_tier_xp
//! ```
//!
//! so within one prestige cycle `(main, sub)` never decreases as XP grows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ladder::TierLadder;

/// Errors raised by the progression engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    /// XP totals are never negative.
    #[error("xp must be non-negative, got {xp}")]
    NegativeXp {
        /// The rejected total.
        xp: i64,
    },

    /// A grant of kind `Other` needs an explicit amount.
    #[error("xp grant of kind {kind} requires an explicit amount")]
    AmountRequired {
        /// The grant kind.
        kind: String,
    },

    /// Adding a grant would overflow the XP counter.
    #[error("xp total overflows: {previous} + {amount}")]
    Overflow {
        /// Total before the grant.
        previous: u64,
        /// Granted amount.
        amount: u64,
    },
}

/// Tier position derived from an XP total.
///
/// Never stored; always recomputed from `xp`, so equal totals always derive
/// equal states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub xp: u64,
    /// Zero-based index into the ladder's main tiers.
    pub main_tier: usize,
    pub main_tier_name: String,
    /// Zero-based index into the ladder's sub-tiers.
    pub sub_tier: usize,
    pub sub_tier_name: String,
    pub prestige_level: u64,
    /// Sub-tier rungs climbed in total, across all prestige cycles.
    pub raw_tier: u64,
    /// Sub-tier rungs climbed within the current cycle.
    pub normalized_tier: u64,
}

impl ProgressionState {
    /// `(main_tier, sub_tier)`, comparable lexicographically.
    pub fn position(&self) -> (usize, usize) {
        (self.main_tier, self.sub_tier)
    }

    /// Display name such as `"Jumper III"`.
    pub fn tier_name(&self) -> String {
        format!("{} {}", self.main_tier_name, self.sub_tier_name)
    }
}

/// How a user's tier moved between two XP totals.
///
/// A change of main tier is reported as such even when the sub-tier changed
/// too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankChangeType {
    #[serde(rename = "None")]
    Unchanged,
    #[serde(rename = "Sub-Tier Rank Up")]
    SubTierRankUp,
    #[serde(rename = "Main Tier Rank Up")]
    MainTierRankUp,
}

impl std::fmt::Display for RankChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unchanged => "None",
            Self::SubTierRankUp => "Sub-Tier Rank Up",
            Self::MainTierRankUp => "Main Tier Rank Up",
        };
        f.write_str(s)
    }
}

/// Immutable comparison of the tier positions of two XP totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierChangeRecord {
    pub old_xp: u64,
    pub new_xp: u64,
    pub old_main_tier_name: String,
    pub new_main_tier_name: String,
    pub old_sub_tier_name: String,
    pub new_sub_tier_name: String,
    pub old_prestige_level: u64,
    pub new_prestige_level: u64,
    pub rank_change_type: RankChangeType,
    pub prestige_change: bool,
}

impl TierChangeRecord {
    /// Whether anything worth announcing happened.
    pub fn is_notable(&self) -> bool {
        self.rank_change_type != RankChangeType::Unchanged || self.prestige_change
    }
}

/// Classifies XP totals against a ladder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressionEngine {
    ladder: TierLadder,
}

impl ProgressionEngine {
    pub fn new(ladder: TierLadder) -> Self {
        Self { ladder }
    }

    pub fn ladder(&self) -> &TierLadder {
        &self.ladder
    }

    /// Tier, sub-tier and prestige level of `xp`.
    pub fn classify(&self, xp: i64) -> Result<ProgressionState, ProgressionError> {
        let xp = u64::try_from(xp).map_err(|_| ProgressionError::NegativeXp { xp })?;
        Ok(self.state_of(xp))
    }

    /// Compare the positions of `old_xp` and `new_xp`.
    pub fn diff(&self, old_xp: i64, new_xp: i64) -> Result<TierChangeRecord, ProgressionError> {
        let old = self.classify(old_xp)?;
        let new = self.classify(new_xp)?;
        Ok(compare(&old, &new))
    }

    /// [`classify`](Self::classify) for totals already known to be
    /// non-negative.
    pub fn state_of(&self, xp: u64) -> ProgressionState {
        let ladder = &self.ladder;
        let cycle = ladder.cycle_xp();
        let main_width = ladder.main_tier_xp();
        let sub_width = ladder.sub_tier_xp();

        let prestige_level = xp / cycle;
        let within = xp % cycle;
        let main_tier = (within / main_width) as usize;
        let sub_tier = ((within % main_width) / sub_width) as usize;
        let raw_tier = xp / sub_width;

        ProgressionState {
            xp,
            main_tier,
            main_tier_name: ladder.main_tiers()[main_tier].clone(),
            sub_tier,
            sub_tier_name: ladder.sub_tiers()[sub_tier].clone(),
            prestige_level,
            raw_tier,
            normalized_tier: raw_tier % ladder.rungs_per_cycle(),
        }
    }

    /// [`diff`](Self::diff) for totals already known to be non-negative.
    pub fn change_between(&self, old_xp: u64, new_xp: u64) -> TierChangeRecord {
        compare(&self.state_of(old_xp), &self.state_of(new_xp))
    }
}

fn compare(old: &ProgressionState, new: &ProgressionState) -> TierChangeRecord {
    let rank_change_type = if old.main_tier != new.main_tier {
        RankChangeType::MainTierRankUp
    } else if old.sub_tier != new.sub_tier {
        RankChangeType::SubTierRankUp
    } else {
        RankChangeType::Unchanged
    };
    TierChangeRecord {
        old_xp: old.xp,
        new_xp: new.xp,
        old_main_tier_name: old.main_tier_name.clone(),
        new_main_tier_name: new.main_tier_name.clone(),
        old_sub_tier_name: old.sub_tier_name.clone(),
        new_sub_tier_name: new.sub_tier_name.clone(),
        old_prestige_level: old.prestige_level,
        new_prestige_level: new.prestige_level,
        rank_change_type,
        prestige_change: old.prestige_level != new.prestige_level,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn classify_is_deterministic(xp in 0i64..10_000_000) {
            let e = ProgressionEngine::default();
            prop_assert_eq!(e.classify(xp).unwrap(), e.classify(xp).unwrap());
        }

        /// Within one prestige cycle more XP never lowers the position.
        #[test]
        fn classify_monotonic_within_cycle(
            cycle in 0i64..50,
            a in 0i64..10_000,
            b in 0i64..10_000,
        ) {
            let e = ProgressionEngine::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let base = cycle * 10_000;
            let s1 = e.classify(base + lo).unwrap();
            let s2 = e.classify(base + hi).unwrap();
            prop_assert_eq!(s1.prestige_level, s2.prestige_level);
            prop_assert!(s1.position() <= s2.position());
        }

        #[test]
        fn diff_of_equal_totals_is_unchanged(xp in 0i64..10_000_000) {
            let r = ProgressionEngine::default().diff(xp, xp).unwrap();
            prop_assert_eq!(r.rank_change_type, RankChangeType::Unchanged);
            prop_assert!(!r.prestige_change);
        }

        #[test]
        fn prestige_counts_full_cycles(xp in 0i64..10_000_000) {
            let s = ProgressionEngine::default().classify(xp).unwrap();
            prop_assert_eq!(s.prestige_level, (xp / 10_000) as u64);
        }
    }
}
