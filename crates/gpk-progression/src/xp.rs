//! # XP Grants
//!
//! The community awards XP for a fixed set of activities. Each kind has a
//! configured amount; `Other` grants always carry an explicit amount.

use gpk_core::UserId;
use serde::{Deserialize, Serialize};

use crate::engine::{ProgressionEngine, ProgressionError, TierChangeRecord};

/// Activity an XP grant rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XpGrantKind {
    #[serde(rename = "Map Submission")]
    MapSubmission,
    Playtest,
    Guide,
    Completion,
    Record,
    #[serde(rename = "World Record")]
    WorldRecord,
    Other,
}

impl XpGrantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MapSubmission => "Map Submission",
            Self::Playtest => "Playtest",
            Self::Guide => "Guide",
            Self::Completion => "Completion",
            Self::Record => "Record",
            Self::WorldRecord => "World Record",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for XpGrantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured XP per grant kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpAmounts {
    pub map_submission: u64,
    pub playtest: u64,
    pub guide: u64,
    pub completion: u64,
    pub record: u64,
    pub world_record: u64,
}

impl Default for XpAmounts {
    fn default() -> Self {
        Self {
            map_submission: 30,
            playtest: 35,
            guide: 35,
            completion: 5,
            record: 15,
            world_record: 50,
        }
    }
}

impl XpAmounts {
    /// Standard amount for `kind`; `None` for `Other`.
    pub fn amount_for(&self, kind: XpGrantKind) -> Option<u64> {
        match kind {
            XpGrantKind::MapSubmission => Some(self.map_submission),
            XpGrantKind::Playtest => Some(self.playtest),
            XpGrantKind::Guide => Some(self.guide),
            XpGrantKind::Completion => Some(self.completion),
            XpGrantKind::Record => Some(self.record),
            XpGrantKind::WorldRecord => Some(self.world_record),
            XpGrantKind::Other => None,
        }
    }
}

/// A request to add XP to one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGrant {
    pub user_id: UserId,
    pub kind: XpGrantKind,
    pub amount: u64,
}

impl XpGrant {
    /// Grant the configured amount for `kind`.
    pub fn standard(
        user_id: UserId,
        kind: XpGrantKind,
        amounts: &XpAmounts,
    ) -> Result<Self, ProgressionError> {
        let amount = amounts
            .amount_for(kind)
            .ok_or_else(|| ProgressionError::AmountRequired {
                kind: kind.to_string(),
            })?;
        Ok(Self {
            user_id,
            kind,
            amount,
        })
    }

    /// Grant an explicit amount, overriding the configured one.
    pub fn custom(user_id: UserId, kind: XpGrantKind, amount: u64) -> Self {
        Self {
            user_id,
            kind,
            amount,
        }
    }
}

/// Result of applying a grant to a stored total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGrantOutcome {
    pub user_id: UserId,
    pub kind: XpGrantKind,
    pub amount: u64,
    pub previous_amount: u64,
    pub new_amount: u64,
    pub change: TierChangeRecord,
}

impl ProgressionEngine {
    /// Apply `grant` to `previous_amount` and classify the tier change.
    ///
    /// Storing the new total is the caller's job.
    pub fn grant(
        &self,
        previous_amount: u64,
        grant: &XpGrant,
    ) -> Result<XpGrantOutcome, ProgressionError> {
        let new_amount = previous_amount.checked_add(grant.amount).ok_or(
            ProgressionError::Overflow {
                previous: previous_amount,
                amount: grant.amount,
            },
        )?;
        Ok(XpGrantOutcome {
            user_id: grant.user_id,
            kind: grant.kind,
            amount: grant.amount,
            previous_amount,
            new_amount,
            change: self.change_between(previous_amount, new_amount),
        })
    }
}
