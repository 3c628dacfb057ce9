//! # gpk-progression: XP Progression
//!
//! Classifies XP totals into main tier, sub-tier and prestige level, and
//! classifies the change between two totals for rank-up notifications.
//!
//! - **Ladder** (`ladder.rs`): the configured tier ladder.
//! - **Engine** (`engine.rs`): `classify` and `diff`.
//! - **XP** (`xp.rs`): grant kinds, configured amounts, grant application.
//! - **Mastery** (`mastery.rs`): per-map completion mastery levels.
//!
//! Storing XP totals is the caller's concern; everything here is pure.

pub mod engine;
pub mod ladder;
pub mod mastery;
pub mod xp;

pub use engine::{
    ProgressionEngine, ProgressionError, ProgressionState, RankChangeType, TierChangeRecord,
};
pub use ladder::{LadderError, TierLadder};
pub use mastery::{MapMastery, MasteryLevel};
pub use xp::{XpAmounts, XpGrant, XpGrantKind, XpGrantOutcome};
