//! # gpk-completion: Medal and Rank Evaluation
//!
//! Grades a completion time against a map's medal thresholds and places it
//! on the map's leaderboard.
//!
//! - **Medals** (`medal.rs`): `Gold`/`Silver`/`Bronze`, validated thresholds,
//!   and per-tier defaults for maps that declare none.
//! - **Rank** (`rank.rs`): `evaluate` for one new time, `rank_all` for a
//!   whole board.
//!
//! Threshold boundaries are inclusive: a time equal to the gold threshold
//! earns gold. Ranking ties go to the earlier submission.

pub mod medal;
pub mod rank;

pub use medal::{Medal, MedalDefaults, MedalError, MedalThresholds};
pub use rank::{evaluate, rank_all, Evaluation, PriorCompletion, RankedCompletion};
