//! # gpk-state: Playtest Review State Machine
//!
//! A submitted map sits in playtest until a verifier decides on it. This
//! crate owns that lifecycle:
//!
//! - **Commands** (`command.rs`): the closed set of mutations and the
//!   events they emit.
//! - **Playtest** (`playtest.rs`): votes, the running average, approval
//!   eligibility, and the single transition function.
//!
//! Eligibility is derived from [`gpk_scale`]: the average's tier decides how
//! many votes are required. The state machine never publishes a map on its
//! own; approval is always an explicit verifier command.

pub mod command;
pub mod playtest;

pub use command::{FinalizedDifficulty, PlaytestCommand, PlaytestEvent};
pub use playtest::{
    thread_name, Playtest, PlaytestError, PlaytestOutcome, PlaytestSnapshot, PlaytestStatus,
    PlaytestTransitionRecord, Vote,
};
