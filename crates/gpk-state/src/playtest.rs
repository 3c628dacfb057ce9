//! # Playtest Review State Machine
//!
//! Governs how a submitted map moves from community review to publication
//! with a finalized difficulty.
//!
//! ## States
//!
//! ```text
//!                 cast_vote / remove_vote
//!                      ┌──────┐
//!                      ▼      │
//!               ┌─▶ InProgress ┴──approve / force_accept──▶ Approved ─┐
//!               │        │                                            │
//!               │        └──force_deny──▶ Rejected ───────────────────┤
//!               │                                                     │
//!               └──────────────────────── reset ◀─────────────────────┘
//! ```
//!
//! ## Eligibility
//!
//! After every vote mutation the running average is bucketed into a
//! top-level tier and the vote count compared with that tier's requirement.
//! Meeting it sets `completed`; the machine never approves by itself. The
//! decision to publish stays with the caller.
//!
//! ## Failure Semantics
//!
//! Every rejected command leaves the playtest untouched: all checks run
//! before the first mutation. State is checked before inputs.

use gpk_core::{MapCode, ThreadId, UserId};
use gpk_scale::{DifficultyScale, DifficultyTier};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::{FinalizedDifficulty, PlaytestCommand, PlaytestEvent};

// ─── Playtest Status ─────────────────────────────────────────────────

/// Review status of a playtest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaytestStatus {
    /// Under community review; votes are accepted.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Published with a finalized difficulty (terminal until reset).
    Approved,
    /// Rejected by a verifier (terminal until reset).
    Rejected,
}

impl PlaytestStatus {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for PlaytestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InProgress => "In Progress",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by playtest transitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaytestError {
    /// The command is not valid in the playtest's current state.
    #[error("cannot {action} a playtest that is {from}")]
    InvalidStateTransition {
        /// Current state.
        from: PlaytestStatus,
        /// Attempted action.
        action: &'static str,
    },

    /// A difficulty value outside `[0, 10]`.
    #[error("difficulty value {value} is outside [0, 10]")]
    InvalidValue {
        /// The rejected value.
        value: f64,
    },

    /// The voter has no live vote on this playtest.
    #[error("{voter} has no vote on this playtest")]
    VoteNotFound {
        /// The voter.
        voter: UserId,
    },

    /// Approval at the average needs at least one vote.
    #[error("cannot approve at the vote average: no votes have been cast")]
    InsufficientData,

    /// The action needs a non-empty reason.
    #[error("{action} requires a reason")]
    ReasonRequired {
        /// The action missing a reason.
        action: &'static str,
    },
}

// ─── Votes, Snapshots, History ───────────────────────────────────────

/// One voter's difficulty estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: UserId,
    pub value: f64,
}

/// Read model returned after every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaytestSnapshot {
    pub code: MapCode,
    pub status: PlaytestStatus,
    /// Mean of live votes; `None` when there are none.
    pub average: Option<f64>,
    /// Tier of `average`.
    pub average_tier: Option<DifficultyTier>,
    pub vote_count: usize,
    /// Votes `average_tier` needs for eligibility.
    pub required_votes: Option<u32>,
    pub voters: Vec<UserId>,
    /// Enough consensus exists to approve.
    pub completed: bool,
    pub finalized: Option<FinalizedDifficulty>,
}

/// Snapshot plus the event the command emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaytestOutcome {
    pub snapshot: PlaytestSnapshot,
    pub event: PlaytestEvent,
}

/// Record of a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaytestTransitionRecord {
    pub from_status: PlaytestStatus,
    pub to_status: PlaytestStatus,
    pub action: String,
    pub actor: UserId,
    pub reason: Option<String>,
}

// ─── Playtest ────────────────────────────────────────────────────────

/// One map under community review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playtest {
    code: MapCode,
    thread_id: Option<ThreadId>,
    creator_id: UserId,
    initial_difficulty: f64,
    status: PlaytestStatus,
    votes: Vec<Vote>,
    verifier: Option<UserId>,
    completed: bool,
    finalized: Option<FinalizedDifficulty>,
    history: Vec<PlaytestTransitionRecord>,
    /// Approval XP has been paid out. Survives reset.
    #[serde(default)]
    rewarded: bool,
}

impl Playtest {
    /// Open a playtest for `code` with the submitter's declared difficulty.
    pub fn new(
        scale: &DifficultyScale,
        code: MapCode,
        creator_id: UserId,
        initial_difficulty: f64,
    ) -> Result<Self, PlaytestError> {
        let initial_difficulty = checked_value(scale, initial_difficulty)?;
        Ok(Self {
            code,
            thread_id: None,
            creator_id,
            initial_difficulty,
            status: PlaytestStatus::InProgress,
            votes: Vec::new(),
            verifier: None,
            completed: false,
            finalized: None,
            history: Vec::new(),
            rewarded: false,
        })
    }

    /// Attach the discussion thread created for this playtest.
    pub fn with_thread(mut self, thread_id: ThreadId) -> Self {
        self.thread_id = Some(thread_id);
        self
    }

    pub fn code(&self) -> &MapCode {
        &self.code
    }

    pub fn thread_id(&self) -> Option<ThreadId> {
        self.thread_id
    }

    pub fn creator_id(&self) -> UserId {
        self.creator_id
    }

    pub fn initial_difficulty(&self) -> f64 {
        self.initial_difficulty
    }

    pub fn status(&self) -> PlaytestStatus {
        self.status
    }

    /// Live votes in first-cast order.
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Verifier who made the current decision, if decided.
    pub fn verifier(&self) -> Option<UserId> {
        self.verifier
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn finalized(&self) -> Option<&FinalizedDifficulty> {
        self.finalized.as_ref()
    }

    pub fn history(&self) -> &[PlaytestTransitionRecord] {
        &self.history
    }

    /// Whether approval XP was already granted for this map. A reset does
    /// not clear it, so a re-approved map pays out once.
    pub fn rewarded(&self) -> bool {
        self.rewarded
    }

    pub fn mark_rewarded(&mut self) {
        self.rewarded = true;
    }

    /// Mean of live votes, `None` without votes.
    pub fn average(&self) -> Option<f64> {
        if self.votes.is_empty() {
            return None;
        }
        let sum: f64 = self.votes.iter().map(|v| v.value).sum();
        Some(sum / self.votes.len() as f64)
    }

    /// Current read model.
    pub fn snapshot(&self, scale: &DifficultyScale) -> PlaytestSnapshot {
        let average = self.average();
        let average_tier = average.and_then(|avg| scale.top_level_of(avg).ok());
        PlaytestSnapshot {
            code: self.code.clone(),
            status: self.status,
            average,
            average_tier,
            vote_count: self.votes.len(),
            required_votes: average_tier.map(|tier| scale.required_vote_count(tier)),
            voters: self.votes.iter().map(|v| v.voter).collect(),
            completed: self.completed,
            finalized: self.finalized.clone(),
        }
    }

    // ── Transition function ─────────────────────────────────────────

    /// Apply one command. On error the playtest is unchanged.
    pub fn apply(
        &mut self,
        scale: &DifficultyScale,
        command: PlaytestCommand,
    ) -> Result<PlaytestOutcome, PlaytestError> {
        let action = command.action();
        let event = match command {
            PlaytestCommand::CastVote { voter, value } => {
                self.require_in_progress(action)?;
                let value = checked_value(scale, value)?;
                match self.votes.iter_mut().find(|v| v.voter == voter) {
                    Some(existing) => existing.value = value,
                    None => self.votes.push(Vote { voter, value }),
                }
                self.refresh_completed(scale);
                tracing::debug!(code = %self.code, %voter, value, completed = self.completed, "vote cast");
                PlaytestEvent::VoteCast {
                    code: self.code.clone(),
                    thread_id: self.thread_id,
                    voter,
                    value,
                }
            }

            PlaytestCommand::RemoveVote { voter } => {
                self.require_in_progress(action)?;
                let idx = self
                    .votes
                    .iter()
                    .position(|v| v.voter == voter)
                    .ok_or(PlaytestError::VoteNotFound { voter })?;
                self.votes.remove(idx);
                self.refresh_completed(scale);
                tracing::debug!(code = %self.code, %voter, completed = self.completed, "vote removed");
                PlaytestEvent::VoteRemoved {
                    code: self.code.clone(),
                    thread_id: self.thread_id,
                    voter,
                }
            }

            PlaytestCommand::Approve { verifier } => {
                self.require_in_progress(action)?;
                let average = self.average().ok_or(PlaytestError::InsufficientData)?;
                let difficulty = finalize(scale, average)?;
                self.decide(PlaytestStatus::Approved, action, verifier, None);
                self.finalized = Some(difficulty.clone());
                PlaytestEvent::Approved {
                    code: self.code.clone(),
                    thread_id: self.thread_id,
                    verifier,
                    creator_id: self.creator_id,
                    difficulty,
                }
            }

            PlaytestCommand::ForceAccept {
                verifier,
                difficulty,
            } => {
                self.require_in_progress(action)?;
                let difficulty = finalize(scale, difficulty)?;
                self.decide(PlaytestStatus::Approved, action, verifier, None);
                self.finalized = Some(difficulty.clone());
                PlaytestEvent::ForceAccepted {
                    code: self.code.clone(),
                    thread_id: self.thread_id,
                    verifier,
                    creator_id: self.creator_id,
                    difficulty,
                }
            }

            PlaytestCommand::ForceDeny { verifier, reason } => {
                self.require_in_progress(action)?;
                if reason.trim().is_empty() {
                    return Err(PlaytestError::ReasonRequired { action });
                }
                self.decide(
                    PlaytestStatus::Rejected,
                    action,
                    verifier,
                    Some(reason.clone()),
                );
                PlaytestEvent::ForceDenied {
                    code: self.code.clone(),
                    thread_id: self.thread_id,
                    verifier,
                    reason,
                }
            }

            PlaytestCommand::Reset {
                verifier,
                reason,
                remove_votes,
                remove_completions,
            } => {
                if !self.status.is_terminal() {
                    return Err(PlaytestError::InvalidStateTransition {
                        from: self.status,
                        action,
                    });
                }
                if remove_votes {
                    self.votes.clear();
                }
                self.decide(
                    PlaytestStatus::InProgress,
                    action,
                    verifier,
                    Some(reason.clone()),
                );
                self.verifier = None;
                self.finalized = None;
                self.refresh_completed(scale);
                PlaytestEvent::Reset {
                    code: self.code.clone(),
                    thread_id: self.thread_id,
                    verifier,
                    reason,
                    remove_votes,
                    remove_completions,
                }
            }
        };

        Ok(PlaytestOutcome {
            snapshot: self.snapshot(scale),
            event,
        })
    }

    // ── Named operations ────────────────────────────────────────────

    /// Cast or replace a vote.
    pub fn cast_vote(
        &mut self,
        scale: &DifficultyScale,
        voter: UserId,
        value: f64,
    ) -> Result<PlaytestOutcome, PlaytestError> {
        self.apply(scale, PlaytestCommand::CastVote { voter, value })
    }

    /// Withdraw a vote.
    pub fn remove_vote(
        &mut self,
        scale: &DifficultyScale,
        voter: UserId,
    ) -> Result<PlaytestOutcome, PlaytestError> {
        self.apply(scale, PlaytestCommand::RemoveVote { voter })
    }

    /// Approve at the current average.
    pub fn approve(
        &mut self,
        scale: &DifficultyScale,
        verifier: UserId,
    ) -> Result<PlaytestOutcome, PlaytestError> {
        self.apply(scale, PlaytestCommand::Approve { verifier })
    }

    /// Approve at `difficulty`, bypassing votes.
    pub fn force_accept(
        &mut self,
        scale: &DifficultyScale,
        verifier: UserId,
        difficulty: f64,
    ) -> Result<PlaytestOutcome, PlaytestError> {
        self.apply(
            scale,
            PlaytestCommand::ForceAccept {
                verifier,
                difficulty,
            },
        )
    }

    /// Reject with a mandatory reason.
    pub fn force_deny(
        &mut self,
        scale: &DifficultyScale,
        verifier: UserId,
        reason: impl Into<String>,
    ) -> Result<PlaytestOutcome, PlaytestError> {
        self.apply(
            scale,
            PlaytestCommand::ForceDeny {
                verifier,
                reason: reason.into(),
            },
        )
    }

    /// Reopen a decided playtest.
    pub fn reset(
        &mut self,
        scale: &DifficultyScale,
        verifier: UserId,
        reason: impl Into<String>,
        remove_votes: bool,
        remove_completions: bool,
    ) -> Result<PlaytestOutcome, PlaytestError> {
        self.apply(
            scale,
            PlaytestCommand::Reset {
                verifier,
                reason: reason.into(),
                remove_votes,
                remove_completions,
            },
        )
    }

    // ── Internals ───────────────────────────────────────────────────

    fn require_in_progress(&self, action: &'static str) -> Result<(), PlaytestError> {
        if self.status != PlaytestStatus::InProgress {
            return Err(PlaytestError::InvalidStateTransition {
                from: self.status,
                action,
            });
        }
        Ok(())
    }

    fn refresh_completed(&mut self, scale: &DifficultyScale) {
        self.completed = self
            .average()
            .and_then(|avg| scale.top_level_of(avg).ok())
            .is_some_and(|tier| self.votes.len() >= scale.required_vote_count(tier) as usize);
    }

    fn decide(
        &mut self,
        to: PlaytestStatus,
        action: &str,
        actor: UserId,
        reason: Option<String>,
    ) {
        tracing::debug!(code = %self.code, from = %self.status, to = %to, %actor, action, "playtest transition");
        self.history.push(PlaytestTransitionRecord {
            from_status: self.status,
            to_status: to,
            action: action.to_string(),
            actor,
            reason,
        });
        self.status = to;
        self.verifier = Some(actor);
    }
}

fn checked_value(scale: &DifficultyScale, value: f64) -> Result<f64, PlaytestError> {
    scale
        .check(value)
        .map_err(|_| PlaytestError::InvalidValue { value })
}

fn finalize(scale: &DifficultyScale, raw: f64) -> Result<FinalizedDifficulty, PlaytestError> {
    let classification = scale
        .classify(raw)
        .map_err(|_| PlaytestError::InvalidValue { value: raw })?;
    Ok(FinalizedDifficulty {
        raw,
        tier: classification.tier,
        label: classification.label,
    })
}

/// Title of the discussion thread opened for a playtest, capped at 100
/// characters: `"{code} | {difficulty} {map} by {creator}"`.
pub fn thread_name(code: &MapCode, difficulty: &str, map_name: &str, creator_name: &str) -> String {
    format!("{code} | {difficulty} {map_name} by {creator_name}")
        .chars()
        .take(100)
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Re-voting never duplicates: the live vote count equals the number
        /// of distinct voters, and each voter's latest value wins.
        #[test]
        fn votes_are_unique_per_voter(
            casts in prop::collection::vec((0u64..6, 0.0f64..=10.0), 1..40)
        ) {
            let s = DifficultyScale::default();
            let mut pt = Playtest::new(&s, MapCode::new("PROP1").unwrap(), UserId(1), 5.0).unwrap();
            let mut latest = std::collections::HashMap::new();
            for (voter, value) in &casts {
                pt.cast_vote(&s, UserId(*voter), *value).unwrap();
                latest.insert(*voter, *value);
            }
            prop_assert_eq!(pt.votes().len(), latest.len());
            for vote in pt.votes() {
                prop_assert_eq!(Some(&vote.value), latest.get(&vote.voter.0));
            }
            let expected: f64 = latest.values().sum::<f64>() / latest.len() as f64;
            prop_assert!((pt.average().unwrap() - expected).abs() < 1e-9);
        }
    }
}
