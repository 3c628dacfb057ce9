//! # Playtest Commands and Events
//!
//! Every mutation of a playtest is one [`PlaytestCommand`], applied by the
//! single transition function [`Playtest::apply`](crate::Playtest::apply).
//! Every successful command emits one [`PlaytestEvent`] for the messaging
//! collaborator to publish.

use gpk_core::{MapCode, ThreadId, UserId};
use gpk_scale::DifficultyTier;
use serde::{Deserialize, Serialize};

/// A request to change a playtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlaytestCommand {
    /// Cast or replace `voter`'s difficulty vote.
    CastVote { voter: UserId, value: f64 },
    /// Withdraw `voter`'s vote.
    RemoveVote { voter: UserId },
    /// Approve at the current vote average.
    Approve { verifier: UserId },
    /// Approve at a verifier-chosen difficulty, ignoring votes.
    ForceAccept { verifier: UserId, difficulty: f64 },
    /// Reject the map.
    ForceDeny { verifier: UserId, reason: String },
    /// Reopen a decided playtest.
    Reset {
        verifier: UserId,
        reason: String,
        remove_votes: bool,
        remove_completions: bool,
    },
}

impl PlaytestCommand {
    /// Stable action name, used in errors and logs.
    pub fn action(&self) -> &'static str {
        match self {
            Self::CastVote { .. } => "cast_vote",
            Self::RemoveVote { .. } => "remove_vote",
            Self::Approve { .. } => "approve",
            Self::ForceAccept { .. } => "force_accept",
            Self::ForceDeny { .. } => "force_deny",
            Self::Reset { .. } => "reset",
        }
    }

    /// Whether this command is a verifier decision rather than a vote.
    pub fn is_decision(&self) -> bool {
        !matches!(self, Self::CastVote { .. } | Self::RemoveVote { .. })
    }
}

/// Difficulty a map is published with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedDifficulty {
    pub raw: f64,
    pub tier: DifficultyTier,
    pub label: String,
}

/// Emitted after a command succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaytestEvent {
    VoteCast {
        code: MapCode,
        thread_id: Option<ThreadId>,
        voter: UserId,
        value: f64,
    },
    VoteRemoved {
        code: MapCode,
        thread_id: Option<ThreadId>,
        voter: UserId,
    },
    Approved {
        code: MapCode,
        thread_id: Option<ThreadId>,
        verifier: UserId,
        creator_id: UserId,
        difficulty: FinalizedDifficulty,
    },
    ForceAccepted {
        code: MapCode,
        thread_id: Option<ThreadId>,
        verifier: UserId,
        creator_id: UserId,
        difficulty: FinalizedDifficulty,
    },
    ForceDenied {
        code: MapCode,
        thread_id: Option<ThreadId>,
        verifier: UserId,
        reason: String,
    },
    /// `remove_completions` asks the completion store to drop records
    /// submitted against the map; the state machine itself only owns votes.
    Reset {
        code: MapCode,
        thread_id: Option<ThreadId>,
        verifier: UserId,
        reason: String,
        remove_votes: bool,
        remove_completions: bool,
    },
}

impl PlaytestEvent {
    /// The map the event concerns.
    pub fn code(&self) -> &MapCode {
        match self {
            Self::VoteCast { code, .. }
            | Self::VoteRemoved { code, .. }
            | Self::Approved { code, .. }
            | Self::ForceAccepted { code, .. }
            | Self::ForceDenied { code, .. }
            | Self::Reset { code, .. } => code,
        }
    }

    /// Finalized difficulty if the event published the map.
    pub fn approval(&self) -> Option<&FinalizedDifficulty> {
        match self {
            Self::Approved { difficulty, .. } | Self::ForceAccepted { difficulty, .. } => {
                Some(difficulty)
            }
            _ => None,
        }
    }

    /// Whether the event records a verifier decision.
    pub fn is_decision(&self) -> bool {
        !matches!(self, Self::VoteCast { .. } | Self::VoteRemoved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_shape() {
        let cmd: PlaytestCommand =
            serde_json::from_str(r#"{"action":"cast_vote","voter":12,"value":5.5}"#).unwrap();
        assert_eq!(
            cmd,
            PlaytestCommand::CastVote {
                voter: UserId(12),
                value: 5.5
            }
        );
        assert_eq!(cmd.action(), "cast_vote");
        assert!(!cmd.is_decision());

        let cmd: PlaytestCommand = serde_json::from_str(
            r#"{"action":"reset","verifier":1,"reason":"redo","remove_votes":true,"remove_completions":false}"#,
        )
        .unwrap();
        assert!(cmd.is_decision());
        assert_eq!(cmd.action(), "reset");
    }

    #[test]
    fn test_event_approval_accessor() {
        let code = MapCode::new("ABCD").unwrap();
        let difficulty = FinalizedDifficulty {
            raw: 5.0,
            tier: DifficultyTier::Hard,
            label: "Hard".to_string(),
        };
        let approved = PlaytestEvent::ForceAccepted {
            code: code.clone(),
            thread_id: None,
            verifier: UserId(1),
            creator_id: UserId(2),
            difficulty: difficulty.clone(),
        };
        assert_eq!(approved.approval(), Some(&difficulty));
        assert!(approved.is_decision());

        let denied = PlaytestEvent::ForceDenied {
            code: code.clone(),
            thread_id: None,
            verifier: UserId(1),
            reason: "broken".into(),
        };
        assert_eq!(denied.approval(), None);
        assert_eq!(denied.code(), &code);
    }
}
