//! # Playtest Subcommand
//!
//! `genji playtest replay <file.json>` opens a fresh playtest and feeds it a
//! recorded command log through the review service, over in-memory stores.
//! Useful for reproducing a disputed review or trying a config change
//! against real history.
//!
//! ```json
//! {
//!   "code": "ABC12",
//!   "creator": 42,
//!   "initial_difficulty": 5.0,
//!   "commands": [
//!     { "action": "cast_vote", "voter": 7, "value": 5.2 },
//!     { "action": "approve", "verifier": 1 }
//!   ]
//! }
//! ```
//!
//! Rejected commands are reported and skipped, like the bot does.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

use gpk_core::{MapCode, ThreadId, UserId};
use gpk_review::{
    EngineConfig, LogNotifier, MemoryPlaytestStore, MemoryXpStore, MetricsSnapshot,
    ReviewOutcome, ReviewService, XpStore,
};
use gpk_state::{PlaytestCommand, PlaytestSnapshot};

/// Arguments for `genji playtest`.
#[derive(Args, Debug)]
pub struct PlaytestArgs {
    #[command(subcommand)]
    pub command: PlaytestSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PlaytestSubcommand {
    /// Replay a JSON command log against a fresh playtest.
    Replay {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Exit with status 1 if any command was rejected.
        #[arg(long)]
        strict: bool,
    },
}

/// A recorded playtest history.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayLog {
    pub code: MapCode,
    pub creator: UserId,
    pub initial_difficulty: f64,
    #[serde(default)]
    pub thread_id: Option<ThreadId>,
    pub commands: Vec<PlaytestCommand>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ReplayStep {
    Applied {
        index: usize,
        action: &'static str,
        outcome: ReviewOutcome,
    },
    Rejected {
        index: usize,
        action: &'static str,
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct UserXp {
    pub user_id: UserId,
    pub xp: u64,
    pub tier: String,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    pub rejected: usize,
    pub last: PlaytestSnapshot,
    pub xp: Vec<UserXp>,
    pub metrics: MetricsSnapshot,
}

/// Run `log` through a fresh review service.
pub fn replay(log: ReplayLog, config: &EngineConfig) -> Result<ReplayReport> {
    let xp_store = MemoryXpStore::new();
    let service = ReviewService::new(config, MemoryPlaytestStore::new(), xp_store.clone(), LogNotifier);
    service
        .open_playtest(log.code.clone(), log.creator, log.initial_difficulty, log.thread_id)
        .with_context(|| format!("cannot open playtest for {}", log.code))?;

    let mut steps = Vec::with_capacity(log.commands.len());
    let mut rejected = 0;
    for (index, command) in log.commands.into_iter().enumerate() {
        let action = command.action();
        match service.submit(&log.code, command) {
            Ok(outcome) => steps.push(ReplayStep::Applied {
                index,
                action,
                outcome,
            }),
            Err(err) => {
                rejected += 1;
                steps.push(ReplayStep::Rejected {
                    index,
                    action,
                    error: err.to_string(),
                });
            }
        }
    }

    let mut users: Vec<UserId> = xp_store.keys();
    users.sort();
    let mut xp = Vec::with_capacity(users.len());
    for user_id in users {
        let total = xp_store.load_xp(user_id)?;
        xp.push(UserXp {
            user_id,
            xp: total,
            tier: service.progression().state_of(total).tier_name(),
        });
    }

    Ok(ReplayReport {
        steps,
        rejected,
        last: service.snapshot(&log.code)?,
        xp,
        metrics: service.metrics().snapshot(),
    })
}

pub fn run_playtest(args: &PlaytestArgs, config: &EngineConfig) -> Result<u8> {
    match &args.command {
        PlaytestSubcommand::Replay { file, strict } => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read replay log: {}", file.display()))?;
            let log: ReplayLog = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse replay log: {}", file.display()))?;
            let report = replay(log, config)?;
            crate::print_json(&report)?;
            if *strict && report.rejected > 0 {
                tracing::warn!(rejected = report.rejected, "replay had rejected commands");
                return Ok(1);
            }
            Ok(0)
        }
    }
}
