//! # Review Service
//!
//! Orchestrates one playtest command end to end:
//!
//! 1. Apply the command to the stored playtest (atomically; nothing is
//!    saved if the state machine rejects it).
//! 2. On the first approval of a map, grant XP within the same update: the
//!    creator earns `Map Submission` XP and every voter with a live vote
//!    earns `Playtest` XP.
//! 3. Once committed, notify: verifier decisions and notable tier changes go to the
//!    [`Notifier`].
//!
//! The service holds no state of its own beyond the validated tables and
//! counters; everything durable lives behind the ports.

use gpk_completion::{
    evaluate, Evaluation, MedalDefaults, MedalError, MedalThresholds, PriorCompletion,
};
use gpk_core::{MapCode, ThreadId, UserId};
use gpk_progression::{
    ProgressionEngine, ProgressionError, ProgressionState, XpAmounts, XpGrant, XpGrantKind,
    XpGrantOutcome,
};
use gpk_scale::DifficultyScale;
use gpk_state::{
    Playtest, PlaytestCommand, PlaytestError, PlaytestEvent, PlaytestOutcome, PlaytestSnapshot,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::metrics::ReviewMetrics;
use crate::ports::{Notifier, PlaytestStore, StoreError, XpStore};

/// Any failure surfaced by the review service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewError {
    #[error(transparent)]
    Playtest(#[from] PlaytestError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Medal(#[from] MedalError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of one routed command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    #[serde(flatten)]
    pub outcome: PlaytestOutcome,
    /// XP granted because of this command (approvals only).
    pub grants: Vec<XpGrantOutcome>,
}

/// Playtest review orchestration over pluggable stores and notifier.
#[derive(Debug)]
pub struct ReviewService<P, X, N> {
    scale: DifficultyScale,
    progression: ProgressionEngine,
    xp_amounts: XpAmounts,
    medals: MedalDefaults,
    playtests: P,
    xp: X,
    notifier: N,
    metrics: ReviewMetrics,
}

impl<P, X, N> ReviewService<P, X, N>
where
    P: PlaytestStore,
    X: XpStore,
    N: Notifier,
{
    pub fn new(config: &EngineConfig, playtests: P, xp: X, notifier: N) -> Self {
        Self {
            scale: config.scale(),
            progression: config.progression_engine(),
            xp_amounts: config.xp,
            medals: config.medals.clone(),
            playtests,
            xp,
            notifier,
            metrics: ReviewMetrics::new(),
        }
    }

    pub fn scale(&self) -> &DifficultyScale {
        &self.scale
    }

    pub fn progression(&self) -> &ProgressionEngine {
        &self.progression
    }

    pub fn metrics(&self) -> &ReviewMetrics {
        &self.metrics
    }

    pub fn playtests(&self) -> &P {
        &self.playtests
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Open a playtest for a newly submitted map.
    pub fn open_playtest(
        &self,
        code: MapCode,
        creator_id: UserId,
        initial_difficulty: f64,
        thread_id: Option<ThreadId>,
    ) -> Result<PlaytestSnapshot, ReviewError> {
        let mut playtest = Playtest::new(&self.scale, code, creator_id, initial_difficulty)?;
        if let Some(thread_id) = thread_id {
            playtest = playtest.with_thread(thread_id);
        }
        let snapshot = playtest.snapshot(&self.scale);
        self.playtests.insert(playtest)?;
        tracing::info!(code = %snapshot.code, creator = %creator_id, initial_difficulty, "playtest opened");
        Ok(snapshot)
    }

    /// Current read model of a playtest.
    pub fn snapshot(&self, code: &MapCode) -> Result<PlaytestSnapshot, ReviewError> {
        Ok(self.playtests.load_playtest(code)?.snapshot(&self.scale))
    }

    /// Route one command to the playtest for `code`.
    ///
    /// Approval XP is granted inside the playtest update: if any grant
    /// fails, the grants already written are taken back and the playtest
    /// is left as it was, so the command can be retried. A map pays out
    /// approval XP once, however often it is reset and approved again.
    /// Notifications go out only after the update is committed.
    pub fn submit(
        &self,
        code: &MapCode,
        command: PlaytestCommand,
    ) -> Result<ReviewOutcome, ReviewError> {
        let action = command.action();
        let result = self.playtests.update_playtest(code, |playtest| {
            let outcome = playtest
                .apply(&self.scale, command)
                .map_err(ReviewError::from)?;
            let grants = match approval_creator(&outcome.event) {
                Some(creator_id) if !playtest.rewarded() => {
                    let grants = self.grant_approval_xp(creator_id, &outcome.snapshot.voters)?;
                    playtest.mark_rewarded();
                    grants
                }
                Some(_) => {
                    tracing::debug!(code = %code, "approval xp already granted for this map");
                    Vec::new()
                }
                None => Vec::new(),
            };
            Ok::<_, ReviewError>(ReviewOutcome { outcome, grants })
        });
        let review = match result {
            Ok(review) => review,
            Err(err) => {
                ReviewMetrics::incr(&self.metrics.rejected_commands);
                tracing::warn!(code = %code, action, error = %err, "playtest command rejected");
                return Err(err);
            }
        };

        match &review.outcome.event {
            PlaytestEvent::VoteCast { .. } => ReviewMetrics::incr(&self.metrics.votes_cast),
            PlaytestEvent::VoteRemoved { .. } => ReviewMetrics::incr(&self.metrics.votes_removed),
            event => {
                ReviewMetrics::incr(&self.metrics.decisions);
                tracing::info!(
                    code = %code,
                    action,
                    status = %review.outcome.snapshot.status,
                    finalized = ?event.approval().map(|d| d.label.as_str()),
                    "playtest decided"
                );
                self.notifier.playtest_decided(event);
            }
        }
        for grant in &review.grants {
            self.announce_grant(grant);
        }

        Ok(review)
    }

    /// Creator XP first, then one `Playtest` grant per live voter. All or
    /// nothing: a failure reverts the grants written before it.
    fn grant_approval_xp(
        &self,
        creator_id: UserId,
        voters: &[UserId],
    ) -> Result<Vec<XpGrantOutcome>, ReviewError> {
        let mut pending = Vec::with_capacity(voters.len() + 1);
        pending.push(XpGrant::standard(creator_id, XpGrantKind::MapSubmission, &self.xp_amounts)?);
        for voter in voters {
            pending.push(XpGrant::standard(*voter, XpGrantKind::Playtest, &self.xp_amounts)?);
        }

        let mut applied = Vec::with_capacity(pending.len());
        for grant in &pending {
            match self.apply_grant(grant) {
                Ok(outcome) => applied.push(outcome),
                Err(err) => {
                    self.revert_grants(&applied);
                    return Err(err);
                }
            }
        }
        Ok(applied)
    }

    fn apply_grant(&self, grant: &XpGrant) -> Result<XpGrantOutcome, ReviewError> {
        self.xp.update_xp(grant.user_id, |previous| {
            let outcome = self.progression.grant(previous, grant)?;
            Ok::<_, ReviewError>((outcome.new_amount, outcome))
        })
    }

    fn revert_grants(&self, applied: &[XpGrantOutcome]) {
        for outcome in applied.iter().rev() {
            let reverted: Result<(), StoreError> = self.xp.update_xp(outcome.user_id, |total| {
                Ok((total.saturating_sub(outcome.amount), ()))
            });
            if let Err(err) = reverted {
                tracing::error!(
                    user = %outcome.user_id,
                    amount = outcome.amount,
                    error = %err,
                    "could not revert xp grant"
                );
            }
        }
    }

    fn announce_grant(&self, outcome: &XpGrantOutcome) {
        self.metrics.record_grant(outcome.amount);
        tracing::debug!(
            user = %outcome.user_id,
            kind = %outcome.kind,
            amount = outcome.amount,
            total = outcome.new_amount,
            "xp granted"
        );
        if outcome.change.is_notable() {
            self.notifier.tier_changed(outcome.user_id, &outcome.change);
        }
    }

    /// Add XP to one user's stored total and announce any tier change.
    pub fn grant_xp(&self, grant: &XpGrant) -> Result<XpGrantOutcome, ReviewError> {
        let outcome = self.apply_grant(grant)?;
        self.announce_grant(&outcome);
        Ok(outcome)
    }

    /// Tier position of a user's stored XP.
    pub fn progression_of(&self, user_id: UserId) -> Result<ProgressionState, ReviewError> {
        Ok(self.progression.state_of(self.xp.load_xp(user_id)?))
    }

    /// Grade a completion on `code` and rank it against `prior`.
    ///
    /// Maps without thresholds of their own fall back to the configured
    /// defaults for their finalized tier; maps that are not yet approved
    /// have no tier to fall back on.
    pub fn evaluate_completion(
        &self,
        code: &MapCode,
        time: f64,
        map_thresholds: Option<&MedalThresholds>,
        prior: &[PriorCompletion],
    ) -> Result<Evaluation, ReviewError> {
        let playtest = self.playtests.load_playtest(code)?;
        let thresholds = match playtest.finalized() {
            Some(finalized) => self.medals.resolve(map_thresholds, finalized.tier),
            None => map_thresholds,
        };
        Ok(evaluate(time, thresholds, prior)?)
    }
}

fn approval_creator(event: &PlaytestEvent) -> Option<UserId> {
    match event {
        PlaytestEvent::Approved { creator_id, .. }
        | PlaytestEvent::ForceAccepted { creator_id, .. } => Some(*creator_id),
        _ => None,
    }
}
