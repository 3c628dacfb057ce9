//! # Ranking
//!
//! A leaderboard orders completions by time; equal times go to whoever
//! submitted first. A new submission is always later than every prior one,
//! so it ranks after all prior completions with the same time.

use chrono::{DateTime, Utc};
use gpk_core::UserId;
use serde::{Deserialize, Serialize};

use crate::medal::{Medal, MedalError, MedalThresholds};

/// A completion already on the board, supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorCompletion {
    pub user_id: UserId,
    pub time: f64,
    pub submitted_at: DateTime<Utc>,
}

/// Grade and placement of one new time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub medal: Option<Medal>,
    /// 1-based position on the board after insertion.
    pub rank: usize,
}

/// One row of a ranked board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCompletion {
    pub rank: usize,
    pub medal: Option<Medal>,
    pub completion: PriorCompletion,
}

fn check_time(time: f64) -> Result<f64, MedalError> {
    if time.is_finite() && time >= 0.0 {
        Ok(time)
    } else {
        Err(MedalError::InvalidTime { time })
    }
}

/// Grade `time` and compute the rank it would take among `prior`.
///
/// `prior` need not be sorted. Maps without thresholds award no medal.
pub fn evaluate(
    time: f64,
    thresholds: Option<&MedalThresholds>,
    prior: &[PriorCompletion],
) -> Result<Evaluation, MedalError> {
    let time = check_time(time)?;
    let ahead = prior.iter().filter(|p| p.time <= time).count();
    Ok(Evaluation {
        medal: thresholds.and_then(|t| t.medal_for(time)),
        rank: ahead + 1,
    })
}

/// Rank a whole board: by time, then by submission time. Every row gets a
/// distinct rank.
pub fn rank_all(
    completions: Vec<PriorCompletion>,
    thresholds: Option<&MedalThresholds>,
) -> Result<Vec<RankedCompletion>, MedalError> {
    for c in &completions {
        check_time(c.time)?;
    }
    let mut sorted = completions;
    sorted.sort_by(|a, b| {
        a.time
            .total_cmp(&b.time)
            .then_with(|| a.submitted_at.cmp(&b.submitted_at))
    });
    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(i, completion)| RankedCompletion {
            rank: i + 1,
            medal: thresholds.and_then(|t| t.medal_for(completion.time)),
            completion,
        })
        .collect())
}
