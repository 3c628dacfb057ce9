//! # Medal Subcommand
//!
//! Grades a completion time and ranks it against prior times on the same
//! map. Prior times are taken in submission order.

use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use clap::Args;

use gpk_completion::{evaluate, Evaluation, MedalThresholds, PriorCompletion};
use gpk_core::UserId;
use gpk_review::EngineConfig;
use gpk_scale::DifficultyTier;

/// Arguments for `genji medal`.
#[derive(Args, Debug)]
pub struct MedalArgs {
    /// Completion time in seconds.
    #[arg(long, allow_hyphen_values = true)]
    pub time: f64,

    /// Gold threshold (requires --silver and --bronze).
    #[arg(long)]
    pub gold: Option<f64>,

    #[arg(long)]
    pub silver: Option<f64>,

    #[arg(long)]
    pub bronze: Option<f64>,

    /// Use the configured default thresholds for this tier when no explicit
    /// thresholds are given.
    #[arg(long)]
    pub tier: Option<DifficultyTier>,

    /// Prior completion times, earliest submission first.
    #[arg(long = "prior", value_delimiter = ',')]
    pub prior: Vec<f64>,
}

fn explicit_thresholds(args: &MedalArgs) -> Result<Option<MedalThresholds>> {
    match (args.gold, args.silver, args.bronze) {
        (Some(gold), Some(silver), Some(bronze)) => {
            Ok(Some(MedalThresholds::new(gold, silver, bronze)?))
        }
        (None, None, None) => Ok(None),
        _ => bail!("--gold, --silver and --bronze must be given together"),
    }
}

pub fn medal_report(args: &MedalArgs, config: &EngineConfig) -> Result<Evaluation> {
    let explicit = explicit_thresholds(args)?;
    let thresholds = match (explicit.as_ref(), args.tier) {
        (Some(own), _) => Some(own),
        (None, Some(tier)) => config.medals.for_tier(tier),
        (None, None) => None,
    };
    if thresholds.is_none() {
        tracing::debug!("no medal thresholds in effect");
    }

    let base = Utc::now();
    let prior: Vec<PriorCompletion> = args
        .prior
        .iter()
        .enumerate()
        .map(|(i, &time)| PriorCompletion {
            user_id: UserId(i as u64),
            time,
            submitted_at: base + Duration::seconds(i as i64),
        })
        .collect();

    Ok(evaluate(args.time, thresholds, &prior)?)
}

pub fn run_medal(args: &MedalArgs, config: &EngineConfig) -> Result<u8> {
    crate::print_json(&medal_report(args, config)?)?;
    Ok(0)
}
