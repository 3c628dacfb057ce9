//! # Classification Subcommands
//!
//! `difficulty`, `midpoint` and `xp`: direct queries against the configured
//! scale and ladder.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use gpk_progression::{ProgressionState, TierChangeRecord};
use gpk_review::EngineConfig;
use gpk_scale::{DifficultyRef, DifficultyTier, ScaleRange};

/// Arguments for `genji difficulty`.
#[derive(Args, Debug)]
pub struct DifficultyArgs {
    /// Raw difficulty value in [0, 10].
    #[arg(allow_hyphen_values = true)]
    pub raw: f64,
}

/// Arguments for `genji midpoint`.
#[derive(Args, Debug)]
pub struct MidpointArgs {
    /// Extended label (e.g. "Hard +"), or a tier name with --tier.
    pub name: String,

    /// Treat NAME as a top-level tier rather than a label.
    #[arg(long)]
    pub tier: bool,
}

/// Arguments for `genji xp`.
#[derive(Args, Debug)]
pub struct XpArgs {
    #[command(subcommand)]
    pub command: XpCommand,
}

#[derive(Subcommand, Debug)]
pub enum XpCommand {
    /// Tier, sub-tier and prestige level of an XP total.
    Classify {
        #[arg(allow_hyphen_values = true)]
        xp: i64,
    },
    /// Rank change between two XP totals.
    Diff {
        #[arg(allow_hyphen_values = true)]
        old: i64,
        #[arg(allow_hyphen_values = true)]
        new: i64,
    },
}

#[derive(Debug, Serialize)]
pub struct DifficultyReport {
    pub raw: f64,
    pub tier: DifficultyTier,
    pub label: String,
    pub tier_range: ScaleRange,
    pub required_votes: u32,
}

#[derive(Debug, Serialize)]
pub struct MidpointReport {
    pub name: String,
    pub midpoint: f64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum XpReport {
    State(ProgressionState),
    Change(TierChangeRecord),
}

pub fn difficulty_report(args: &DifficultyArgs, config: &EngineConfig) -> Result<DifficultyReport> {
    let scale = config.scale();
    let classification = scale.classify(args.raw)?;
    Ok(DifficultyReport {
        raw: classification.raw,
        tier: classification.tier,
        tier_range: scale.range_of(classification.tier)?,
        required_votes: scale.required_vote_count(classification.tier),
        label: classification.label,
    })
}

pub fn midpoint_report(args: &MidpointArgs, config: &EngineConfig) -> Result<MidpointReport> {
    let scale = config.scale();
    let difficulty = if args.tier {
        DifficultyRef::Tier(args.name.parse()?)
    } else {
        DifficultyRef::Label(&args.name)
    };
    Ok(MidpointReport {
        name: args.name.clone(),
        midpoint: scale.midpoint_of(difficulty)?,
    })
}

pub fn xp_report(args: &XpArgs, config: &EngineConfig) -> Result<XpReport> {
    let engine = config.progression_engine();
    Ok(match args.command {
        XpCommand::Classify { xp } => XpReport::State(engine.classify(xp)?),
        XpCommand::Diff { old, new } => XpReport::Change(engine.diff(old, new)?),
    })
}

pub fn run_difficulty(args: &DifficultyArgs, config: &EngineConfig) -> Result<u8> {
    crate::print_json(&difficulty_report(args, config)?)?;
    Ok(0)
}

pub fn run_midpoint(args: &MidpointArgs, config: &EngineConfig) -> Result<u8> {
    crate::print_json(&midpoint_report(args, config)?)?;
    Ok(0)
}

pub fn run_xp(args: &XpArgs, config: &EngineConfig) -> Result<u8> {
    crate::print_json(&xp_report(args, config)?)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpk_progression::RankChangeType;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn difficulty_report_for_hard_plus() {
        let report = difficulty_report(&DifficultyArgs { raw: 5.5 }, &config()).unwrap();
        assert_eq!(report.tier, DifficultyTier::Hard);
        assert_eq!(report.label, "Hard +");
        assert_eq!(report.required_votes, 5);
        assert_eq!(report.tier_range.lower, 4.12);
    }

    #[test]
    fn difficulty_report_rejects_out_of_range() {
        assert!(difficulty_report(&DifficultyArgs { raw: 10.5 }, &config()).is_err());
    }

    #[test]
    fn midpoint_label_and_tier() {
        let label = MidpointArgs {
            name: "Hell".into(),
            tier: false,
        };
        let by_label = midpoint_report(&label, &config()).unwrap();
        let tier = MidpointArgs {
            name: "Hell".into(),
            tier: true,
        };
        let by_tier = midpoint_report(&tier, &config()).unwrap();
        assert!((by_label.midpoint - 9.705).abs() < 1e-9);
        assert_eq!(by_label.midpoint, by_tier.midpoint);

        let unknown = MidpointArgs {
            name: "Impossible".into(),
            tier: false,
        };
        assert!(midpoint_report(&unknown, &config()).is_err());
    }

    #[test]
    fn xp_reports() {
        let classify = XpArgs {
            command: XpCommand::Classify { xp: 10_250 },
        };
        match xp_report(&classify, &config()).unwrap() {
            XpReport::State(s) => {
                assert_eq!(s.prestige_level, 1);
                assert_eq!(s.tier_name(), "Newcomer III");
            }
            other => panic!("unexpected report {other:?}"),
        }

        let diff = XpArgs {
            command: XpCommand::Diff { old: 490, new: 510 },
        };
        match xp_report(&diff, &config()).unwrap() {
            XpReport::Change(c) => assert_eq!(c.rank_change_type, RankChangeType::MainTierRankUp),
            other => panic!("unexpected report {other:?}"),
        }

        let negative = XpArgs {
            command: XpCommand::Classify { xp: -1 },
        };
        assert!(xp_report(&negative, &config()).is_err());
    }
}
