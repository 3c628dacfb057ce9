//! # Config Subcommand
//!
//! `genji config check` loads the engine config the same way every other
//! subcommand does and prints a summary of the validated tables. Loading
//! itself is the validation; a config that fails never reaches this point.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use gpk_progression::XpAmounts;
use gpk_review::EngineConfig;
use gpk_scale::{DifficultyTier, VoteRequirements};

/// Arguments for `genji config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the config and print a summary.
    Check {
        /// Print the full effective config as YAML instead of a summary.
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub valid: bool,
    pub labels: Vec<String>,
    pub required_votes: VoteRequirements,
    pub main_tiers: usize,
    pub sub_tiers: usize,
    pub sub_tier_xp: u64,
    pub cycle_xp: u64,
    pub xp: XpAmounts,
    pub medal_default_tiers: Vec<DifficultyTier>,
}

pub fn summarize(config: &EngineConfig) -> ConfigSummary {
    let ladder = &config.progression;
    ConfigSummary {
        valid: true,
        labels: config
            .difficulty
            .bands()
            .iter()
            .map(|b| b.label.clone())
            .collect(),
        required_votes: *config.difficulty.required_votes(),
        main_tiers: ladder.main_tiers().len(),
        sub_tiers: ladder.sub_tiers().len(),
        sub_tier_xp: ladder.sub_tier_xp(),
        cycle_xp: ladder.cycle_xp(),
        xp: config.xp,
        medal_default_tiers: DifficultyTier::all()
            .iter()
            .copied()
            .filter(|tier| config.medals.for_tier(*tier).is_some())
            .collect(),
    }
}

pub fn run_config(args: &ConfigArgs, config: &EngineConfig) -> Result<u8> {
    match args.command {
        ConfigCommand::Check { show: true } => print!("{}", serde_yaml::to_string(config)?),
        ConfigCommand::Check { show: false } => crate::print_json(&summarize(config))?,
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_defaults() {
        let summary = summarize(&EngineConfig::default());
        assert!(summary.valid);
        assert_eq!(summary.labels.len(), 16);
        assert_eq!(summary.labels[0], "Easy -");
        assert_eq!(summary.cycle_xp, 10_000);
        assert_eq!(summary.main_tiers, 20);
        assert_eq!(summary.required_votes.hell, 1);
        assert!(summary.medal_default_tiers.is_empty());
    }
}
