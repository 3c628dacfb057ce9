//! # genji CLI entry point
//!
//! Parses command-line arguments, loads the engine config once, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gpk_cli::classify::{
    run_difficulty, run_midpoint, run_xp, DifficultyArgs, MidpointArgs, XpArgs,
};
use gpk_cli::config::{run_config, ConfigArgs};
use gpk_cli::medal::{run_medal, MedalArgs};
use gpk_cli::playtest::{run_playtest, PlaytestArgs};
use gpk_review::EngineConfig;

/// Genji Parkour review and progression engine.
///
/// Classifies difficulties and XP totals, grades completion times, checks
/// engine configuration, and replays playtest command logs.
#[derive(Parser, Debug)]
#[command(name = "genji", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the engine config (YAML). Defaults to $GENJI_CONFIG, then to
    /// the built-in tables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tier, label and vote requirement of a raw difficulty value.
    Difficulty(DifficultyArgs),

    /// Canonical raw value of a label or tier.
    Midpoint(MidpointArgs),

    /// Progression tier classification.
    Xp(XpArgs),

    /// Medal and rank of a completion time.
    Medal(MedalArgs),

    /// Engine configuration checks.
    Config(ConfigArgs),

    /// Playtest review tools.
    Playtest(PlaytestArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "genji CLI starting");

    let config = match EngineConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    let result = match &cli.command {
        Commands::Difficulty(args) => run_difficulty(args, &config),
        Commands::Midpoint(args) => run_midpoint(args, &config),
        Commands::Xp(args) => run_xp(args, &config),
        Commands::Medal(args) => run_medal(args, &config),
        Commands::Config(args) => run_config(args, &config),
        Commands::Playtest(args) => run_playtest(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
