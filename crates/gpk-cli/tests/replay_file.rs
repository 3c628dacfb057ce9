//! File-driven CLI flows: config files and replay logs on disk.

use gpk_cli::config::{run_config, summarize, ConfigArgs, ConfigCommand};
use gpk_cli::playtest::{run_playtest, PlaytestArgs, PlaytestSubcommand};
use gpk_review::EngineConfig;

const LOG: &str = r#"{
    "code": "KR7Q2",
    "creator": 5,
    "initial_difficulty": 6.0,
    "thread_id": 1234,
    "commands": [
        {"action": "cast_vote", "voter": 11, "value": 6.1},
        {"action": "cast_vote", "voter": 12, "value": 6.3},
        {"action": "cast_vote", "voter": 11, "value": 6.2},
        {"action": "force_deny", "verifier": 2, "reason": ""},
        {"action": "approve", "verifier": 2}
    ]
}"#;

fn replay_args(path: std::path::PathBuf, strict: bool) -> PlaytestArgs {
    PlaytestArgs {
        command: PlaytestSubcommand::Replay { file: path, strict },
    }
}

#[test]
fn replay_log_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    std::fs::write(&path, LOG).unwrap();

    let config = EngineConfig::default();
    assert_eq!(run_playtest(&replay_args(path.clone(), false), &config).unwrap(), 0);
    // The empty deny reason is rejected, so strict mode fails.
    assert_eq!(run_playtest(&replay_args(path, true), &config).unwrap(), 1);
}

#[test]
fn replay_missing_or_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default();
    assert!(run_playtest(&replay_args(dir.path().join("absent.json"), false), &config).is_err());

    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{\"code\": \"x\"}").unwrap();
    assert!(run_playtest(&replay_args(path, false), &config).is_err());
}

#[test]
fn config_check_on_custom_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("genji.yaml");
    std::fs::write(
        &path,
        "progression:\n  sub_tier_xp: 200\nmedals:\n  Hard: { gold: 60, silver: 90, bronze: 120 }\n",
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    let summary = summarize(&config);
    assert_eq!(summary.cycle_xp, 20_000);
    assert_eq!(summary.medal_default_tiers.len(), 1);

    let args = ConfigArgs {
        command: ConfigCommand::Check { show: false },
    };
    assert_eq!(run_config(&args, &config).unwrap(), 0);
}
