//! # Engine Configuration
//!
//! One YAML document supplies every table the engine needs. Each section
//! falls back to the built-in defaults, so an empty file (or no file) is a
//! valid configuration:
//!
//! ```yaml
//! difficulty:
//!   bands:
//!     - { label: "Easy -", tier: Easy, lower: 0.0, upper: 1.18 }
//!     # ...
//!   required_votes: { very_hard: 3 }
//! progression:
//!   sub_tier_xp: 100
//! xp:
//!   playtest: 35
//! medals:
//!   Hell: { gold: 300, silver: 400, bronze: 500 }
//! ```
//!
//! Tables are validated while they are parsed; a config that loads is a
//! config that is safe to serve.
//!
//! If `GENJI_CONFIG` is unset, [`EngineConfig::from_env`] returns the
//! defaults.

use std::path::{Path, PathBuf};

use gpk_completion::MedalDefaults;
use gpk_progression::{ProgressionEngine, TierLadder, XpAmounts};
use gpk_scale::{DifficultyScale, DifficultyTable};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "GENJI_CONFIG";

/// Errors while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found at the given path.
    #[error("config file not found: {path}")]
    NotFound { path: String },

    /// The file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax error, or a table that failed validation.
    #[error("invalid config {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Every table the engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: DifficultyTable,
    pub progression: TierLadder,
    pub xp: XpAmounts,
    pub medals: MedalDefaults,
}

impl EngineConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::NotFound { path: shown });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        let config = Self::from_yaml_str(&content).map_err(|source| ConfigError::Invalid {
            path: shown.clone(),
            source,
        })?;
        tracing::info!(
            path = %shown,
            bands = config.difficulty.bands().len(),
            main_tiers = config.progression.main_tiers().len(),
            medal_defaults = !config.medals.is_empty(),
            "loaded engine config"
        );
        Ok(config)
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load from `$GENJI_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load(&PathBuf::from(path)),
            Err(_) => {
                tracing::info!("{CONFIG_ENV_VAR} not set, using built-in tables");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path` if given, else from the environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::from_env(),
        }
    }

    /// Scale over the configured band table.
    pub fn scale(&self) -> DifficultyScale {
        DifficultyScale::new(self.difficulty.clone())
    }

    /// Engine over the configured ladder.
    pub fn progression_engine(&self) -> ProgressionEngine {
        ProgressionEngine::new(self.progression.clone())
    }
}
