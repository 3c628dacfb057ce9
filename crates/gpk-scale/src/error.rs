//! # Scale Errors
//!
//! Lookup failures (`ScaleError`) are caller-input errors raised at query
//! time. Table failures (`TableError`) are raised once, when a band table is
//! loaded, and mean the configuration itself is unusable.

use thiserror::Error;

use crate::tier::DifficultyTier;

/// Errors raised when querying the difficulty scale.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// Raw difficulty outside `[0, 10]` (or not a finite number).
    #[error("difficulty {value} is outside the scale [{min}, {max}]")]
    OutOfRange {
        /// The rejected value.
        value: f64,
        /// Lower bound of the scale.
        min: f64,
        /// Upper bound of the scale.
        max: f64,
    },

    /// No band carries the requested label.
    #[error("unknown difficulty label {label:?}")]
    UnknownLabel {
        /// The label that was looked up.
        label: String,
    },

    /// A tier name did not match any top-level tier.
    #[error("unknown difficulty tier {name:?}")]
    UnknownTier {
        /// The name that was parsed.
        name: String,
    },
}

/// Errors raised while validating a band table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// The table has no bands.
    #[error("difficulty table has no bands")]
    Empty,

    /// A band bound is NaN or infinite.
    #[error("band {label:?} has a non-finite bound")]
    NonFinite {
        /// Offending band.
        label: String,
    },

    /// The first band does not start at the bottom of the scale.
    #[error("first band starts at {lower}, expected {expected}")]
    BadStart {
        /// Actual lower bound.
        lower: f64,
        /// Required lower bound.
        expected: f64,
    },

    /// The last band does not end at the top of the scale.
    #[error("last band ends at {upper}, expected {expected}")]
    BadEnd {
        /// Actual upper bound.
        upper: f64,
        /// Required upper bound.
        expected: f64,
    },

    /// A band's upper bound is not above its lower bound.
    #[error("band {label:?} is empty: [{lower}, {upper})")]
    EmptyBand {
        /// Offending band.
        label: String,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },

    /// Two adjacent bands leave a gap or overlap.
    #[error("band {next:?} starts at {next_lower} but {previous:?} ends at {previous_upper}")]
    NotContiguous {
        /// Earlier band.
        previous: String,
        /// Its upper bound.
        previous_upper: f64,
        /// Later band.
        next: String,
        /// Its lower bound.
        next_lower: f64,
    },

    /// A band's parent tier ranks below the tier of the band before it.
    #[error("band {label:?} belongs to {tier} which is out of rank order")]
    TierOutOfOrder {
        /// Offending band.
        label: String,
        /// Its parent tier.
        tier: DifficultyTier,
    },

    /// A tier has no bands at all.
    #[error("tier {tier} has no bands")]
    MissingTier {
        /// The uncovered tier.
        tier: DifficultyTier,
    },

    /// Two bands share the same label.
    #[error("duplicate band label {label:?}")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },

    /// A tier requires zero votes, which would approve with no data.
    #[error("tier {tier} must require at least one vote")]
    ZeroVoteRequirement {
        /// Offending tier.
        tier: DifficultyTier,
    },
}
