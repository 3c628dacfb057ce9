//! # Core Error Types
//!
//! Validation failures for the primitives defined in this crate. Higher-level
//! crates define their own `thiserror` enums and never reuse these variants
//! for their own preconditions.

use thiserror::Error;

/// Errors raised while constructing core primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A map code did not match `^[A-Z0-9]{4,6}$`.
    #[error("invalid map code {code:?}: {reason}")]
    InvalidMapCode {
        /// The rejected input.
        code: String,
        /// Which rule it broke.
        reason: &'static str,
    },
}
