//! # gpk-scale: Difficulty Scale
//!
//! Maps continuous playtest votes onto the categorical difficulties a map is
//! published under, and back.
//!
//! - **Tiers** (`tier.rs`): the six top-level buckets, `Easy` through `Hell`.
//! - **Table** (`table.rs`): the ordered `(label, range, tier)` rows and the
//!   per-tier vote requirements, validated once when loaded.
//! - **Scale** (`scale.rs`): `top_level_of`, `extended_of`, `midpoint_of`,
//!   `required_vote_count`.
//!
//! Ranges are lower-inclusive and upper-exclusive; the final band is closed,
//! so `10.0` is `Hell`.

pub mod error;
pub mod scale;
pub mod table;
pub mod tier;

pub use error::{ScaleError, TableError};
pub use scale::{Classification, DifficultyRef, DifficultyScale};
pub use table::{DifficultyTable, LabelBand, ScaleRange, VoteRequirements, SCALE_MAX, SCALE_MIN};
pub use tier::{DifficultyTier, DIFFICULTY_TIER_COUNT};
