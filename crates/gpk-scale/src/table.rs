//! # Difficulty Band Table
//!
//! One ordered table of `(label, lower, upper, tier)` rows plus the
//! per-tier playtest vote requirements. The table is the only place the
//! scale's boundaries are written down; the tier ranges are derived from it.
//!
//! ## Boundary Convention
//!
//! Every band is lower-inclusive and upper-exclusive, except the last band
//! of the table which is closed on both ends so that `10.0` is a valid
//! difficulty (it belongs to `Hell`).
//!
//! ## Validation
//!
//! A table is checked once, at construction or deserialization:
//!
//! - the first band starts at [`SCALE_MIN`] and the last ends at [`SCALE_MAX`],
//! - each band's upper bound equals the next band's lower bound,
//! - bands are grouped by tier in rank order and every tier has a band,
//! - labels are unique and every tier requires at least one vote.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TableError;
use crate::tier::DifficultyTier;

/// Bottom of the raw difficulty scale.
pub const SCALE_MIN: f64 = 0.0;
/// Top of the raw difficulty scale.
pub const SCALE_MAX: f64 = 10.0;

const DEFAULT_BANDS: &[(&str, DifficultyTier, f64, f64)] = &[
    ("Easy -", DifficultyTier::Easy, 0.0, 1.18),
    ("Easy", DifficultyTier::Easy, 1.18, 1.76),
    ("Easy +", DifficultyTier::Easy, 1.76, 2.35),
    ("Medium -", DifficultyTier::Medium, 2.35, 2.94),
    ("Medium", DifficultyTier::Medium, 2.94, 3.53),
    ("Medium +", DifficultyTier::Medium, 3.53, 4.12),
    ("Hard -", DifficultyTier::Hard, 4.12, 4.71),
    ("Hard", DifficultyTier::Hard, 4.71, 5.29),
    ("Hard +", DifficultyTier::Hard, 5.29, 5.88),
    ("Very Hard -", DifficultyTier::VeryHard, 5.88, 6.47),
    ("Very Hard", DifficultyTier::VeryHard, 6.47, 7.06),
    ("Very Hard +", DifficultyTier::VeryHard, 7.06, 7.65),
    ("Extreme -", DifficultyTier::Extreme, 7.65, 8.24),
    ("Extreme", DifficultyTier::Extreme, 8.24, 8.82),
    ("Extreme +", DifficultyTier::Extreme, 8.82, 9.41),
    ("Hell", DifficultyTier::Hell, 9.41, 10.0),
];

/// A numeric interval on the difficulty scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub lower: f64,
    pub upper: f64,
    /// True only for the range that ends at [`SCALE_MAX`].
    pub upper_inclusive: bool,
}

impl ScaleRange {
    fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            upper_inclusive: upper == SCALE_MAX,
        }
    }

    /// Whether `raw` falls inside the range under the boundary convention.
    pub fn contains(&self, raw: f64) -> bool {
        raw >= self.lower && (raw < self.upper || (self.upper_inclusive && raw == self.upper))
    }

    /// Canonical representative value of the range.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// One extended difficulty label and the slice of the scale it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelBand {
    /// Extended label, e.g. `"Very Hard +"`.
    pub label: String,
    /// Top-level tier the label is nested in.
    pub tier: DifficultyTier,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound (inclusive for the final band).
    pub upper: f64,
}

impl LabelBand {
    /// The band's interval.
    pub fn range(&self) -> ScaleRange {
        ScaleRange::new(self.lower, self.upper)
    }
}

/// Number of playtest votes each tier needs before a map is eligible for
/// approval. Harder tiers need fewer because qualified voters are scarcer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteRequirements {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub very_hard: u32,
    pub extreme: u32,
    pub hell: u32,
}

impl VoteRequirements {
    /// Required vote count for `tier`.
    pub fn for_tier(&self, tier: DifficultyTier) -> u32 {
        match tier {
            DifficultyTier::Easy => self.easy,
            DifficultyTier::Medium => self.medium,
            DifficultyTier::Hard => self.hard,
            DifficultyTier::VeryHard => self.very_hard,
            DifficultyTier::Extreme => self.extreme,
            DifficultyTier::Hell => self.hell,
        }
    }
}

impl Default for VoteRequirements {
    fn default() -> Self {
        Self {
            easy: 5,
            medium: 5,
            hard: 5,
            very_hard: 3,
            extreme: 2,
            hell: 1,
        }
    }
}

/// Validated band table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDifficultyTable")]
pub struct DifficultyTable {
    bands: Vec<LabelBand>,
    required_votes: VoteRequirements,
}

/// Unvalidated shape accepted from configuration files.
#[derive(Debug, Deserialize)]
struct RawDifficultyTable {
    #[serde(default = "default_bands")]
    bands: Vec<LabelBand>,
    #[serde(default)]
    required_votes: VoteRequirements,
}

impl TryFrom<RawDifficultyTable> for DifficultyTable {
    type Error = TableError;

    fn try_from(raw: RawDifficultyTable) -> Result<Self, Self::Error> {
        Self::new(raw.bands, raw.required_votes)
    }
}

fn default_bands() -> Vec<LabelBand> {
    DEFAULT_BANDS
        .iter()
        .map(|&(label, tier, lower, upper)| LabelBand {
            label: label.to_string(),
            tier,
            lower,
            upper,
        })
        .collect()
}

impl DifficultyTable {
    /// Validate and build a table.
    pub fn new(
        bands: Vec<LabelBand>,
        required_votes: VoteRequirements,
    ) -> Result<Self, TableError> {
        validate(&bands, &required_votes)?;
        Ok(Self {
            bands,
            required_votes,
        })
    }

    /// All bands in scale order.
    pub fn bands(&self) -> &[LabelBand] {
        &self.bands
    }

    /// The vote requirement table.
    pub fn required_votes(&self) -> &VoteRequirements {
        &self.required_votes
    }

    /// Range covered by all bands of `tier`.
    pub fn tier_range(&self, tier: DifficultyTier) -> Option<ScaleRange> {
        let mut bands = self.bands.iter().filter(|b| b.tier == tier);
        let first = bands.next()?;
        let upper = bands.last().map_or(first.upper, |b| b.upper);
        Some(ScaleRange::new(first.lower, upper))
    }
}

impl Default for DifficultyTable {
    /// The built-in table (16 labels over six tiers).
    fn default() -> Self {
        Self {
            bands: default_bands(),
            required_votes: VoteRequirements::default(),
        }
    }
}

fn validate(bands: &[LabelBand], votes: &VoteRequirements) -> Result<(), TableError> {
    let (first, last) = match (bands.first(), bands.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(TableError::Empty),
    };

    let mut labels = HashSet::new();
    for band in bands {
        if !band.lower.is_finite() || !band.upper.is_finite() {
            return Err(TableError::NonFinite {
                label: band.label.clone(),
            });
        }
        if band.upper <= band.lower {
            return Err(TableError::EmptyBand {
                label: band.label.clone(),
                lower: band.lower,
                upper: band.upper,
            });
        }
        if !labels.insert(band.label.as_str()) {
            return Err(TableError::DuplicateLabel {
                label: band.label.clone(),
            });
        }
    }

    if first.lower != SCALE_MIN {
        return Err(TableError::BadStart {
            lower: first.lower,
            expected: SCALE_MIN,
        });
    }
    if last.upper != SCALE_MAX {
        return Err(TableError::BadEnd {
            upper: last.upper,
            expected: SCALE_MAX,
        });
    }

    for pair in bands.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        if previous.upper != next.lower {
            return Err(TableError::NotContiguous {
                previous: previous.label.clone(),
                previous_upper: previous.upper,
                next: next.label.clone(),
                next_lower: next.lower,
            });
        }
        if next.tier < previous.tier {
            return Err(TableError::TierOutOfOrder {
                label: next.label.clone(),
                tier: next.tier,
            });
        }
    }

    for &tier in DifficultyTier::all() {
        if !bands.iter().any(|b| b.tier == tier) {
            return Err(TableError::MissingTier { tier });
        }
        if votes.for_tier(tier) == 0 {
            return Err(TableError::ZeroVoteRequirement { tier });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(label: &str, tier: DifficultyTier, lower: f64, upper: f64) -> LabelBand {
        LabelBand {
            label: label.to_string(),
            tier,
            lower,
            upper,
        }
    }

    fn coarse_bands() -> Vec<LabelBand> {
        vec![
            band("Easy", DifficultyTier::Easy, 0.0, 2.0),
            band("Medium", DifficultyTier::Medium, 2.0, 4.0),
            band("Hard", DifficultyTier::Hard, 4.0, 6.0),
            band("Very Hard", DifficultyTier::VeryHard, 6.0, 7.5),
            band("Extreme", DifficultyTier::Extreme, 7.5, 9.0),
            band("Hell", DifficultyTier::Hell, 9.0, 10.0),
        ]
    }

    #[test]
    fn test_default_table_is_valid() {
        let table = DifficultyTable::default();
        let rebuilt =
            DifficultyTable::new(table.bands().to_vec(), *table.required_votes()).unwrap();
        assert_eq!(rebuilt, table);
        assert_eq!(table.bands().len(), 16);
    }

    #[test]
    fn test_default_tier_ranges_are_contiguous() {
        let table = DifficultyTable::default();
        let ranges: Vec<ScaleRange> = DifficultyTier::all()
            .iter()
            .map(|t| table.tier_range(*t).unwrap())
            .collect();
        assert_eq!(ranges[0].lower, SCALE_MIN);
        assert_eq!(ranges[5].upper, SCALE_MAX);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
        assert!(ranges[5].upper_inclusive);
        assert!(!ranges[4].upper_inclusive);
    }

    #[test]
    fn test_default_vote_requirements() {
        let votes = VoteRequirements::default();
        assert_eq!(votes.for_tier(DifficultyTier::Easy), 5);
        assert_eq!(votes.for_tier(DifficultyTier::Medium), 5);
        assert_eq!(votes.for_tier(DifficultyTier::Hard), 5);
        assert_eq!(votes.for_tier(DifficultyTier::VeryHard), 3);
        assert_eq!(votes.for_tier(DifficultyTier::Extreme), 2);
        assert_eq!(votes.for_tier(DifficultyTier::Hell), 1);
    }

    #[test]
    fn test_range_contains_boundaries() {
        let half_open = ScaleRange::new(2.0, 4.0);
        assert!(half_open.contains(2.0));
        assert!(half_open.contains(3.999));
        assert!(!half_open.contains(4.0));
        let closed = ScaleRange::new(9.0, 10.0);
        assert!(closed.contains(10.0));
        assert!(!closed.contains(10.0001));
    }

    #[test]
    fn test_custom_table_accepted() {
        let table = DifficultyTable::new(coarse_bands(), VoteRequirements::default()).unwrap();
        assert_eq!(
            table.tier_range(DifficultyTier::Hard),
            Some(ScaleRange::new(4.0, 6.0))
        );
    }

    #[test]
    fn test_rejects_empty() {
        let err = DifficultyTable::new(vec![], VoteRequirements::default()).unwrap_err();
        assert_eq!(err, TableError::Empty);
    }

    #[test]
    fn test_rejects_gap() {
        let mut bands = coarse_bands();
        bands[2].lower = 4.5;
        let err = DifficultyTable::new(bands, VoteRequirements::default()).unwrap_err();
        assert!(matches!(err, TableError::NotContiguous { .. }), "{err}");
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        let mut bands = coarse_bands();
        bands[0].lower = 0.5;
        assert!(matches!(
            DifficultyTable::new(bands, VoteRequirements::default()),
            Err(TableError::BadStart { .. })
        ));

        let mut bands = coarse_bands();
        bands[5].upper = 9.5;
        assert!(matches!(
            DifficultyTable::new(bands, VoteRequirements::default()),
            Err(TableError::BadEnd { .. })
        ));
    }

    #[test]
    fn test_rejects_tier_out_of_order() {
        let mut bands = coarse_bands();
        bands[3].tier = DifficultyTier::Medium;
        let err = DifficultyTable::new(bands, VoteRequirements::default()).unwrap_err();
        assert!(matches!(err, TableError::TierOutOfOrder { .. }), "{err}");
    }

    #[test]
    fn test_rejects_missing_tier() {
        let mut bands = coarse_bands();
        bands[4].tier = DifficultyTier::VeryHard;
        let err = DifficultyTable::new(bands, VoteRequirements::default()).unwrap_err();
        assert_eq!(
            err,
            TableError::MissingTier {
                tier: DifficultyTier::Extreme
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_label_and_empty_band() {
        let mut bands = coarse_bands();
        bands[1].label = "Easy".to_string();
        assert!(matches!(
            DifficultyTable::new(bands, VoteRequirements::default()),
            Err(TableError::DuplicateLabel { .. })
        ));

        let mut bands = coarse_bands();
        bands[1].upper = 2.0;
        assert!(matches!(
            DifficultyTable::new(bands, VoteRequirements::default()),
            Err(TableError::EmptyBand { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_vote_requirement() {
        let votes = VoteRequirements {
            hell: 0,
            ..VoteRequirements::default()
        };
        assert_eq!(
            DifficultyTable::new(coarse_bands(), votes).unwrap_err(),
            TableError::ZeroVoteRequirement {
                tier: DifficultyTier::Hell
            }
        );
    }

    #[test]
    fn test_deserialize_defaults_and_validation() {
        let table: DifficultyTable = serde_yaml::from_str("{}").unwrap();
        assert_eq!(table, DifficultyTable::default());

        let table: DifficultyTable =
            serde_yaml::from_str("required_votes:\n  hell: 2\n").unwrap();
        assert_eq!(table.required_votes().hell, 2);
        assert_eq!(table.required_votes().easy, 5);

        let broken = "bands:\n  - { label: A, tier: Easy, lower: 0.0, upper: 5.0 }\n";
        assert!(serde_yaml::from_str::<DifficultyTable>(broken).is_err());
    }
}
