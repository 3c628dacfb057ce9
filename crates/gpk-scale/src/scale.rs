//! # Difficulty Scale
//!
//! Bidirectional mapping between raw difficulty values in `[0, 10]` and the
//! categorical tiers and labels of a [`DifficultyTable`].
//!
//! All operations are pure. Callers hold the scale built from the loaded
//! config and pass it down; there is no process-wide instance.

use serde::{Deserialize, Serialize};

use crate::error::ScaleError;
use crate::table::{DifficultyTable, LabelBand, ScaleRange, SCALE_MAX, SCALE_MIN};
use crate::tier::DifficultyTier;

/// Either a top-level tier or an extended label, by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DifficultyRef<'a> {
    Tier(DifficultyTier),
    Label(&'a str),
}

impl From<DifficultyTier> for DifficultyRef<'_> {
    fn from(tier: DifficultyTier) -> Self {
        Self::Tier(tier)
    }
}

impl<'a> From<&'a str> for DifficultyRef<'a> {
    fn from(label: &'a str) -> Self {
        Self::Label(label)
    }
}

/// Tier and label resolved for one raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub raw: f64,
    pub tier: DifficultyTier,
    pub label: String,
}

/// Query interface over a validated band table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DifficultyScale {
    table: DifficultyTable,
}

impl DifficultyScale {
    /// Wrap a validated table.
    pub fn new(table: DifficultyTable) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn table(&self) -> &DifficultyTable {
        &self.table
    }

    /// Reject values outside `[0, 10]`, NaN and infinities.
    pub fn check(&self, raw: f64) -> Result<f64, ScaleError> {
        if raw.is_finite() && (SCALE_MIN..=SCALE_MAX).contains(&raw) {
            Ok(raw)
        } else {
            Err(ScaleError::OutOfRange {
                value: raw,
                min: SCALE_MIN,
                max: SCALE_MAX,
            })
        }
    }

    /// Top-level tier containing `raw`.
    pub fn top_level_of(&self, raw: f64) -> Result<DifficultyTier, ScaleError> {
        Ok(self.extended_of(raw)?.tier)
    }

    /// Extended label band containing `raw`.
    pub fn extended_of(&self, raw: f64) -> Result<&LabelBand, ScaleError> {
        let raw = self.check(raw)?;
        let bands = self.table.bands();
        // Bands are contiguous and sorted, so the first band whose upper
        // bound lies above `raw` contains it. Only `raw == SCALE_MAX` runs
        // off the end, and it belongs to the closed final band.
        let idx = bands.partition_point(|band| band.upper <= raw);
        bands
            .get(idx)
            .or_else(|| bands.last())
            .ok_or(ScaleError::OutOfRange {
                value: raw,
                min: SCALE_MIN,
                max: SCALE_MAX,
            })
    }

    /// Tier and label for `raw` in one lookup.
    pub fn classify(&self, raw: f64) -> Result<Classification, ScaleError> {
        let band = self.extended_of(raw)?;
        Ok(Classification {
            raw,
            tier: band.tier,
            label: band.label.clone(),
        })
    }

    /// Band carrying `label`.
    pub fn label(&self, label: &str) -> Result<&LabelBand, ScaleError> {
        self.table
            .bands()
            .iter()
            .find(|band| band.label == label)
            .ok_or_else(|| ScaleError::UnknownLabel {
                label: label.to_string(),
            })
    }

    /// Range covered by `tier`.
    pub fn range_of(&self, tier: DifficultyTier) -> Result<ScaleRange, ScaleError> {
        self.table
            .tier_range(tier)
            .ok_or_else(|| ScaleError::UnknownTier {
                name: tier.to_string(),
            })
    }

    /// Canonical raw value for a tier or label: the midpoint of its range.
    ///
    /// Used whenever a categorical difficulty has to be turned back into a
    /// number, e.g. a submitter declaring `"Hard"` without a value.
    pub fn midpoint_of<'a>(&self, difficulty: impl Into<DifficultyRef<'a>>) -> Result<f64, ScaleError> {
        match difficulty.into() {
            DifficultyRef::Tier(tier) => Ok(self.range_of(tier)?.midpoint()),
            DifficultyRef::Label(label) => Ok(self.label(label)?.range().midpoint()),
        }
    }

    /// Votes a playtest resolving to `tier` needs before it is eligible for
    /// approval.
    pub fn required_vote_count(&self, tier: DifficultyTier) -> u32 {
        self.table.required_votes().for_tier(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> DifficultyScale {
        DifficultyScale::default()
    }

    #[test]
    fn test_top_level_of_boundaries() {
        let s = scale();
        assert_eq!(s.top_level_of(0.0).unwrap(), DifficultyTier::Easy);
        assert_eq!(s.top_level_of(2.349).unwrap(), DifficultyTier::Easy);
        assert_eq!(s.top_level_of(2.35).unwrap(), DifficultyTier::Medium);
        assert_eq!(s.top_level_of(4.12).unwrap(), DifficultyTier::Hard);
        assert_eq!(s.top_level_of(5.88).unwrap(), DifficultyTier::VeryHard);
        assert_eq!(s.top_level_of(7.65).unwrap(), DifficultyTier::Extreme);
        assert_eq!(s.top_level_of(9.41).unwrap(), DifficultyTier::Hell);
        assert_eq!(s.top_level_of(10.0).unwrap(), DifficultyTier::Hell);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let s = scale();
        for raw in [-0.01, 10.01, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(s.top_level_of(raw), Err(ScaleError::OutOfRange { .. })),
                "{raw} should be rejected"
            );
            assert!(s.extended_of(raw).is_err());
        }
    }

    #[test]
    fn test_extended_of_labels() {
        let s = scale();
        assert_eq!(s.extended_of(0.0).unwrap().label, "Easy -");
        assert_eq!(s.extended_of(1.18).unwrap().label, "Easy");
        assert_eq!(s.extended_of(5.0).unwrap().label, "Hard");
        assert_eq!(s.extended_of(7.1).unwrap().label, "Very Hard +");
        assert_eq!(s.extended_of(10.0).unwrap().label, "Hell");
    }

    #[test]
    fn test_classify_combines_tier_and_label() {
        let c = scale().classify(8.3).unwrap();
        assert_eq!(c.tier, DifficultyTier::Extreme);
        assert_eq!(c.label, "Extreme");
        assert_eq!(c.raw, 8.3);
    }

    #[test]
    fn test_midpoints() {
        let s = scale();
        let hard = s.midpoint_of(DifficultyTier::Hard).unwrap();
        assert!((hard - 5.0).abs() < 1e-9);
        let hell = s.midpoint_of(DifficultyTier::Hell).unwrap();
        assert!((hell - 9.705).abs() < 1e-9);
        let label = s.midpoint_of("Easy +").unwrap();
        assert!((label - 2.055).abs() < 1e-9);
        assert_eq!(
            s.midpoint_of("Impossible"),
            Err(ScaleError::UnknownLabel {
                label: "Impossible".to_string()
            })
        );
    }

    #[test]
    fn test_required_vote_count() {
        let s = scale();
        assert_eq!(s.required_vote_count(DifficultyTier::Hard), 5);
        assert_eq!(s.required_vote_count(DifficultyTier::VeryHard), 3);
        assert_eq!(s.required_vote_count(DifficultyTier::Extreme), 2);
        assert_eq!(s.required_vote_count(DifficultyTier::Hell), 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every value on the scale resolves to exactly one tier, and the
        /// label's parent is that tier.
        #[test]
        fn every_raw_value_has_one_tier(raw in 0.0f64..=10.0) {
            let s = DifficultyScale::default();
            let tier = s.top_level_of(raw).unwrap();
            let band = s.extended_of(raw).unwrap();
            prop_assert_eq!(band.tier, tier);
            prop_assert!(band.range().contains(raw));
            let containing = DifficultyTier::all()
                .iter()
                .filter(|t| s.range_of(**t).unwrap().contains(raw))
                .count();
            prop_assert_eq!(containing, 1);
        }

        /// Labels are nested: the label range lies inside its tier range.
        #[test]
        fn label_nested_in_tier(raw in 0.0f64..=10.0) {
            let s = DifficultyScale::default();
            let band = s.extended_of(raw).unwrap();
            let tier_range = s.range_of(band.tier).unwrap();
            prop_assert!(band.lower >= tier_range.lower);
            prop_assert!(band.upper <= tier_range.upper);
        }

        /// Classification never decreases as the raw value grows.
        #[test]
        fn tier_is_monotonic(a in 0.0f64..=10.0, b in 0.0f64..=10.0) {
            let s = DifficultyScale::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(s.top_level_of(lo).unwrap() <= s.top_level_of(hi).unwrap());
        }
    }

    #[test]
    fn midpoints_round_trip() {
        let s = DifficultyScale::default();
        for tier in DifficultyTier::all() {
            let mid = s.midpoint_of(*tier).unwrap();
            assert_eq!(s.top_level_of(mid).unwrap(), *tier);
        }
        for band in s.table().bands() {
            let mid = s.midpoint_of(band.label.as_str()).unwrap();
            assert_eq!(s.extended_of(mid).unwrap().label, band.label);
        }
    }
}
