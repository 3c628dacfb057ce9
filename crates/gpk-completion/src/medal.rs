//! # Medals
//!
//! A map may declare three time thresholds. A completion at or under the
//! gold time earns gold, at or under silver earns silver, at or under bronze
//! earns bronze; anything slower earns nothing.

use std::collections::BTreeMap;

use gpk_scale::DifficultyTier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from medal thresholds and completion times.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MedalError {
    /// Thresholds are not strictly increasing.
    #[error("medal thresholds must satisfy gold < silver < bronze (got {gold}, {silver}, {bronze})")]
    InvalidMedalOrder { gold: f64, silver: f64, bronze: f64 },

    /// A time that is negative, NaN or infinite.
    #[error("completion time {time} must be a finite, non-negative number of seconds")]
    InvalidTime { time: f64 },
}

/// Completion grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }
}

impl std::fmt::Display for Medal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct RawMedalThresholds {
    gold: f64,
    silver: f64,
    bronze: f64,
}

impl TryFrom<RawMedalThresholds> for MedalThresholds {
    type Error = MedalError;

    fn try_from(raw: RawMedalThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.gold, raw.silver, raw.bronze)
    }
}

/// Validated `gold < silver < bronze` times, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMedalThresholds")]
pub struct MedalThresholds {
    gold: f64,
    silver: f64,
    bronze: f64,
}

impl MedalThresholds {
    pub fn new(gold: f64, silver: f64, bronze: f64) -> Result<Self, MedalError> {
        let all_finite = [gold, silver, bronze].iter().all(|t| t.is_finite());
        if !all_finite || gold < 0.0 || !(gold < silver && silver < bronze) {
            return Err(MedalError::InvalidMedalOrder {
                gold,
                silver,
                bronze,
            });
        }
        Ok(Self {
            gold,
            silver,
            bronze,
        })
    }

    pub fn gold(&self) -> f64 {
        self.gold
    }

    pub fn silver(&self) -> f64 {
        self.silver
    }

    pub fn bronze(&self) -> f64 {
        self.bronze
    }

    /// Grade `time`. The caller validates the time.
    pub fn medal_for(&self, time: f64) -> Option<Medal> {
        if time <= self.gold {
            Some(Medal::Gold)
        } else if time <= self.silver {
            Some(Medal::Silver)
        } else if time <= self.bronze {
            Some(Medal::Bronze)
        } else {
            None
        }
    }
}

/// Thresholds applied to maps of a tier that declare none of their own.
///
/// Empty by default: without configuration, maps without thresholds award
/// no medals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedalDefaults {
    by_tier: BTreeMap<DifficultyTier, MedalThresholds>,
}

impl MedalDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(mut self, tier: DifficultyTier, thresholds: MedalThresholds) -> Self {
        self.by_tier.insert(tier, thresholds);
        self
    }

    pub fn for_tier(&self, tier: DifficultyTier) -> Option<&MedalThresholds> {
        self.by_tier.get(&tier)
    }

    pub fn is_empty(&self) -> bool {
        self.by_tier.is_empty()
    }

    /// Map thresholds win; otherwise the tier default, if any.
    pub fn resolve<'a>(
        &'a self,
        map_thresholds: Option<&'a MedalThresholds>,
        tier: DifficultyTier,
    ) -> Option<&'a MedalThresholds> {
        map_thresholds.or_else(|| self.for_tier(tier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> MedalThresholds {
        MedalThresholds::new(60.0, 90.0, 120.0).unwrap()
    }

    #[test]
    fn test_medal_boundaries_inclusive() {
        let t = standard();
        assert_eq!(t.medal_for(59.9), Some(Medal::Gold));
        assert_eq!(t.medal_for(60.0), Some(Medal::Gold));
        assert_eq!(t.medal_for(60.01), Some(Medal::Silver));
        assert_eq!(t.medal_for(90.0), Some(Medal::Silver));
        assert_eq!(t.medal_for(120.0), Some(Medal::Bronze));
        assert_eq!(t.medal_for(121.0), None);
    }

    #[test]
    fn test_thresholds_must_increase() {
        for (g, s, b) in [
            (90.0, 60.0, 120.0),
            (60.0, 60.0, 120.0),
            (60.0, 130.0, 120.0),
            (f64::NAN, 90.0, 120.0),
            (-1.0, 90.0, 120.0),
        ] {
            assert!(matches!(
                MedalThresholds::new(g, s, b),
                Err(MedalError::InvalidMedalOrder { .. })
            ));
        }
    }

    #[test]
    fn test_thresholds_deserialize_validated() {
        let t: MedalThresholds =
            serde_json::from_str(r#"{"gold":10,"silver":20,"bronze":30}"#).unwrap();
        assert_eq!(t.silver(), 20.0);
        let bad = serde_json::from_str::<MedalThresholds>(r#"{"gold":30,"silver":20,"bronze":10}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_defaults_resolution() {
        let hell = MedalThresholds::new(300.0, 400.0, 500.0).unwrap();
        let defaults = MedalDefaults::new().with_tier(DifficultyTier::Hell, hell);
        let own = standard();
        assert_eq!(defaults.resolve(Some(&own), DifficultyTier::Hell), Some(&own));
        assert_eq!(defaults.resolve(None, DifficultyTier::Hell), Some(&hell));
        assert_eq!(defaults.resolve(None, DifficultyTier::Easy), None);
    }

    #[test]
    fn test_defaults_yaml_keys_are_tier_names() {
        let yaml = "Very Hard: { gold: 100, silver: 150, bronze: 200 }\n";
        let defaults: MedalDefaults = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            defaults.for_tier(DifficultyTier::VeryHard).map(|t| t.gold()),
            Some(100.0)
        );
        assert!(defaults.for_tier(DifficultyTier::Hard).is_none());
    }
}
