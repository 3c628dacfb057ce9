//! Per-map mastery: completion counts on maps built on the same base map,
//! bucketed into named levels with an icon each.

use gpk_core::sanitize_string;
use serde::{Deserialize, Serialize};

/// Mastery level, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MasteryLevel {
    Placeholder,
    Rookie,
    Explorer,
    Trailblazer,
    Pathfinder,
    Specialist,
    Prodigy,
}

const THRESHOLDS: &[(u32, MasteryLevel)] = &[
    (0, MasteryLevel::Placeholder),
    (5, MasteryLevel::Rookie),
    (10, MasteryLevel::Explorer),
    (15, MasteryLevel::Trailblazer),
    (20, MasteryLevel::Pathfinder),
    (25, MasteryLevel::Specialist),
    (30, MasteryLevel::Prodigy),
];

impl MasteryLevel {
    /// Highest level whose threshold `completions` reaches.
    pub fn from_completions(completions: u32) -> Self {
        THRESHOLDS
            .iter()
            .rev()
            .find(|(threshold, _)| completions >= *threshold)
            .map_or(Self::Placeholder, |(_, level)| *level)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placeholder => "Placeholder",
            Self::Rookie => "Rookie",
            Self::Explorer => "Explorer",
            Self::Trailblazer => "Trailblazer",
            Self::Pathfinder => "Pathfinder",
            Self::Specialist => "Specialist",
            Self::Prodigy => "Prodigy",
        }
    }
}

impl std::fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's mastery of one base map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMastery {
    pub map_name: String,
    pub amount: u32,
    pub level: MasteryLevel,
    pub icon_url: String,
}

impl MapMastery {
    pub fn new(map_name: impl Into<String>, amount: u32) -> Self {
        let map_name = map_name.into();
        let level = MasteryLevel::from_completions(amount);
        let icon_url = format!(
            "assets/mastery/{}_{}.webp",
            sanitize_string(&map_name),
            level.as_str().to_ascii_lowercase()
        );
        Self {
            map_name,
            amount,
            level,
            icon_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_thresholds() {
        assert_eq!(MasteryLevel::from_completions(0), MasteryLevel::Placeholder);
        assert_eq!(MasteryLevel::from_completions(4), MasteryLevel::Placeholder);
        assert_eq!(MasteryLevel::from_completions(5), MasteryLevel::Rookie);
        assert_eq!(MasteryLevel::from_completions(14), MasteryLevel::Explorer);
        assert_eq!(MasteryLevel::from_completions(29), MasteryLevel::Specialist);
        assert_eq!(MasteryLevel::from_completions(30), MasteryLevel::Prodigy);
        assert_eq!(MasteryLevel::from_completions(500), MasteryLevel::Prodigy);
    }

    #[test]
    fn test_icon_url() {
        let m = MapMastery::new("King's Row (Winter)", 17);
        assert_eq!(m.level, MasteryLevel::Trailblazer);
        assert_eq!(m.icon_url, "assets/mastery/kings_row_winter_trailblazer.webp");
    }
}
