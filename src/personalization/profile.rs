//! Behavioral profile used by the personalized ranking strategy

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeLevel {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl ChallengeLevel {
    pub const VARIANTS: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Extreme];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionStyle {
    Conservative,
    Balanced,
    Aggressive,
}

impl CompetitionStyle {
    pub const VARIANTS: [Self; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Ranking,
    Score,
    Improvement,
    Fun,
}

impl FocusArea {
    pub const VARIANTS: [Self; 4] = [Self::Ranking, Self::Score, Self::Improvement, Self::Fun];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub const VARIANTS: [Self; 3] = [Self::Low, Self::Medium, Self::High];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    Persistent,
    Casual,
}

impl Persistence {
    pub const VARIANTS: [Self; 2] = [Self::Persistent, Self::Casual];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Stable,
    Volatile,
}

impl Stability {
    pub const VARIANTS: [Self; 2] = [Self::Stable, Self::Volatile];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Progress {
    Improving,
    Plateau,
    Declining,
}

impl Progress {
    pub const VARIANTS: [Self; 3] = [Self::Improving, Self::Plateau, Self::Declining];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motivation {
    Intrinsic,
    Extrinsic,
}

impl Motivation {
    pub const VARIANTS: [Self; 2] = [Self::Intrinsic, Self::Extrinsic];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementNeed {
    High,
    Medium,
    Low,
}

impl AchievementNeed {
    pub const VARIANTS: [Self; 3] = [Self::High, Self::Medium, Self::Low];
}

/// Bartle-style player archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Explorer,
    Achiever,
    Killer,
    Socializer,
}

impl LearningStyle {
    pub const VARIANTS: [Self; 4] = [
        Self::Explorer,
        Self::Achiever,
        Self::Killer,
        Self::Socializer,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalOrientation {
    Competitive,
    Mastery,
    Social,
}

impl GoalOrientation {
    pub const VARIANTS: [Self; 3] = [Self::Competitive, Self::Mastery, Self::Social];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub challenge_level: ChallengeLevel,
    pub competition_style: CompetitionStyle,
    pub focus_area: FocusArea,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    pub risk_tolerance: RiskTolerance,
    pub persistence: Persistence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPattern {
    pub stability: Stability,
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Psychology {
    pub motivation: Motivation,
    pub achievement_need: AchievementNeed,
    pub learning_style: LearningStyle,
    pub goal_orientation: GoalOrientation,
}

/// What the personalization service knows about how a player likes to play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizationProfile {
    pub uid: PlayerId,
    pub preferences: Preferences,
    pub behavior: Behavior,
    pub history: HistoryPattern,
    pub psychology: Psychology,
    /// How much observed data backs this profile (0.0 to 1.0)
    pub data_quality: f64,
    /// Service-reported confidence in the profile (0.0 to 1.0)
    pub confidence: f64,
    /// True when generated locally from the uid rather than fetched
    #[serde(default)]
    pub synthetic: bool,
}

impl PersonalizationProfile {
    /// Whether the profile is trustworthy enough to personalize rankings
    pub fn meets_quality_bar(&self, min_data_quality: f64, min_confidence: f64) -> bool {
        self.data_quality >= min_data_quality && self.confidence >= min_confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersonalizationProfile {
        PersonalizationProfile {
            uid: "p1".to_string(),
            preferences: Preferences {
                challenge_level: ChallengeLevel::Hard,
                competition_style: CompetitionStyle::Aggressive,
                focus_area: FocusArea::Ranking,
            },
            behavior: Behavior {
                risk_tolerance: RiskTolerance::High,
                persistence: Persistence::Persistent,
            },
            history: HistoryPattern {
                stability: Stability::Stable,
                progress: Progress::Improving,
            },
            psychology: Psychology {
                motivation: Motivation::Intrinsic,
                achievement_need: AchievementNeed::High,
                learning_style: LearningStyle::Killer,
                goal_orientation: GoalOrientation::Competitive,
            },
            data_quality: 0.8,
            confidence: 0.4,
            synthetic: false,
        }
    }

    #[test]
    fn test_quality_bar() {
        let profile = sample();
        assert!(profile.meets_quality_bar(0.3, 0.3));
        assert!(!profile.meets_quality_bar(0.3, 0.5));
        assert!(!profile.meets_quality_bar(0.9, 0.3));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["preferences"]["challenge_level"], "hard");
        assert_eq!(json["psychology"]["learning_style"], "killer");

        let parsed: PersonalizationProfile = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample());
    }
}
