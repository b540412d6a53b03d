//! Common types used throughout the ranking engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for human players and AI opponents
pub type PlayerId = String;

/// Unique identifier for a ranking request
pub type MatchId = Uuid;

/// A real player taking part in the match, with the score they just posted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanPlayer {
    pub uid: PlayerId,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
}

impl HumanPlayer {
    pub fn new(uid: impl Into<PlayerId>, score: f64) -> Self {
        Self {
            uid: uid.into(),
            score,
            name: None,
            character_id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One historical match as reported by the history provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub score: f64,
    /// Final placement, 1 = winner
    pub rank: u32,
}

impl MatchRecord {
    pub fn new(score: f64, rank: u32) -> Self {
        Self { score, rank }
    }

    pub fn is_win(&self) -> bool {
        self.rank == 1
    }
}

/// Direction of a player's recent scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Declining => write!(f, "declining"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Skill label shared by cohort analysis and AI opponents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "beginner"),
            SkillLevel::Intermediate => write!(f, "intermediate"),
            SkillLevel::Advanced => write!(f, "advanced"),
        }
    }
}

/// Experience tier driving strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceTier {
    Newbie,
    Growing,
    Veteran,
}

impl std::fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceTier::Newbie => write!(f, "newbie"),
            ExperienceTier::Growing => write!(f, "growing"),
            ExperienceTier::Veteran => write!(f, "veteran"),
        }
    }
}

/// How a player's current score compares to the rest of the cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativePerformance {
    Excellent,
    Good,
    Average,
    Poor,
}

impl std::fmt::Display for RelativePerformance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelativePerformance::Excellent => write!(f, "excellent"),
            RelativePerformance::Good => write!(f, "good"),
            RelativePerformance::Average => write!(f, "average"),
            RelativePerformance::Poor => write!(f, "poor"),
        }
    }
}

/// Recent-form summary inside a performance profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPerformance {
    pub last_10_matches: Vec<f64>,
    pub trend_direction: TrendDirection,
    /// 0.0 (erratic) to 1.0 (steady)
    pub consistency: f64,
}

/// Statistical summary of a player's historical matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPerformanceProfile {
    pub uid: PlayerId,
    pub average_score: f64,
    pub average_rank: f64,
    pub win_rate: f64,
    pub total_matches: u32,
    pub recent_performance: RecentPerformance,
}

impl PlayerPerformanceProfile {
    /// Profile used when a player has too little history to summarize
    pub fn default_for(uid: impl Into<PlayerId>) -> Self {
        Self {
            uid: uid.into(),
            average_score: 1000.0,
            average_rank: 3.0,
            win_rate: 0.25,
            total_matches: 0,
            recent_performance: RecentPerformance {
                last_10_matches: Vec::new(),
                trend_direction: TrendDirection::Stable,
                consistency: 0.5,
            },
        }
    }

    pub fn consistency(&self) -> f64 {
        self.recent_performance.consistency
    }

    pub fn trend(&self) -> TrendDirection {
        self.recent_performance.trend_direction
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub highest: f64,
    pub lowest: f64,
    pub median: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDistribution {
    pub beginner: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl SkillDistribution {
    pub fn total(&self) -> usize {
        self.beginner + self.intermediate + self.advanced
    }
}

/// Snapshot of the human cohort for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanAnalysis {
    pub average_score: f64,
    pub score_distribution: ScoreDistribution,
    pub skill_distribution: SkillDistribution,
    pub overall_skill_level: SkillLevel,
    pub score_variance: f64,
}

/// Which ranking strategy produced a player's advisory rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Newbie,
    Growing,
    Veteran,
    Personalized,
    WinRateControlled,
    Default,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Newbie => "newbie",
            StrategyKind::Growing => "growing",
            StrategyKind::Veteran => "veteran",
            StrategyKind::Personalized => "personalized",
            StrategyKind::WinRateControlled => "win_rate_controlled",
            StrategyKind::Default => "default",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranking outcome for one human player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRankingResult {
    pub uid: PlayerId,
    pub score: f64,
    /// Delivered rank after reconciliation
    pub recommended_rank: u32,
    /// Strategy output before AI scores were merged in
    pub advisory_rank: u32,
    pub strategy: StrategyKind,
    pub confidence: f64,
    pub reasoning: String,
    pub relative_performance: RelativePerformance,
}

/// A synthesized opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIOpponent {
    pub uid: PlayerId,
    pub name: String,
    pub character_id: String,
    pub score: f64,
    pub target_rank: u32,
    /// Delivered rank after reconciliation
    pub recommended_rank: u32,
    pub skill_level: SkillLevel,
    pub description: String,
}

/// Operating mode that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    Standard,
    WinRateControl,
    Default,
}

/// Summary of the match a result was computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    pub match_id: MatchId,
    pub total_participants: usize,
    pub human_count: usize,
    pub ai_count: usize,
    pub mode: RankingMode,
    pub average_human_score: f64,
    pub overall_skill_level: SkillLevel,
    pub strategies_used: Vec<StrategyKind>,
    pub generated_at: DateTime<Utc>,
}

/// Top-level recommendation attached to every result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub strategy: String,
    pub reasoning: String,
    pub confidence: f64,
}

/// Complete output of one ranking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRankingResult {
    pub human_player_rankings: Vec<PlayerRankingResult>,
    pub ai_opponents: Vec<AIOpponent>,
    pub match_context: MatchContext,
    pub recommendation: Recommendation,
}

impl MatchRankingResult {
    pub fn total_participants(&self) -> usize {
        self.human_player_rankings.len() + self.ai_opponents.len()
    }

    /// Delivered ranks of every participant, humans first
    pub fn final_ranks(&self) -> Vec<u32> {
        self.human_player_rankings
            .iter()
            .map(|r| r.recommended_rank)
            .chain(self.ai_opponents.iter().map(|ai| ai.recommended_rank))
            .collect()
    }

    pub fn is_default(&self) -> bool {
        self.match_context.mode == RankingMode::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_player_optional_fields() {
        let bare: HumanPlayer = serde_json::from_str(r#"{"uid":"p1","score":1200.0}"#).unwrap();
        assert_eq!(bare, HumanPlayer::new("p1", 1200.0));

        let json = serde_json::to_value(HumanPlayer::new("p2", 900.0).with_name("Ada")).unwrap();
        assert_eq!(json["name"], "Ada");
        assert!(json.get("character_id").is_none());
    }
}
