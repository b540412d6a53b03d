//! Shared ranking building blocks
//!
//! Factors and classifications used by every ranking strategy. All functions
//! are pure so strategies stay deterministic for a given input.

use crate::config::RankingConfig;
use crate::types::{
    ExperienceTier, HumanAnalysis, HumanPlayer, PlayerPerformanceProfile, RelativePerformance,
};

/// Baseline and clamp applied to a strategy's confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBounds {
    pub baseline: f64,
    pub min: f64,
    pub max: f64,
}

impl ConfidenceBounds {
    pub const fn new(baseline: f64, min: f64, max: f64) -> Self {
        Self { baseline, min, max }
    }
}

impl Default for ConfidenceBounds {
    fn default() -> Self {
        Self::new(0.5, 0.1, 0.95)
    }
}

/// 1-based position of `uid` among humans sorted by score (descending, stable)
pub fn human_rank(uid: &str, humans: &[HumanPlayer]) -> usize {
    let mut order: Vec<&HumanPlayer> = humans.iter().collect();
    order.sort_by(|a, b| b.score.total_cmp(&a.score));

    order
        .iter()
        .position(|p| p.uid == uid)
        .map(|index| index + 1)
        .unwrap_or(humans.len().max(1))
}

/// Share of humans placed at or above `human_rank`
pub fn percentile(human_rank: usize, human_count: usize) -> f64 {
    if human_count == 0 {
        return 1.0;
    }
    human_rank as f64 / human_count as f64
}

/// How strong the current score is relative to the cohort (roughly 0 to 1)
pub fn score_factor(score: f64, analysis: &HumanAnalysis) -> f64 {
    let highest = analysis.score_distribution.highest;
    let lowest = analysis.score_distribution.lowest;

    let relative_position = if highest > lowest {
        (score - lowest) / (highest - lowest)
    } else {
        0.5
    };

    let average_comparison = if analysis.average_score != 0.0 {
        score / analysis.average_score
    } else {
        1.0
    };

    0.7 * relative_position + 0.3 * (average_comparison - 1.0 + 0.5)
}

/// Historical skill estimate from the performance profile (0 to 1)
pub fn skill_factor(profile: &PlayerPerformanceProfile) -> f64 {
    let rank_score = (1.0 - (profile.average_rank - 1.0) / 10.0).max(0.0);
    0.4 * rank_score + 0.3 * profile.win_rate + 0.3 * profile.consistency()
}

/// Confidence in a strategy's recommendation, clamped to the strategy's bounds
pub fn confidence(
    profile: &PlayerPerformanceProfile,
    skill_factor: f64,
    bounds: ConfidenceBounds,
) -> f64 {
    let mut confidence = bounds.baseline;

    if profile.total_matches >= 20 {
        confidence += 0.2;
    } else if profile.total_matches >= 10 {
        confidence += 0.1;
    }

    confidence += profile.consistency() * 0.2;

    if skill_factor >= 0.8 {
        confidence += 0.1;
    } else if skill_factor <= 0.3 {
        confidence -= 0.1;
    }

    confidence.clamp(bounds.min, bounds.max).clamp(0.0, 1.0)
}

/// Classify the current score against the cohort average
pub fn relative_performance(
    score: f64,
    analysis: &HumanAnalysis,
    score_factor: f64,
) -> RelativePerformance {
    let improvement = if analysis.average_score != 0.0 {
        (score - analysis.average_score) / analysis.average_score
    } else {
        0.0
    };

    if improvement > 0.2 && score_factor >= 0.8 {
        RelativePerformance::Excellent
    } else if improvement > 0.1 || score_factor >= 0.6 {
        RelativePerformance::Good
    } else if improvement > -0.1 && score_factor >= 0.3 {
        RelativePerformance::Average
    } else {
        RelativePerformance::Poor
    }
}

/// Experience tier from the number of recorded matches
pub fn experience_tier(total_matches: u32, config: &RankingConfig) -> ExperienceTier {
    if total_matches < config.newbie_threshold {
        ExperienceTier::Newbie
    } else if total_matches < config.growing_threshold {
        ExperienceTier::Growing
    } else {
        ExperienceTier::Veteran
    }
}
