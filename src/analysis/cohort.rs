//! Human cohort analysis
//!
//! Aggregates the current scores and historical profiles of every human in a
//! request into one [`HumanAnalysis`] snapshot.

use crate::config::RankingConfig;
use crate::types::{
    HumanAnalysis, HumanPlayer, PlayerPerformanceProfile, ScoreDistribution, SkillDistribution,
    SkillLevel,
};
use crate::utils::{mean, median, population_variance};

/// Skill label for a player with `total_matches` matches on record
pub fn classify_skill(total_matches: u32, config: &RankingConfig) -> SkillLevel {
    if total_matches < config.newbie_threshold {
        SkillLevel::Beginner
    } else if total_matches < config.growing_threshold {
        SkillLevel::Intermediate
    } else {
        SkillLevel::Advanced
    }
}

/// Build the cohort snapshot for one request
pub fn analyze_cohort(
    players: &[HumanPlayer],
    profiles: &[PlayerPerformanceProfile],
    config: &RankingConfig,
) -> HumanAnalysis {
    let scores: Vec<f64> = players.iter().map(|p| p.score).collect();

    let mut skill_distribution = SkillDistribution::default();
    for profile in profiles {
        match classify_skill(profile.total_matches, config) {
            SkillLevel::Beginner => skill_distribution.beginner += 1,
            SkillLevel::Intermediate => skill_distribution.intermediate += 1,
            SkillLevel::Advanced => skill_distribution.advanced += 1,
        }
    }

    HumanAnalysis {
        average_score: mean(&scores),
        score_distribution: ScoreDistribution {
            highest: scores.iter().copied().fold(f64::MIN, f64::max),
            lowest: scores.iter().copied().fold(f64::MAX, f64::min),
            median: median(&scores),
        },
        overall_skill_level: overall_skill_level(&skill_distribution),
        skill_distribution,
        score_variance: population_variance(&scores),
    }
}

fn overall_skill_level(distribution: &SkillDistribution) -> SkillLevel {
    let total = distribution.total();
    if total == 0 {
        return SkillLevel::Beginner;
    }

    let ratio = |count: usize| count as f64 / total as f64;
    if ratio(distribution.advanced) >= 0.5 {
        SkillLevel::Advanced
    } else if ratio(distribution.intermediate) >= 0.5 {
        SkillLevel::Intermediate
    } else {
        SkillLevel::Beginner
    }
}
