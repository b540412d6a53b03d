//! Win-rate controlled ranking
//!
//! Every player gets a target win rate for their experience tier. The gap
//! between the recorded win rate and that target moves the placement by up to
//! a fifth of the match size.

use crate::analysis::calculator::{confidence, experience_tier, ConfidenceBounds};
use crate::config::RankingConfig;
use crate::error::Result;
use crate::reasoning;
use crate::strategy::{RankingStrategy, StrategyContext, StrategyOutcome};
use crate::types::{ExperienceTier, HumanAnalysis, PlayerPerformanceProfile, StrategyKind};
use crate::utils::clamp_rank;

pub const WIN_RATE_CONFIDENCE: ConfidenceBounds = ConfidenceBounds::new(0.5, 0.2, 0.9);

const MIN_TARGET: f64 = 0.2;
const MAX_TARGET: f64 = 0.6;
/// Largest adjustment as a share of the match size
const MAX_ADJUSTMENT_RATIO: f64 = 0.2;

/// Base win rate each tier is steered toward
pub fn base_target(tier: ExperienceTier) -> f64 {
    match tier {
        ExperienceTier::Newbie => 0.40,
        ExperienceTier::Growing => 0.35,
        ExperienceTier::Veteran => 0.33,
    }
}

/// Target win rate for a player, corrected for consistency and current form
pub fn target_win_rate(
    profile: &PlayerPerformanceProfile,
    score: f64,
    analysis: &HumanAnalysis,
    config: &RankingConfig,
) -> f64 {
    let mut target = base_target(experience_tier(profile.total_matches, config));

    let consistency = profile.consistency();
    if consistency >= 0.8 {
        target += 0.02;
    } else if consistency < 0.5 {
        target -= 0.02;
    }

    let average = analysis.average_score;
    if average > 0.0 {
        if score >= average * 1.1 {
            target += 0.03;
        } else if score <= average * 0.9 {
            target -= 0.03;
        }
    }

    target.clamp(MIN_TARGET, MAX_TARGET)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WinRateControlledStrategy;

impl RankingStrategy for WinRateControlledStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::WinRateControlled
    }

    fn calculate_ranking(&self, ctx: &StrategyContext<'_>) -> Result<StrategyOutcome> {
        let tier = experience_tier(ctx.profile.total_matches, ctx.config);
        let target = target_win_rate(ctx.profile, ctx.player.score, ctx.analysis, ctx.config);
        let diff = ctx.profile.win_rate - target;

        let limit = ctx.total_participants as f64 * MAX_ADJUSTMENT_RATIO;
        let adjustment = (-diff * 10.0).round().clamp(-limit, limit);
        let advisory_rank = clamp_rank(
            ctx.human_rank() as f64 + adjustment,
            ctx.total_participants,
        );

        Ok(StrategyOutcome {
            strategy: StrategyKind::WinRateControlled,
            advisory_rank,
            confidence: confidence(ctx.profile, ctx.skill_factor(), WIN_RATE_CONFIDENCE),
            reasoning: reasoning::win_rate(ctx, tier, target, advisory_rank),
            relative_performance: ctx.relative_performance(),
        })
    }
}
