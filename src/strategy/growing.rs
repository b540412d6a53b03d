//! Blended ranking for players building up experience

use crate::analysis::calculator::{confidence, ConfidenceBounds};
use crate::error::Result;
use crate::reasoning;
use crate::strategy::{RankingStrategy, StrategyContext, StrategyOutcome};
use crate::types::StrategyKind;
use crate::utils::clamp_rank;

pub const GROWING_CONFIDENCE: ConfidenceBounds = ConfidenceBounds::new(0.5, 0.1, 0.95);

const SKILL_WEIGHT: f64 = 0.4;
const SCORE_WEIGHT: f64 = 0.6;
const ADJUSTMENT_SCALE: f64 = 0.6;

#[derive(Debug, Clone, Copy, Default)]
pub struct GrowingStrategy;

impl RankingStrategy for GrowingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Growing
    }

    fn calculate_ranking(&self, ctx: &StrategyContext<'_>) -> Result<StrategyOutcome> {
        let skill_factor = ctx.skill_factor();
        let combined = skill_factor * SKILL_WEIGHT + ctx.score_factor() * SCORE_WEIGHT;
        let adjustment = (combined - 0.5) * ADJUSTMENT_SCALE;
        let advisory_rank = clamp_rank(
            ctx.human_rank() as f64 + adjustment,
            ctx.total_participants,
        );

        Ok(StrategyOutcome {
            strategy: StrategyKind::Growing,
            advisory_rank,
            confidence: confidence(ctx.profile, skill_factor, GROWING_CONFIDENCE),
            reasoning: reasoning::growing(ctx, combined, advisory_rank),
            relative_performance: ctx.relative_performance(),
        })
    }
}
