//! Newbie protection
//!
//! Players with little history who land in the top half of the human cohort
//! get their placement lifted so early matches feel rewarding.

use crate::analysis::calculator::{confidence, percentile, ConfidenceBounds};
use crate::error::Result;
use crate::reasoning;
use crate::strategy::{RankingStrategy, StrategyContext, StrategyOutcome};
use crate::types::StrategyKind;

pub const NEWBIE_CONFIDENCE: ConfidenceBounds = ConfidenceBounds::new(0.5, 0.3, 0.9);

/// How many places a newbie is lifted
///
/// Only players at or above the cohort midpoint are boosted; the boost grows
/// with the match size.
pub fn protection_boost(human_rank: usize, human_count: usize, total_participants: usize) -> usize {
    let percentile = percentile(human_rank, human_count);
    if percentile <= 0.5 {
        ((0.5 - percentile) * total_participants as f64 * 0.4).floor() as usize
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NewbieStrategy;

impl RankingStrategy for NewbieStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Newbie
    }

    fn calculate_ranking(&self, ctx: &StrategyContext<'_>) -> Result<StrategyOutcome> {
        let human_rank = ctx.human_rank();
        let boost = protection_boost(human_rank, ctx.human_count(), ctx.total_participants);
        let advisory_rank = human_rank.saturating_sub(boost).max(1) as u32;

        Ok(StrategyOutcome {
            strategy: StrategyKind::Newbie,
            advisory_rank,
            confidence: confidence(ctx.profile, ctx.skill_factor(), NEWBIE_CONFIDENCE),
            reasoning: reasoning::newbie(ctx, boost, advisory_rank),
            relative_performance: ctx.relative_performance(),
        })
    }
}
