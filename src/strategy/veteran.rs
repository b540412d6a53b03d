//! Skill-weighted ranking for experienced players

use crate::analysis::calculator::{confidence, ConfidenceBounds};
use crate::error::Result;
use crate::reasoning;
use crate::strategy::{RankingStrategy, StrategyContext, StrategyOutcome};
use crate::types::StrategyKind;
use crate::utils::clamp_rank;
use tracing::debug;

pub const VETERAN_CONFIDENCE: ConfidenceBounds = ConfidenceBounds::new(0.55, 0.1, 0.95);

const SKILL_WEIGHT: f64 = 0.6;
const SCORE_WEIGHT: f64 = 0.4;
const ADJUSTMENT_SCALE: f64 = 0.5;

/// Participant count that marks a solo segment match
const SEGMENT_MATCH_SIZE: usize = 4;

/// Whether this is a single-human match in a segment-ranked format
pub fn is_segment_match(ctx: &StrategyContext<'_>) -> bool {
    ctx.human_count() == 1 && ctx.config.supports_participant_count(SEGMENT_MATCH_SIZE)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VeteranStrategy;

impl RankingStrategy for VeteranStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Veteran
    }

    fn calculate_ranking(&self, ctx: &StrategyContext<'_>) -> Result<StrategyOutcome> {
        // No segment probability table exists yet; solo segment matches use the blend
        let segment_match = is_segment_match(ctx);
        if segment_match {
            debug!(
                "Segment match for {}: using veteran blend placement",
                ctx.player.uid
            );
        }

        let skill_factor = ctx.skill_factor();
        let combined = skill_factor * SKILL_WEIGHT + ctx.score_factor() * SCORE_WEIGHT;
        let adjustment = (combined - 0.5) * ADJUSTMENT_SCALE;
        let advisory_rank = clamp_rank(
            ctx.human_rank() as f64 + adjustment,
            ctx.total_participants,
        );

        Ok(StrategyOutcome {
            strategy: StrategyKind::Veteran,
            advisory_rank,
            confidence: confidence(ctx.profile, skill_factor, VETERAN_CONFIDENCE),
            reasoning: reasoning::veteran(ctx, combined, advisory_rank, segment_match),
            relative_performance: ctx.relative_performance(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::Fixture;
    use crate::types::PlayerPerformanceProfile;

    fn veteran_profile(uid: &str) -> PlayerPerformanceProfile {
        PlayerPerformanceProfile {
            total_matches: 40,
            average_rank: 1.5,
            win_rate: 0.6,
            ..PlayerPerformanceProfile::default_for(uid)
        }
    }

    #[test]
    fn test_solo_match_is_segment_match() {
        let fixture = Fixture::with_profiles(
            vec![crate::types::HumanPlayer::new("solo", 1400.0)],
            vec![veteran_profile("solo")],
        );
        let ctx = fixture.context(0, 4);
        assert!(is_segment_match(&ctx));

        let outcome = VeteranStrategy.calculate_ranking(&ctx).unwrap();
        assert_eq!(outcome.advisory_rank, 1);
        assert!(outcome.reasoning.contains("segment"));
    }

    #[test]
    fn test_segment_match_requires_supported_size() {
        let mut fixture = Fixture::with_profiles(
            vec![crate::types::HumanPlayer::new("solo", 1400.0)],
            vec![veteran_profile("solo")],
        );
        fixture.config.supported_participant_counts = vec![6];
        assert!(!is_segment_match(&fixture.context(0, 6)));
    }

    #[test]
    fn test_confidence_uses_veteran_baseline() {
        let fixture = Fixture::with_profiles(
            vec![
                crate::types::HumanPlayer::new("a", 1400.0),
                crate::types::HumanPlayer::new("b", 1300.0),
            ],
            vec![veteran_profile("a"), veteran_profile("b")],
        );
        let outcome = VeteranStrategy
            .calculate_ranking(&fixture.context(0, 4))
            .unwrap();
        // 0.55 + 0.2 (40 matches) + 0.1 (consistency 0.5)
        assert!((outcome.confidence - 0.85).abs() < 1e-9);
        assert_eq!(outcome.advisory_rank, 1);
    }
}
