//! Personalized ranking driven by a behavioral profile
//!
//! The profile shifts how much the player's history (skill) and current score
//! count toward the placement, then scales the resulting adjustment for a few
//! preference combinations.
//!
//! | Field | Value | Skill | Score |
//! |---|---|---|---|
//! | challenge level | easy | -0.10 | +0.10 |
//! | | hard | +0.10 | -0.10 |
//! | | extreme | +0.20 | -0.20 |
//! | competition style | conservative | +0.10 | |
//! | | aggressive | | +0.10 |
//! | focus area | ranking | +0.10 | |
//! | | score | | +0.10 |
//! | | improvement | +0.10 | +0.10 |
//! | | fun | -0.05 | +0.05 |
//! | risk tolerance | low | +0.05 | |
//! | | high | | +0.05 |
//! | goal orientation | competitive | +0.10 | |
//! | | mastery | +0.05 | +0.05 |
//! | | social | | +0.05 |
//! | learning style | explorer | | +0.10 |
//! | | achiever | +0.10 | |
//! | | killer | +0.15 | -0.15 |

use crate::analysis::calculator::{confidence, ConfidenceBounds};
use crate::error::{RankingError, Result};
use crate::personalization::profile::{
    AchievementNeed, ChallengeLevel, CompetitionStyle, FocusArea, GoalOrientation, LearningStyle,
    Motivation, Persistence, Progress, RiskTolerance, Stability,
};
use crate::personalization::PersonalizationProfile;
use crate::reasoning;
use crate::strategy::{RankingStrategy, StrategyContext, StrategyOutcome};
use crate::types::{PlayerPerformanceProfile, StrategyKind, TrendDirection};
use crate::utils::clamp_rank;

const MIN_WEIGHT: f64 = 0.1;
const MAX_WEIGHT: f64 = 0.9;
const ADJUSTMENT_SCALE: f64 = 0.5;
/// Largest adjustment as a share of the match size
const MAX_ADJUSTMENT_RATIO: f64 = 0.3;

/// Relative weight of skill and current score in the blend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub skill: f64,
    pub score: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            skill: 0.5,
            score: 0.5,
        }
    }
}

impl BlendWeights {
    fn nudge(&mut self, skill: f64, score: f64) {
        self.skill += skill;
        self.score += score;
    }

    fn clamped(self) -> Self {
        Self {
            skill: self.skill.clamp(MIN_WEIGHT, MAX_WEIGHT),
            score: self.score.clamp(MIN_WEIGHT, MAX_WEIGHT),
        }
    }
}

/// Skill and score weights for a profile
pub fn blend_weights(profile: &PersonalizationProfile) -> BlendWeights {
    let mut weights = BlendWeights::default();

    match profile.preferences.challenge_level {
        ChallengeLevel::Easy => weights.nudge(-0.1, 0.1),
        ChallengeLevel::Medium => {}
        ChallengeLevel::Hard => weights.nudge(0.1, -0.1),
        ChallengeLevel::Extreme => weights.nudge(0.2, -0.2),
    }

    match profile.preferences.competition_style {
        CompetitionStyle::Conservative => weights.nudge(0.1, 0.0),
        CompetitionStyle::Balanced => {}
        CompetitionStyle::Aggressive => weights.nudge(0.0, 0.1),
    }

    match profile.preferences.focus_area {
        FocusArea::Ranking => weights.nudge(0.1, 0.0),
        FocusArea::Score => weights.nudge(0.0, 0.1),
        FocusArea::Improvement => weights.nudge(0.1, 0.1),
        FocusArea::Fun => weights.nudge(-0.05, 0.05),
    }

    match profile.behavior.risk_tolerance {
        RiskTolerance::Low => weights.nudge(0.05, 0.0),
        RiskTolerance::Medium => {}
        RiskTolerance::High => weights.nudge(0.0, 0.05),
    }

    match profile.psychology.goal_orientation {
        GoalOrientation::Competitive => weights.nudge(0.1, 0.0),
        GoalOrientation::Mastery => weights.nudge(0.05, 0.05),
        GoalOrientation::Social => weights.nudge(0.0, 0.05),
    }

    match profile.psychology.learning_style {
        LearningStyle::Explorer => weights.nudge(0.0, 0.1),
        LearningStyle::Achiever => weights.nudge(0.1, 0.0),
        LearningStyle::Killer => weights.nudge(0.15, -0.15),
        LearningStyle::Socializer => {}
    }

    weights.clamped()
}

/// Product of the preference-combination multipliers
pub fn adjustment_multiplier(profile: &PersonalizationProfile) -> f64 {
    let preferences = &profile.preferences;
    let mut multiplier = 1.0;

    if preferences.focus_area == FocusArea::Ranking
        && preferences.challenge_level == ChallengeLevel::Hard
    {
        multiplier *= 0.9;
    }
    if preferences.focus_area == FocusArea::Score
        && preferences.challenge_level == ChallengeLevel::Easy
    {
        multiplier *= 1.1;
    }
    if profile.behavior.persistence == Persistence::Persistent
        && profile.psychology.goal_orientation == GoalOrientation::Competitive
    {
        multiplier *= 1.15;
    }
    if profile.history.stability == Stability::Stable
        && profile.history.progress == Progress::Improving
    {
        multiplier *= 1.1;
    }
    if profile.psychology.motivation == Motivation::Intrinsic
        && profile.psychology.achievement_need == AchievementNeed::High
    {
        multiplier *= 1.05;
    }

    multiplier
}

/// Scale for the blended factor from recent form: steady improvers are
/// boosted, erratic decliners damped
pub fn form_multiplier(profile: &PlayerPerformanceProfile) -> f64 {
    let consistency = profile.consistency();
    match profile.trend() {
        TrendDirection::Improving if consistency >= 0.8 => 1.1,
        TrendDirection::Declining if consistency < 0.5 => 0.95,
        _ => 1.0,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalizedStrategy;

impl RankingStrategy for PersonalizedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Personalized
    }

    fn calculate_ranking(&self, ctx: &StrategyContext<'_>) -> Result<StrategyOutcome> {
        let profile = ctx
            .personalization
            .ok_or_else(|| RankingError::StrategyFailed {
                reason: format!("no personalization profile for {}", ctx.player.uid),
            })?;

        let weights = blend_weights(profile);
        let skill_factor = ctx.skill_factor();
        let mut combined = skill_factor * weights.skill + ctx.score_factor() * weights.score;

        combined *= form_multiplier(ctx.profile);

        let limit = ctx.total_participants as f64 * MAX_ADJUSTMENT_RATIO;
        let adjustment = ((combined - 0.5) * ADJUSTMENT_SCALE * adjustment_multiplier(profile))
            .clamp(-limit, limit);
        let advisory_rank = clamp_rank(
            ctx.human_rank() as f64 + adjustment,
            ctx.total_participants,
        );

        let bounds = ConfidenceBounds::new(0.5 + profile.confidence * 0.1, 0.1, 0.95);

        Ok(StrategyOutcome {
            strategy: StrategyKind::Personalized,
            advisory_rank,
            confidence: confidence(ctx.profile, skill_factor, bounds),
            reasoning: reasoning::personalized(
                ctx,
                profile,
                weights.skill,
                weights.score,
                advisory_rank,
            ),
            relative_performance: ctx.relative_performance(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personalization::profile::{Behavior, HistoryPattern, Preferences, Psychology};
    use crate::strategy::test_support::Fixture;
    use crate::types::HumanPlayer;

    fn neutral_profile() -> PersonalizationProfile {
        PersonalizationProfile {
            uid: "p1".to_string(),
            preferences: Preferences {
                challenge_level: ChallengeLevel::Medium,
                competition_style: CompetitionStyle::Balanced,
                focus_area: FocusArea::Ranking,
            },
            behavior: Behavior {
                risk_tolerance: RiskTolerance::Medium,
                persistence: Persistence::Casual,
            },
            history: HistoryPattern {
                stability: Stability::Volatile,
                progress: Progress::Plateau,
            },
            psychology: Psychology {
                motivation: Motivation::Extrinsic,
                achievement_need: AchievementNeed::Low,
                learning_style: LearningStyle::Socializer,
                goal_orientation: GoalOrientation::Social,
            },
            data_quality: 0.9,
            confidence: 0.8,
            synthetic: false,
        }
    }

    #[test]
    fn test_neutral_weights() {
        let weights = blend_weights(&neutral_profile());
        // ranking focus +0.1 skill, social goal +0.05 score
        assert!((weights.skill - 0.6).abs() < 1e-9);
        assert!((weights.score - 0.55).abs() < 1e-9);
        assert_eq!(adjustment_multiplier(&neutral_profile()), 1.0);
    }

    #[test]
    fn test_skill_heavy_profile_is_clamped() {
        let mut profile = neutral_profile();
        profile.preferences.challenge_level = ChallengeLevel::Extreme;
        profile.preferences.competition_style = CompetitionStyle::Conservative;
        profile.behavior.risk_tolerance = RiskTolerance::Low;
        profile.psychology.goal_orientation = GoalOrientation::Competitive;
        profile.psychology.learning_style = LearningStyle::Killer;

        let weights = blend_weights(&profile);
        assert_eq!(weights.skill, MAX_WEIGHT);
        assert!((weights.score - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_multipliers_combine() {
        let mut profile = neutral_profile();
        profile.preferences.challenge_level = ChallengeLevel::Hard;
        profile.behavior.persistence = Persistence::Persistent;
        profile.psychology.goal_orientation = GoalOrientation::Competitive;

        let expected = 0.9 * 1.15;
        assert!((adjustment_multiplier(&profile) - expected).abs() < 1e-9);
    }

    fn form_profile(consistency: f64, trend: TrendDirection) -> PlayerPerformanceProfile {
        let mut profile = PlayerPerformanceProfile {
            total_matches: 40,
            ..PlayerPerformanceProfile::default_for("p1")
        };
        profile.recent_performance.consistency = consistency;
        profile.recent_performance.trend_direction = trend;
        profile
    }

    #[test]
    fn test_form_multiplier() {
        assert_eq!(form_multiplier(&form_profile(0.85, TrendDirection::Improving)), 1.1);
        assert_eq!(form_multiplier(&form_profile(0.4, TrendDirection::Declining)), 0.95);
        assert_eq!(form_multiplier(&form_profile(0.4, TrendDirection::Improving)), 1.0);
        assert_eq!(form_multiplier(&form_profile(0.85, TrendDirection::Declining)), 1.0);
        assert_eq!(form_multiplier(&form_profile(0.85, TrendDirection::Stable)), 1.0);
    }

    /// Leans fully on the current score with a 1.2705 adjustment multiplier
    fn score_heavy_profile() -> PersonalizationProfile {
        let mut profile = neutral_profile();
        profile.preferences = Preferences {
            challenge_level: ChallengeLevel::Easy,
            competition_style: CompetitionStyle::Aggressive,
            focus_area: FocusArea::Score,
        };
        profile.behavior.risk_tolerance = RiskTolerance::High;
        profile.history = HistoryPattern {
            stability: Stability::Stable,
            progress: Progress::Improving,
        };
        profile.psychology.motivation = Motivation::Intrinsic;
        profile.psychology.achievement_need = AchievementNeed::High;
        profile.psychology.learning_style = LearningStyle::Explorer;
        profile
    }

    fn placement(leader_score: f64, form: PlayerPerformanceProfile) -> u32 {
        let humans = vec![
            HumanPlayer::new("p1", leader_score),
            HumanPlayer::new("p2", 1000.0),
            HumanPlayer::new("p3", 1000.0),
        ];
        let fixture = Fixture::with_profiles(humans, vec![form.clone(), form.clone(), form]);
        let profile = score_heavy_profile();
        let mut ctx = fixture.context(0, 20);
        ctx.personalization = Some(&profile);
        PersonalizedStrategy.calculate_ranking(&ctx).unwrap().advisory_rank
    }

    #[test]
    fn test_steady_improvement_lifts_adjustment() {
        let weights = blend_weights(&score_heavy_profile());
        assert!((weights.skill - 0.4).abs() < 1e-9);
        assert!((weights.score - MAX_WEIGHT).abs() < 1e-9);
        assert!((adjustment_multiplier(&score_heavy_profile()) - 1.2705).abs() < 1e-9);

        // combined 1.1968: adjustment 0.443 stays at rank 1, x1.1 gives 0.519
        assert_eq!(placement(2400.0, form_profile(0.85, TrendDirection::Stable)), 1);
        assert_eq!(placement(2400.0, form_profile(0.85, TrendDirection::Improving)), 2);
    }

    #[test]
    fn test_erratic_decline_damps_adjustment() {
        // combined 1.3226: adjustment 0.523 reaches rank 2, x0.95 gives 0.481
        assert_eq!(placement(6600.0, form_profile(0.4, TrendDirection::Stable)), 2);
        assert_eq!(placement(6600.0, form_profile(0.4, TrendDirection::Declining)), 1);
    }

    #[test]
    fn test_requires_profile() {
        let fixture = Fixture::new(&[("p1", 1000.0)]);
        let ctx = fixture.context(0, 4);
        assert!(PersonalizedStrategy.calculate_ranking(&ctx).is_err());
    }

    #[test]
    fn test_confidence_baseline_tracks_profile_confidence() {
        let fixture = Fixture::new(&[("p1", 1500.0), ("p2", 1200.0)]);
        let profile = neutral_profile();
        let mut ctx = fixture.context(0, 4);
        ctx.personalization = Some(&profile);

        let outcome = PersonalizedStrategy.calculate_ranking(&ctx).unwrap();
        // 0.58 baseline + 0.1 from consistency 0.5
        assert!((outcome.confidence - 0.68).abs() < 1e-9);
        assert!(outcome.reasoning.contains("stored profile"));
    }
}
