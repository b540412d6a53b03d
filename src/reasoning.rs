//! Human-readable explanations
//!
//! Renders the reasoning string attached to every player ranking and the
//! top-level recommendation of a match result.

use crate::personalization::PersonalizationProfile;
use crate::strategy::StrategyContext;
use crate::types::{
    ExperienceTier, HumanAnalysis, PlayerRankingResult, Recommendation, StrategyKind,
};

/// Confidence reported when the engine had to fall back to the default result
pub const DEFAULT_CONFIDENCE: f64 = 0.1;

/// Opening sentence shared by every strategy: score and cohort position
pub fn score_context(ctx: &StrategyContext<'_>) -> String {
    format!(
        "Score {:.0} places {} of {} humans (top {:.0}%, cohort average {:.0}).",
        ctx.player.score,
        ordinal(ctx.human_rank()),
        ctx.human_count(),
        ctx.percentile() * 100.0,
        ctx.analysis.average_score
    )
}

pub fn newbie(ctx: &StrategyContext<'_>, boost: usize, advisory_rank: u32) -> String {
    let protection = if boost > 0 {
        format!(
            "Newbie protection lifts the placement by {} to {}.",
            boost,
            ordinal(advisory_rank as usize)
        )
    } else {
        format!(
            "No newbie boost applies; placement stays {}.",
            ordinal(advisory_rank as usize)
        )
    };

    format!(
        "{} New player with {} recorded matches. {}",
        score_context(ctx),
        ctx.profile.total_matches,
        protection
    )
}

pub fn growing(ctx: &StrategyContext<'_>, combined: f64, advisory_rank: u32) -> String {
    format!(
        "{} Growing player ({} matches, win rate {:.0}%). Score-weighted blend {:.2} suggests {} of {}.",
        score_context(ctx),
        ctx.profile.total_matches,
        ctx.profile.win_rate * 100.0,
        combined,
        ordinal(advisory_rank as usize),
        ctx.total_participants
    )
}

pub fn veteran(
    ctx: &StrategyContext<'_>,
    combined: f64,
    advisory_rank: u32,
    segment_match: bool,
) -> String {
    let mut text = format!(
        "{} Veteran with {} matches, average rank {:.1}, {} trend. Skill-weighted blend {:.2} suggests {} of {}.",
        score_context(ctx),
        ctx.profile.total_matches,
        ctx.profile.average_rank,
        ctx.profile.trend(),
        combined,
        ordinal(advisory_rank as usize),
        ctx.total_participants
    );
    if segment_match {
        text.push_str(" Solo segment match placed with the standard veteran blend.");
    }
    text
}

pub fn personalized(
    ctx: &StrategyContext<'_>,
    profile: &PersonalizationProfile,
    skill_weight: f64,
    score_weight: f64,
    advisory_rank: u32,
) -> String {
    let source = if profile.synthetic {
        "generated"
    } else {
        "stored"
    };

    format!(
        "{} Personalized from a {} profile ({:?} challenge, {:?} style, {:?} focus): skill weight {:.2}, score weight {:.2}, placement {} of {}.",
        score_context(ctx),
        source,
        profile.preferences.challenge_level,
        profile.preferences.competition_style,
        profile.preferences.focus_area,
        skill_weight,
        score_weight,
        ordinal(advisory_rank as usize),
        ctx.total_participants
    )
}

pub fn win_rate(
    ctx: &StrategyContext<'_>,
    tier: ExperienceTier,
    target: f64,
    advisory_rank: u32,
) -> String {
    let current = ctx.profile.win_rate;
    let direction = if current > target {
        "above"
    } else if current < target {
        "below"
    } else {
        "on"
    };

    format!(
        "{} Win-rate control for a {} player: current {:.0}% is {} the {:.0}% target, placement {} of {}.",
        score_context(ctx),
        tier,
        current * 100.0,
        direction,
        target * 100.0,
        ordinal(advisory_rank as usize),
        ctx.total_participants
    )
}

/// Reasoning for a player ranked by the default fallback
pub fn default_player() -> String {
    "Ranking unavailable; players keep their submitted order.".to_string()
}

/// Top-level recommendation summarizing every player ranking
pub fn recommendation(
    rankings: &[PlayerRankingResult],
    analysis: &HumanAnalysis,
    ai_count: usize,
) -> Recommendation {
    let strategy = dominant_strategy(rankings);
    let confidence = if rankings.is_empty() {
        DEFAULT_CONFIDENCE
    } else {
        rankings.iter().map(|r| r.confidence).sum::<f64>() / rankings.len() as f64
    };

    Recommendation {
        strategy: strategy.as_str().to_string(),
        reasoning: format!(
            "Mostly {} rankings for a {} cohort of {} humans (average score {:.0}) against {} AI opponents; mean confidence {:.2}.",
            strategy,
            analysis.overall_skill_level,
            rankings.len(),
            analysis.average_score,
            ai_count,
            confidence
        ),
        confidence: confidence.clamp(0.0, 1.0),
    }
}

/// Recommendation attached to the default fallback result
pub fn default_recommendation() -> Recommendation {
    Recommendation {
        strategy: StrategyKind::Default.as_str().to_string(),
        reasoning: "Ranking could not be computed; returned players in submitted order without AI opponents.".to_string(),
        confidence: DEFAULT_CONFIDENCE,
    }
}

/// Most frequent strategy, earliest first on ties
fn dominant_strategy(rankings: &[PlayerRankingResult]) -> StrategyKind {
    let mut counts: Vec<(StrategyKind, usize)> = Vec::new();
    for ranking in rankings {
        match counts.iter_mut().find(|(kind, _)| *kind == ranking.strategy) {
            Some((_, count)) => *count += 1,
            None => counts.push((ranking.strategy, 1)),
        }
    }

    let mut best: Option<(StrategyKind, usize)> = None;
    for (kind, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((kind, count));
        }
    }

    best.map(|(kind, _)| kind).unwrap_or(StrategyKind::Default)
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::Fixture;
    use crate::types::RelativePerformance;

    fn ranking(uid: &str, strategy: StrategyKind, confidence: f64) -> PlayerRankingResult {
        PlayerRankingResult {
            uid: uid.to_string(),
            score: 1000.0,
            recommended_rank: 1,
            advisory_rank: 1,
            strategy,
            confidence,
            reasoning: String::new(),
            relative_performance: RelativePerformance::Average,
        }
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn test_score_context_mentions_position() {
        let fixture = Fixture::new(&[("p1", 1500.0), ("p2", 1200.0), ("p3", 1800.0)]);
        let text = score_context(&fixture.context(2, 6));
        assert!(text.contains("Score 1800"));
        assert!(text.contains("1st of 3"));
    }

    #[test]
    fn test_recommendation_uses_dominant_strategy() {
        let fixture = Fixture::new(&[("p1", 1500.0)]);
        let rankings = vec![
            ranking("a", StrategyKind::Growing, 0.6),
            ranking("b", StrategyKind::Newbie, 0.4),
            ranking("c", StrategyKind::Newbie, 0.8),
        ];

        let recommendation = recommendation(&rankings, &fixture.analysis, 3);
        assert_eq!(recommendation.strategy, "newbie");
        assert!((recommendation.confidence - 0.6).abs() < 1e-9);
        assert!(recommendation.reasoning.contains("3 AI opponents"));
    }

    #[test]
    fn test_dominant_strategy_tie_keeps_first() {
        let rankings = vec![
            ranking("a", StrategyKind::Veteran, 0.5),
            ranking("b", StrategyKind::Growing, 0.5),
        ];
        assert_eq!(dominant_strategy(&rankings), StrategyKind::Veteran);
        assert_eq!(dominant_strategy(&[]), StrategyKind::Default);
    }

    #[test]
    fn test_default_recommendation() {
        let recommendation = default_recommendation();
        assert_eq!(recommendation.strategy, "default");
        assert_eq!(recommendation.confidence, DEFAULT_CONFIDENCE);
    }
}
