//! Ranking engine orchestration
//!
//! [`RankingEngine`] validates a request, resolves every human's profile,
//! runs the selected strategy per player, generates AI opponents around the
//! advisory ranks and reconciles the final ranking. Validation errors are
//! returned to the caller; any later failure yields the default result.

use crate::analysis::analyze_cohort;
use crate::config::{RankingConfig, RankingConfigOverride};
use crate::error::{RankingError, Result};
use crate::metrics::{MetricsCollector, RequestOutcome};
use crate::opponent::OpponentGenerator;
use crate::personalization::{PersonalizationProfileProvider, PersonalizationResolver};
use crate::profile::{PlayerHistoryProvider, ProfileResolver};
use crate::reasoning;
use crate::reconcile::reconcile;
use crate::strategy::{self, StrategyContext, StrategyOutcome, StrategySelector};
use crate::types::{
    HumanPlayer, MatchContext, MatchRankingResult, PlayerRankingResult, RankingMode,
    RelativePerformance, SkillLevel, StrategyKind,
};
use crate::utils::{current_timestamp, generate_match_id, mean};
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Rank recommendation and opponent calibration engine
pub struct RankingEngine {
    config: RankingConfig,
    profiles: ProfileResolver,
    personalization: PersonalizationResolver,
    selector: StrategySelector,
    metrics: Arc<MetricsCollector>,
}

impl RankingEngine {
    /// Create an engine with its own metrics registry
    pub fn new(config: RankingConfig, history: Arc<dyn PlayerHistoryProvider>) -> Result<Self> {
        let metrics = Arc::new(MetricsCollector::new()?);
        Self::with_metrics(config, history, metrics)
    }

    /// Create an engine from default configuration with `overrides` merged in
    pub fn with_overrides(
        overrides: RankingConfigOverride,
        history: Arc<dyn PlayerHistoryProvider>,
    ) -> Result<Self> {
        Self::new(RankingConfig::default().with_overrides(overrides), history)
    }

    /// Create an engine reporting into an existing metrics collector
    pub fn with_metrics(
        config: RankingConfig,
        history: Arc<dyn PlayerHistoryProvider>,
        metrics: Arc<MetricsCollector>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            profiles: ProfileResolver::new(history, &config, metrics.clone()),
            personalization: PersonalizationResolver::new(None, &config, metrics.clone()),
            selector: StrategySelector::new(&config),
            metrics,
            config,
        })
    }

    /// Attach the personalization profile service
    pub fn with_personalization_provider(
        mut self,
        provider: Arc<dyn PersonalizationProfileProvider>,
    ) -> Self {
        self.personalization =
            PersonalizationResolver::new(Some(provider), &self.config, self.metrics.clone());
        self
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    /// Drop a player's cached performance profile
    pub fn invalidate_player(&self, uid: &str) -> Result<bool> {
        self.profiles.invalidate(uid)
    }

    /// Check a request against the configured limits
    pub fn validate_inputs(&self, humans: &[HumanPlayer], ai_count: usize) -> Result<()> {
        if humans.is_empty() {
            return Err(RankingError::validation("at least one human player is required").into());
        }

        if ai_count > self.config.max_ai_count {
            return Err(RankingError::validation(format!(
                "ai_count {} exceeds the maximum of {}",
                ai_count, self.config.max_ai_count
            ))
            .into());
        }

        let total = humans.len() + ai_count;
        if total > self.config.max_participants {
            return Err(RankingError::validation(format!(
                "{} participants exceed the maximum of {}",
                total, self.config.max_participants
            ))
            .into());
        }

        let mut seen = HashSet::with_capacity(humans.len());
        for player in humans {
            if !player.score.is_finite() {
                return Err(RankingError::validation(format!(
                    "score {} for player {} must be a finite number",
                    player.score, player.uid
                ))
                .into());
            }
            if !seen.insert(player.uid.as_str()) {
                return Err(RankingError::validation(format!(
                    "duplicate player uid {}",
                    player.uid
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Recommend ranks for `humans` and generate `ai_count` opponents
    ///
    /// Only validation errors are returned. Failures while computing the
    /// ranking are logged and produce [`RankingEngine::default_result`].
    pub async fn generate_match_rankings(
        &self,
        humans: &[HumanPlayer],
        ai_count: usize,
    ) -> Result<MatchRankingResult> {
        let timer = self.metrics.start_timer();

        if let Err(e) = self.validate_inputs(humans, ai_count) {
            warn!("Rejected ranking request: {}", e);
            self.metrics
                .record_request(RequestOutcome::Rejected, timer.stop());
            return Err(e);
        }

        match self.compute_rankings(humans, ai_count).await {
            Ok(result) => {
                info!(
                    "Ranked match {}: {} humans, {} AI, strategy {} (confidence {:.2})",
                    result.match_context.match_id,
                    result.match_context.human_count,
                    result.match_context.ai_count,
                    result.recommendation.strategy,
                    result.recommendation.confidence
                );
                self.metrics.record_ai_opponents(result.ai_opponents.len());
                self.metrics
                    .record_request(RequestOutcome::Success, timer.stop());
                Ok(result)
            }
            Err(e) => {
                error!(
                    "Ranking failed for {} humans, returning default result: {:#}",
                    humans.len(),
                    e
                );
                self.metrics
                    .record_request(RequestOutcome::Fallback, timer.stop());
                Ok(self.default_result(humans))
            }
        }
    }

    /// Degraded result: humans keep their input order, no AI opponents
    pub fn default_result(&self, humans: &[HumanPlayer]) -> MatchRankingResult {
        let human_player_rankings = humans
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerRankingResult {
                uid: player.uid.clone(),
                score: player.score,
                recommended_rank: index as u32 + 1,
                advisory_rank: index as u32 + 1,
                strategy: StrategyKind::Default,
                confidence: reasoning::DEFAULT_CONFIDENCE,
                reasoning: reasoning::default_player(),
                relative_performance: RelativePerformance::Average,
            })
            .collect();

        let scores: Vec<f64> = humans.iter().map(|p| p.score).collect();

        MatchRankingResult {
            human_player_rankings,
            ai_opponents: Vec::new(),
            match_context: MatchContext {
                match_id: generate_match_id(),
                total_participants: humans.len(),
                human_count: humans.len(),
                ai_count: 0,
                mode: RankingMode::Default,
                average_human_score: mean(&scores),
                overall_skill_level: SkillLevel::Beginner,
                strategies_used: vec![StrategyKind::Default],
                generated_at: current_timestamp(),
            },
            recommendation: reasoning::default_recommendation(),
        }
    }

    async fn compute_rankings(
        &self,
        humans: &[HumanPlayer],
        ai_count: usize,
    ) -> Result<MatchRankingResult> {
        let match_id = generate_match_id();
        let total_participants = humans.len() + ai_count;

        let profiles =
            try_join_all(humans.iter().map(|player| self.profiles.resolve(&player.uid))).await?;
        let analysis = analyze_cohort(humans, &profiles, &self.config);

        debug!(
            "Match {}: cohort average {:.1}, variance {:.1}, skill {}",
            match_id, analysis.average_score, analysis.score_variance, analysis.overall_skill_level
        );

        let mut rankings = Vec::with_capacity(humans.len());
        for (player, profile) in humans.iter().zip(&profiles) {
            let personalization = if self.selector.wants_personalization(profile) {
                Some(self.personalization.resolve(&player.uid).await)
            } else {
                None
            };

            let kind = self.selector.select(profile, personalization.as_ref());
            let ctx = StrategyContext {
                player,
                profile,
                analysis: &analysis,
                total_participants,
                human_players: humans,
                config: &self.config,
                personalization: personalization.as_ref(),
            };

            let outcome = self.run_strategy(kind, &ctx)?;
            debug!(
                "Player {}: strategy {}, advisory rank {}, confidence {:.2}",
                player.uid, outcome.strategy, outcome.advisory_rank, outcome.confidence
            );
            self.metrics.record_strategy(outcome.strategy);

            rankings.push(PlayerRankingResult {
                uid: player.uid.clone(),
                score: player.score,
                recommended_rank: outcome.advisory_rank,
                advisory_rank: outcome.advisory_rank,
                strategy: outcome.strategy,
                confidence: outcome.confidence.clamp(0.0, 1.0),
                reasoning: outcome.reasoning,
                relative_performance: outcome.relative_performance,
            });
        }

        let advisory_ranks: Vec<u32> = rankings.iter().map(|r| r.advisory_rank).collect();
        let mut ai_opponents = OpponentGenerator::new(self.config.random_seed).generate(
            match_id,
            &advisory_ranks,
            total_participants,
            &analysis,
        )?;

        reconcile(&mut rankings, &mut ai_opponents);

        let mut strategies_used: Vec<StrategyKind> = Vec::new();
        for ranking in &rankings {
            if !strategies_used.contains(&ranking.strategy) {
                strategies_used.push(ranking.strategy);
            }
        }

        let mode = if self.config.enable_win_rate_control {
            RankingMode::WinRateControl
        } else {
            RankingMode::Standard
        };

        Ok(MatchRankingResult {
            recommendation: reasoning::recommendation(&rankings, &analysis, ai_opponents.len()),
            match_context: MatchContext {
                match_id,
                total_participants,
                human_count: humans.len(),
                ai_count: ai_opponents.len(),
                mode,
                average_human_score: analysis.average_score,
                overall_skill_level: analysis.overall_skill_level,
                strategies_used,
                generated_at: current_timestamp(),
            },
            human_player_rankings: rankings,
            ai_opponents,
        })
    }

    /// Run a strategy, falling back to veteran when personalization fails
    fn run_strategy(&self, kind: StrategyKind, ctx: &StrategyContext<'_>) -> Result<StrategyOutcome> {
        match strategy::calculate_ranking(kind, ctx) {
            Ok(outcome) => Ok(outcome),
            Err(e) if kind == StrategyKind::Personalized => {
                warn!(
                    "Personalized ranking failed for {}, using veteran: {}",
                    ctx.player.uid, e
                );
                self.metrics.record_personalization_fallback();
                strategy::calculate_ranking(StrategyKind::Veteran, ctx)
            }
            Err(e) => Err(e),
        }
    }
}
