//! Performance profile resolution
//!
//! Turns a player's raw match history into a [`PlayerPerformanceProfile`],
//! consulting the engine's private cache first.

use crate::config::RankingConfig;
use crate::error::{RankingError, Result};
use crate::metrics::MetricsCollector;
use crate::profile::cache::ProfileCache;
use crate::profile::provider::PlayerHistoryProvider;
use crate::types::{MatchRecord, PlayerPerformanceProfile, RecentPerformance, TrendDirection};
use crate::utils::mean;
use std::sync::Arc;
use tracing::debug;

/// Matches compared on each side of the trend window
const TREND_WINDOW: usize = 5;
/// Relative change of the recent window that counts as a trend
const TREND_THRESHOLD: f64 = 0.1;
/// Per-match decay applied to older scores in the consistency estimate
const CONSISTENCY_DECAY: f64 = 0.9;

pub(crate) const PERFORMANCE_CACHE: &str = "performance";

/// Resolves and caches performance profiles for one engine instance
pub struct ProfileResolver {
    provider: Arc<dyn PlayerHistoryProvider>,
    cache: ProfileCache<PlayerPerformanceProfile>,
    history_limit: usize,
    min_history_records: usize,
    metrics: Arc<MetricsCollector>,
}

impl ProfileResolver {
    pub fn new(
        provider: Arc<dyn PlayerHistoryProvider>,
        config: &RankingConfig,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            provider,
            cache: ProfileCache::new(config.cache_expiration(), config.enable_cache),
            history_limit: config.history_limit,
            min_history_records: config.min_history_records,
            metrics,
        }
    }

    /// Resolve a player's profile, fetching history on a cache miss
    pub async fn resolve(&self, uid: &str) -> Result<PlayerPerformanceProfile> {
        if self.cache.is_enabled() {
            let cached = self.cache.get(uid)?;
            self.metrics
                .record_cache_lookup(PERFORMANCE_CACHE, cached.is_some());
            if let Some(profile) = cached {
                debug!("Performance profile cache hit for {}", uid);
                return Ok(profile);
            }
        }

        let records = self
            .provider
            .recent_matches(uid, self.history_limit)
            .await
            .map_err(|e| RankingError::HistoryUnavailable {
                uid: uid.to_string(),
                message: e.to_string(),
            })?;

        let profile = build_profile(uid, &records, self.min_history_records);
        debug!(
            "Resolved profile for {}: {} matches, win rate {:.2}, trend {}",
            uid,
            profile.total_matches,
            profile.win_rate,
            profile.trend()
        );

        self.cache.insert(uid, profile.clone())?;
        Ok(profile)
    }

    /// Drop a player's cached profile (e.g. after they finish a match)
    pub fn invalidate(&self, uid: &str) -> Result<bool> {
        self.cache.invalidate(uid)
    }

    pub fn cached_profiles(&self) -> usize {
        self.cache.len()
    }
}

/// Summarize match history (newest first) into a profile
pub fn build_profile(
    uid: &str,
    records: &[MatchRecord],
    min_history_records: usize,
) -> PlayerPerformanceProfile {
    if records.len() < min_history_records.max(1) {
        return PlayerPerformanceProfile::default_for(uid);
    }

    let total = records.len();
    let scores: Vec<f64> = records.iter().map(|r| r.score).collect();
    let ranks: Vec<f64> = records.iter().map(|r| r.rank as f64).collect();
    let wins = records.iter().filter(|r| r.is_win()).count();

    PlayerPerformanceProfile {
        uid: uid.to_string(),
        average_score: mean(&scores),
        average_rank: mean(&ranks),
        win_rate: wins as f64 / total as f64,
        total_matches: total as u32,
        recent_performance: RecentPerformance {
            last_10_matches: scores.iter().take(10).copied().collect(),
            trend_direction: calculate_trend(&scores),
            consistency: calculate_consistency(&scores),
        },
    }
}

/// Compare the newest five scores against the (up to) five before them
pub fn calculate_trend(scores: &[f64]) -> TrendDirection {
    if scores.len() <= TREND_WINDOW {
        return TrendDirection::Stable;
    }

    let recent = mean(&scores[..TREND_WINDOW]);
    let older_end = scores.len().min(TREND_WINDOW * 2);
    let older = mean(&scores[TREND_WINDOW..older_end]);

    if older <= 0.0 {
        return TrendDirection::Stable;
    }

    if recent > older * (1.0 + TREND_THRESHOLD) {
        TrendDirection::Improving
    } else if recent < older * (1.0 - TREND_THRESHOLD) {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Time-decayed consistency in [0, 1], newest score first
pub fn calculate_consistency(scores: &[f64]) -> f64 {
    let average = mean(scores);
    if scores.is_empty() || average <= 0.0 {
        return 0.5;
    }

    let weights: Vec<f64> = (0..scores.len())
        .map(|i| CONSISTENCY_DECAY.powi(i as i32))
        .collect();
    let weight_sum: f64 = weights.iter().sum();

    let weighted_mean = scores
        .iter()
        .zip(&weights)
        .map(|(s, w)| s * w)
        .sum::<f64>()
        / weight_sum;
    let weighted_variance = scores
        .iter()
        .zip(&weights)
        .map(|(s, w)| w * (s - weighted_mean).powi(2))
        .sum::<f64>()
        / weight_sum;

    let base = 1.0 - weighted_variance.sqrt() / average;

    let max = scores.iter().copied().fold(f64::MIN, f64::max);
    let min = scores.iter().copied().fold(f64::MAX, f64::min);
    let range_ratio = (max - min) / average;
    let correction = (1.0 - (range_ratio - 0.5) * 0.3).clamp(0.5, 1.2);

    (base * correction).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::provider::InMemoryHistoryProvider;

    fn records(scores: &[f64], ranks: &[u32]) -> Vec<MatchRecord> {
        scores
            .iter()
            .zip(ranks)
            .map(|(s, r)| MatchRecord::new(*s, *r))
            .collect()
    }

    #[test]
    fn test_sparse_history_uses_default_profile() {
        let profile = build_profile("p1", &records(&[1200.0, 900.0], &[1, 2]), 3);
        assert_eq!(profile, PlayerPerformanceProfile::default_for("p1"));
        assert_eq!(profile.average_score, 1000.0);
        assert_eq!(profile.win_rate, 0.25);
    }

    #[test]
    fn test_basic_statistics() {
        let profile = build_profile(
            "p1",
            &records(&[1000.0, 1200.0, 800.0, 1000.0], &[1, 2, 1, 4]),
            3,
        );

        assert_eq!(profile.total_matches, 4);
        assert_eq!(profile.win_rate, 0.5);
        assert_eq!(profile.average_score, 1000.0);
        assert_eq!(profile.average_rank, 2.0);
        assert_eq!(profile.recent_performance.last_10_matches.len(), 4);
    }

    #[test]
    fn test_trend_detection() {
        let improving = [1300.0, 1300.0, 1300.0, 1300.0, 1300.0, 1000.0, 1000.0, 1000.0];
        assert_eq!(calculate_trend(&improving), TrendDirection::Improving);

        let declining = [800.0, 800.0, 800.0, 800.0, 800.0, 1000.0, 1000.0];
        assert_eq!(calculate_trend(&declining), TrendDirection::Declining);

        let stable = [1000.0, 1050.0, 980.0, 1000.0, 1020.0, 1000.0, 990.0];
        assert_eq!(calculate_trend(&stable), TrendDirection::Stable);

        assert_eq!(
            calculate_trend(&[2000.0, 2000.0, 2000.0, 2000.0, 2000.0]),
            TrendDirection::Stable
        );
    }

    #[test]
    fn test_consistency_bounds() {
        let steady = calculate_consistency(&[1000.0; 12]);
        assert!(steady > 0.99);

        let erratic = calculate_consistency(&[100.0, 3000.0, 50.0, 2800.0, 10.0]);
        assert!((0.0..=1.0).contains(&erratic));
        assert!(erratic < steady);

        assert_eq!(calculate_consistency(&[0.0, 0.0, 0.0]), 0.5);
    }

    #[tokio::test]
    async fn test_resolver_uses_cache() {
        let provider = Arc::new(InMemoryHistoryProvider::new());
        provider
            .set_history("p1", records(&[1000.0, 1100.0, 900.0], &[1, 2, 3]))
            .unwrap();

        let metrics = Arc::new(MetricsCollector::new().unwrap());
        let resolver = ProfileResolver::new(
            provider.clone(),
            &RankingConfig::default(),
            metrics.clone(),
        );

        let first = resolver.resolve("p1").await.unwrap();
        assert_eq!(resolver.cached_profiles(), 1);
        provider.record_match("p1", MatchRecord::new(5000.0, 1)).unwrap();
        let second = resolver.resolve("p1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(metrics.cache_lookups(PERFORMANCE_CACHE, true), 1);
        assert_eq!(metrics.cache_lookups(PERFORMANCE_CACHE, false), 1);

        assert!(resolver.invalidate("p1").unwrap());
        let third = resolver.resolve("p1").await.unwrap();
        assert_eq!(third.total_matches, 4);
    }
}
