//! Metrics collection using Prometheus
//!
//! Every engine instance owns its own registry, so counters never leak between
//! engines that live in the same process.

use crate::types::StrategyKind;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of one ranking request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    Fallback,
    Rejected,
}

impl RequestOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Success => "success",
            RequestOutcome::Fallback => "fallback",
            RequestOutcome::Rejected => "rejected",
        }
    }
}

/// Main metrics collector for the ranking engine
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Request-level metrics
    request_metrics: RequestMetrics,

    /// Strategy selection metrics
    strategy_metrics: StrategyMetrics,

    /// Profile cache metrics
    cache_metrics: CacheMetrics,
}

/// Request-level metrics
#[derive(Clone)]
pub struct RequestMetrics {
    /// Ranking requests by outcome
    pub requests_total: IntCounterVec,

    /// Time to produce a ranking result
    pub generation_duration: Histogram,

    /// AI opponents synthesized
    pub ai_opponents_generated_total: IntCounter,
}

/// Strategy selection metrics
#[derive(Clone)]
pub struct StrategyMetrics {
    /// Strategy selections by kind
    pub selections_total: IntCounterVec,

    /// Personalized rankings that fell back to the veteran strategy
    pub personalization_fallbacks_total: IntCounter,
}

/// Profile cache metrics
#[derive(Clone)]
pub struct CacheMetrics {
    /// Cache lookups by cache name and result
    pub lookups_total: IntCounterVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with a private registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let request_metrics = RequestMetrics::new(&registry)?;
        let strategy_metrics = StrategyMetrics::new(&registry)?;
        let cache_metrics = CacheMetrics::new(&registry)?;

        Ok(Self {
            registry,
            request_metrics,
            strategy_metrics,
            cache_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn requests(&self) -> &RequestMetrics {
        &self.request_metrics
    }

    pub fn strategies(&self) -> &StrategyMetrics {
        &self.strategy_metrics
    }

    pub fn cache(&self) -> &CacheMetrics {
        &self.cache_metrics
    }

    /// Record a finished ranking request
    pub fn record_request(&self, outcome: RequestOutcome, duration: Duration) {
        self.request_metrics
            .requests_total
            .with_label_values(&[outcome.as_str()])
            .inc();

        self.request_metrics
            .generation_duration
            .observe(duration.as_secs_f64());
    }

    /// Record AI opponents added to a result
    pub fn record_ai_opponents(&self, count: usize) {
        self.request_metrics
            .ai_opponents_generated_total
            .inc_by(count as u64);
    }

    /// Record the strategy chosen for one player
    pub fn record_strategy(&self, strategy: StrategyKind) {
        self.strategy_metrics
            .selections_total
            .with_label_values(&[strategy.as_str()])
            .inc();
    }

    /// Record a personalized ranking falling back to veteran
    pub fn record_personalization_fallback(&self) {
        self.strategy_metrics.personalization_fallbacks_total.inc();
    }

    /// Record a cache lookup
    pub fn record_cache_lookup(&self, cache: &str, hit: bool) {
        let result = if hit { "hit" } else { "miss" };
        self.cache_metrics
            .lookups_total
            .with_label_values(&[cache, result])
            .inc();
    }

    /// Number of cache lookups with the given result
    pub fn cache_lookups(&self, cache: &str, hit: bool) -> u64 {
        let result = if hit { "hit" } else { "miss" };
        self.cache_metrics
            .lookups_total
            .with_label_values(&[cache, result])
            .get()
    }

    /// Render all metrics in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl RequestMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let requests_total = IntCounterVec::new(
            Opts::new("podium_requests_total", "Ranking requests by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let generation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "podium_generation_duration_seconds",
                "Time to produce a ranking result",
            )
            .buckets(vec![0.0001, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        )?;
        registry.register(Box::new(generation_duration.clone()))?;

        let ai_opponents_generated_total = IntCounter::new(
            "podium_ai_opponents_generated_total",
            "AI opponents synthesized",
        )?;
        registry.register(Box::new(ai_opponents_generated_total.clone()))?;

        Ok(Self {
            requests_total,
            generation_duration,
            ai_opponents_generated_total,
        })
    }
}

impl StrategyMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let selections_total = IntCounterVec::new(
            Opts::new("podium_strategy_selections_total", "Strategy selections"),
            &["strategy"],
        )?;
        registry.register(Box::new(selections_total.clone()))?;

        let personalization_fallbacks_total = IntCounter::new(
            "podium_personalization_fallbacks_total",
            "Personalized rankings replaced by the veteran strategy",
        )?;
        registry.register(Box::new(personalization_fallbacks_total.clone()))?;

        Ok(Self {
            selections_total,
            personalization_fallbacks_total,
        })
    }
}

impl CacheMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let lookups_total = IntCounterVec::new(
            Opts::new("podium_cache_lookups_total", "Profile cache lookups"),
            &["cache", "result"],
        )?;
        registry.register(Box::new(lookups_total.clone()))?;

        Ok(Self { lookups_total })
    }
}
