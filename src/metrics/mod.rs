//! Metrics for the ranking engine
//!
//! Counters and histograms covering request outcomes, strategy selection
//! and profile cache effectiveness.

pub mod collector;

pub use collector::{
    CacheMetrics, MetricsCollector, MetricsTimer, RequestMetrics, RequestOutcome, StrategyMetrics,
};
