//! Test fixtures and stub providers for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use podium::error::Result;
use podium::profile::PlayerHistoryProvider;
use podium::types::{HumanPlayer, MatchRecord};
use podium::{InMemoryHistoryProvider, RankingConfig, RankingEngine};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// History provider that counts how often it is called
#[derive(Debug, Default)]
pub struct CountingHistoryProvider {
    inner: InMemoryHistoryProvider,
    calls: AtomicUsize,
}

impl CountingHistoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(uid: &str, records: Vec<MatchRecord>) -> Self {
        let provider = Self::new();
        provider
            .inner
            .set_history(uid, records)
            .expect("history lock poisoned");
        provider
    }

    /// Number of `recent_matches` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerHistoryProvider for CountingHistoryProvider {
    async fn recent_matches(&self, uid: &str, limit: usize) -> Result<Vec<MatchRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.recent_matches(uid, limit).await
    }
}

/// History provider whose backing store is always unreachable
#[derive(Debug, Default)]
pub struct FailingHistoryProvider;

#[async_trait]
impl PlayerHistoryProvider for FailingHistoryProvider {
    async fn recent_matches(&self, uid: &str, _limit: usize) -> Result<Vec<MatchRecord>> {
        Err(anyhow::anyhow!("history store unreachable while reading {}", uid))
    }
}

/// Humans from `(uid, score)` pairs
pub fn humans(players: &[(&str, f64)]) -> Vec<HumanPlayer> {
    players
        .iter()
        .map(|(uid, score)| HumanPlayer::new(*uid, *score))
        .collect()
}

/// The three-player cohort used across scenarios
pub fn three_humans() -> Vec<HumanPlayer> {
    humans(&[("p1", 1500.0), ("p2", 1200.0), ("p3", 1800.0)])
}

/// `count` records, newest first, with scores descending from `latest`
pub fn history(count: usize, latest: f64, rank: u32) -> Vec<MatchRecord> {
    (0..count)
        .map(|i| MatchRecord::new(latest - i as f64 * 5.0, rank))
        .collect()
}

/// Seeded config so opponent scores are reproducible
pub fn seeded_config(seed: u64) -> RankingConfig {
    RankingConfig {
        random_seed: Some(seed),
        ..RankingConfig::default()
    }
}

/// Engine over an empty in-memory history
pub fn empty_engine(config: RankingConfig) -> RankingEngine {
    RankingEngine::new(config, Arc::new(InMemoryHistoryProvider::new()))
        .expect("valid test configuration")
}
