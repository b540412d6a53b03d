//! Match history provider interface and implementations
//!
//! The engine never owns match history. A surrounding service supplies it
//! through [`PlayerHistoryProvider`], most recent match first.

use crate::error::{RankingError, Result};
use crate::types::{MatchRecord, PlayerId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Source of historical match records
#[async_trait]
pub trait PlayerHistoryProvider: Send + Sync {
    /// Up to `limit` of the player's most recent matches, newest first
    async fn recent_matches(&self, uid: &str, limit: usize) -> Result<Vec<MatchRecord>>;
}

/// In-memory history provider
#[derive(Debug, Default)]
pub struct InMemoryHistoryProvider {
    history: RwLock<HashMap<PlayerId, Vec<MatchRecord>>>,
}

impl InMemoryHistoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider preloaded with histories (newest first)
    pub fn with_history(history: HashMap<PlayerId, Vec<MatchRecord>>) -> Self {
        Self {
            history: RwLock::new(history),
        }
    }

    /// Replace a player's history (newest first)
    pub fn set_history(&self, uid: impl Into<PlayerId>, records: Vec<MatchRecord>) -> Result<()> {
        let mut history = self
            .history
            .write()
            .map_err(|_| RankingError::InternalError {
                message: "Failed to acquire history write lock".to_string(),
            })?;

        history.insert(uid.into(), records);
        Ok(())
    }

    /// Record a newly finished match as the player's most recent one
    pub fn record_match(&self, uid: &str, record: MatchRecord) -> Result<()> {
        let mut history = self
            .history
            .write()
            .map_err(|_| RankingError::InternalError {
                message: "Failed to acquire history write lock".to_string(),
            })?;

        history.entry(uid.to_string()).or_default().insert(0, record);
        Ok(())
    }

    /// Number of players with any recorded history
    pub fn player_count(&self) -> usize {
        self.history.read().map(|h| h.len()).unwrap_or_default()
    }
}

#[async_trait]
impl PlayerHistoryProvider for InMemoryHistoryProvider {
    async fn recent_matches(&self, uid: &str, limit: usize) -> Result<Vec<MatchRecord>> {
        let history = self
            .history
            .read()
            .map_err(|_| RankingError::InternalError {
                message: "Failed to acquire history read lock".to_string(),
            })?;

        Ok(history
            .get(uid)
            .map(|records| records.iter().take(limit).copied().collect())
            .unwrap_or_default())
    }
}
