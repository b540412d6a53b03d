//! Per-engine profile cache
//!
//! A small TTL map keyed by player id. Each engine builds its own instances;
//! nothing here is process-wide.

use crate::error::{RankingError, Result};
use crate::types::PlayerId;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Expiring cache of resolved profiles
#[derive(Debug)]
pub struct ProfileCache<V> {
    entries: RwLock<HashMap<PlayerId, CacheEntry<V>>>,
    ttl: Duration,
    enabled: bool,
}

impl<V: Clone> ProfileCache<V> {
    pub fn new(ttl: Duration, enabled: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            enabled,
        }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Fresh cached value for `uid`, if any
    pub fn get(&self, uid: &str) -> Result<Option<V>> {
        if !self.enabled {
            return Ok(None);
        }

        let entries = self
            .entries
            .read()
            .map_err(|_| RankingError::InternalError {
                message: "Failed to acquire cache read lock".to_string(),
            })?;

        Ok(entries
            .get(uid)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone()))
    }

    /// Store a value, evicting expired entries on the way
    pub fn insert(&self, uid: &str, value: V) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|_| RankingError::InternalError {
                message: "Failed to acquire cache write lock".to_string(),
            })?;

        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            uid.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );

        Ok(())
    }

    /// Drop a single player's entry
    pub fn invalidate(&self, uid: &str) -> Result<bool> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RankingError::InternalError {
                message: "Failed to acquire cache write lock".to_string(),
            })?;

        Ok(entries.remove(uid).is_some())
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache = ProfileCache::new(Duration::from_secs(60), true);
        cache.insert("p1", 42u32).unwrap();

        assert_eq!(cache.get("p1").unwrap(), Some(42));
        assert_eq!(cache.get("p2").unwrap(), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entries_are_misses() {
        let cache = ProfileCache::new(Duration::from_millis(5), true);
        cache.insert("p1", 1u32).unwrap();

        std::thread::sleep(Duration::from_millis(15));
        assert_eq!(cache.get("p1").unwrap(), None);

        cache.insert("p2", 2u32).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = ProfileCache::<u32>::disabled();
        cache.insert("p1", 1).unwrap();

        assert!(cache.is_empty());
        assert_eq!(cache.get("p1").unwrap(), None);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = ProfileCache::new(Duration::from_secs(60), true);
        cache.insert("p1", 1u32).unwrap();
        cache.insert("p2", 2u32).unwrap();

        assert!(cache.invalidate("p1").unwrap());
        assert!(!cache.invalidate("p1").unwrap());

        cache.clear();
        assert!(cache.is_empty());
    }
}
