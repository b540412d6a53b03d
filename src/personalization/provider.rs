//! Personalization profile provider interface and resolution
//!
//! Profiles are only consulted when personalization is enabled. A missing,
//! unreadable or low-quality profile is replaced by a synthetic one, never
//! surfaced as an error.

use crate::config::RankingConfig;
use crate::error::{RankingError, Result};
use crate::metrics::MetricsCollector;
use crate::personalization::profile::PersonalizationProfile;
use crate::personalization::synthetic::synthesize_profile;
use crate::profile::cache::ProfileCache;
use crate::types::PlayerId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

pub(crate) const PERSONALIZATION_CACHE: &str = "personalization";

/// Source of behavioral personalization profiles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonalizationProfileProvider: Send + Sync {
    /// The stored profile for `uid`, if the service has one
    async fn get(&self, uid: &str) -> Result<Option<PersonalizationProfile>>;
}

/// In-memory personalization provider
#[derive(Debug, Default)]
pub struct InMemoryPersonalizationProvider {
    profiles: RwLock<HashMap<PlayerId, PersonalizationProfile>>,
}

impl InMemoryPersonalizationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: HashMap<PlayerId, PersonalizationProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
        }
    }

    pub fn insert(&self, profile: PersonalizationProfile) -> Result<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| RankingError::InternalError {
                message: "Failed to acquire profiles write lock".to_string(),
            })?;

        profiles.insert(profile.uid.clone(), profile);
        Ok(())
    }
}

#[async_trait]
impl PersonalizationProfileProvider for InMemoryPersonalizationProvider {
    async fn get(&self, uid: &str) -> Result<Option<PersonalizationProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| RankingError::InternalError {
                message: "Failed to acquire profiles read lock".to_string(),
            })?;

        Ok(profiles.get(uid).cloned())
    }
}

/// Fetches personalization profiles, falling back to synthetic ones
pub struct PersonalizationResolver {
    provider: Option<Arc<dyn PersonalizationProfileProvider>>,
    cache: ProfileCache<PersonalizationProfile>,
    min_data_quality: f64,
    min_confidence: f64,
    metrics: Arc<MetricsCollector>,
}

impl PersonalizationResolver {
    pub fn new(
        provider: Option<Arc<dyn PersonalizationProfileProvider>>,
        config: &RankingConfig,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            provider,
            cache: ProfileCache::new(config.cache_expiration(), config.enable_cache),
            min_data_quality: config.min_personalization_data_quality,
            min_confidence: config.min_personalization_confidence,
            metrics,
        }
    }

    /// Whether a resolved profile is good enough to drive the personalized strategy
    pub fn is_usable(&self, profile: &PersonalizationProfile) -> bool {
        profile.meets_quality_bar(self.min_data_quality, self.min_confidence)
    }

    /// Stored profile when usable, otherwise the deterministic synthetic one
    pub async fn resolve(&self, uid: &str) -> PersonalizationProfile {
        if self.cache.is_enabled() {
            match self.cache.get(uid) {
                Ok(cached) => {
                    self.metrics
                        .record_cache_lookup(PERSONALIZATION_CACHE, cached.is_some());
                    if let Some(profile) = cached {
                        return profile;
                    }
                }
                Err(e) => warn!("Personalization cache unavailable for {}: {}", uid, e),
            }
        }

        // A failed lookup only degrades this request; the next one asks again.
        let (fetched, cacheable) = match &self.provider {
            Some(provider) => match provider.get(uid).await {
                Ok(profile) => (profile, true),
                Err(e) => {
                    let err = RankingError::PersonalizationUnavailable {
                        uid: uid.to_string(),
                        message: e.to_string(),
                    };
                    warn!("{}, using synthetic profile", err);
                    (None, false)
                }
            },
            None => (None, true),
        };

        let profile = match fetched {
            Some(profile) if self.is_usable(&profile) => profile,
            Some(profile) => {
                debug!(
                    "Personalization profile for {} below quality bar (quality {:.2}, confidence {:.2})",
                    uid, profile.data_quality, profile.confidence
                );
                synthesize_profile(uid)
            }
            None => synthesize_profile(uid),
        };

        if cacheable {
            if let Err(e) = self.cache.insert(uid, profile.clone()) {
                warn!("Failed to cache personalization profile for {}: {}", uid, e);
            }
        }

        profile
    }
}
