//! Ranking engine configuration

use crate::error::{RankingError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable thresholds and switches for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Players below this many matches are protected as newbies
    pub newbie_threshold: u32,
    /// Players below this many matches use the growing strategy
    pub growing_threshold: u32,
    /// Minimum matches before a personalized ranking is considered
    pub min_matches_for_personalization: u32,
    /// Enable the personalized strategy for eligible veterans
    pub enable_personalization: bool,
    /// Minimum data quality of a personalization profile (0.0 to 1.0)
    pub min_personalization_data_quality: f64,
    /// Minimum confidence of a personalization profile (0.0 to 1.0)
    pub min_personalization_confidence: f64,
    /// Replace tiered strategies with win-rate control for every player
    pub enable_win_rate_control: bool,
    /// Maximum number of AI opponents per match
    pub max_ai_count: usize,
    /// Maximum humans + AI per match
    pub max_participants: usize,
    /// Match sizes the product supports
    pub supported_participant_counts: Vec<usize>,
    /// How many recent history records to request per player
    pub history_limit: usize,
    /// Below this many records the default profile is used
    pub min_history_records: usize,
    /// Cache resolved profiles inside the engine instance
    pub enable_cache: bool,
    /// Lifetime of cached profiles in seconds
    pub cache_expiration_seconds: u64,
    /// Fixed seed for opponent score jitter (entropy when unset)
    pub random_seed: Option<u64>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            newbie_threshold: 10,
            growing_threshold: 30,
            min_matches_for_personalization: 30,
            enable_personalization: false,
            min_personalization_data_quality: 0.3,
            min_personalization_confidence: 0.3,
            enable_win_rate_control: false,
            max_ai_count: 10,
            max_participants: 16,
            supported_participant_counts: vec![4],
            history_limit: 50,
            min_history_records: 3,
            enable_cache: true,
            cache_expiration_seconds: 300, // 5 minutes
            random_seed: None,
        }
    }
}

impl RankingConfig {
    /// Merge a partial override over this configuration
    pub fn with_overrides(mut self, overrides: RankingConfigOverride) -> Self {
        if let Some(value) = overrides.newbie_threshold {
            self.newbie_threshold = value;
        }
        if let Some(value) = overrides.growing_threshold {
            self.growing_threshold = value;
        }
        if let Some(value) = overrides.min_matches_for_personalization {
            self.min_matches_for_personalization = value;
        }
        if let Some(value) = overrides.enable_personalization {
            self.enable_personalization = value;
        }
        if let Some(value) = overrides.min_personalization_data_quality {
            self.min_personalization_data_quality = value;
        }
        if let Some(value) = overrides.min_personalization_confidence {
            self.min_personalization_confidence = value;
        }
        if let Some(value) = overrides.enable_win_rate_control {
            self.enable_win_rate_control = value;
        }
        if let Some(value) = overrides.max_ai_count {
            self.max_ai_count = value;
        }
        if let Some(value) = overrides.max_participants {
            self.max_participants = value;
        }
        if let Some(value) = overrides.supported_participant_counts {
            self.supported_participant_counts = value;
        }
        if let Some(value) = overrides.history_limit {
            self.history_limit = value;
        }
        if let Some(value) = overrides.min_history_records {
            self.min_history_records = value;
        }
        if let Some(value) = overrides.enable_cache {
            self.enable_cache = value;
        }
        if let Some(value) = overrides.cache_expiration_seconds {
            self.cache_expiration_seconds = value;
        }
        if overrides.random_seed.is_some() {
            self.random_seed = overrides.random_seed;
        }

        self
    }

    /// Get cache expiration as Duration
    pub fn cache_expiration(&self) -> Duration {
        Duration::from_secs(self.cache_expiration_seconds)
    }

    /// Whether a match of this size is a supported product configuration
    pub fn supports_participant_count(&self, count: usize) -> bool {
        self.supported_participant_counts.contains(&count)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.newbie_threshold >= self.growing_threshold {
            return Err(RankingError::ConfigurationError {
                message: "newbie_threshold must be less than growing_threshold".to_string(),
            }
            .into());
        }

        if self.max_participants < 2 {
            return Err(RankingError::ConfigurationError {
                message: "max_participants must be at least 2".to_string(),
            }
            .into());
        }

        if self.max_ai_count >= self.max_participants {
            return Err(RankingError::ConfigurationError {
                message: "max_ai_count must leave room for at least one human".to_string(),
            }
            .into());
        }

        if self.min_history_records == 0 || self.history_limit < self.min_history_records {
            return Err(RankingError::ConfigurationError {
                message: "history_limit must be at least min_history_records (>= 1)".to_string(),
            }
            .into());
        }

        for (name, value) in [
            (
                "min_personalization_data_quality",
                self.min_personalization_data_quality,
            ),
            (
                "min_personalization_confidence",
                self.min_personalization_confidence,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RankingError::ConfigurationError {
                    message: format!("{} must be within [0, 1]", name),
                }
                .into());
            }
        }

        if self.enable_cache && self.cache_expiration_seconds == 0 {
            return Err(RankingError::ConfigurationError {
                message: "cache_expiration_seconds must be greater than 0 when caching is enabled"
                    .to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Partial configuration merged over the defaults at engine construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfigOverride {
    pub newbie_threshold: Option<u32>,
    pub growing_threshold: Option<u32>,
    pub min_matches_for_personalization: Option<u32>,
    pub enable_personalization: Option<bool>,
    pub min_personalization_data_quality: Option<f64>,
    pub min_personalization_confidence: Option<f64>,
    pub enable_win_rate_control: Option<bool>,
    pub max_ai_count: Option<usize>,
    pub max_participants: Option<usize>,
    pub supported_participant_counts: Option<Vec<usize>>,
    pub history_limit: Option<usize>,
    pub min_history_records: Option<usize>,
    pub enable_cache: Option<bool>,
    pub cache_expiration_seconds: Option<u64>,
    pub random_seed: Option<u64>,
}
