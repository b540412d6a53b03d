//! Main application configuration
//!
//! This module defines the configuration of the `podium` binary: service-level
//! settings plus the ranking configuration handed to the engine. Values come
//! from a TOML file or from environment variables with fallback to defaults.

use crate::config::ranking::RankingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub ranking: RankingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "podium".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Parse an optional environment variable into `T`
fn env_value<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {}", key, raw)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Some(name) = env_value("PODIUM_SERVICE_NAME")? {
            config.service.name = name;
        }
        if let Some(log_level) = env_value("PODIUM_LOG_LEVEL")? {
            config.service.log_level = log_level;
        }

        // Ranking settings
        let ranking = &mut config.ranking;
        if let Some(count) = env_value("PODIUM_MAX_AI_COUNT")? {
            ranking.max_ai_count = count;
        }
        if let Some(count) = env_value("PODIUM_MAX_PARTICIPANTS")? {
            ranking.max_participants = count;
        }
        if let Some(enabled) = env_value("PODIUM_ENABLE_PERSONALIZATION")? {
            ranking.enable_personalization = enabled;
        }
        if let Some(enabled) = env_value("PODIUM_ENABLE_WIN_RATE_CONTROL")? {
            ranking.enable_win_rate_control = enabled;
        }
        if let Some(enabled) = env_value("PODIUM_ENABLE_CACHE")? {
            ranking.enable_cache = enabled;
        }
        if let Some(seconds) = env_value("PODIUM_CACHE_EXPIRATION_SECONDS")? {
            ranking.cache_expiration_seconds = seconds;
        }
        if let Some(seed) = env_value("PODIUM_RANDOM_SEED")? {
            ranking.random_seed = Some(seed);
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.ranking.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.service.name, "podium");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_parse_toml_sections() {
        let raw = r#"
            [service]
            log_level = "debug"

            [ranking]
            enable_win_rate_control = true
            max_ai_count = 3
        "#;

        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "podium");
        assert!(config.ranking.enable_win_rate_control);
        assert_eq!(config.ranking.max_ai_count, 3);
        assert!(validate_config(&config).is_ok());
    }
}
