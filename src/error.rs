//! Error types for the ranking engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the engine.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ranking scenarios
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Invalid ranking request: {reason}")]
    Validation { reason: String },

    #[error("Match history unavailable for {uid}: {message}")]
    HistoryUnavailable { uid: String, message: String },

    #[error("Personalization profile unavailable for {uid}: {message}")]
    PersonalizationUnavailable { uid: String, message: String },

    #[error("Strategy computation failed: {reason}")]
    StrategyFailed { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal engine error: {message}")]
    InternalError { message: String },
}

impl RankingError {
    /// Shorthand for a validation failure
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Whether this error is caller-facing (validation) rather than internal
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
