//! Configuration management for the ranking engine
//!
//! This module handles configuration loading from files and environment
//! variables, validation, and default values.

pub mod app;
pub mod ranking;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use ranking::{RankingConfig, RankingConfigOverride};
