//! Podium - rank recommendation and AI opponent calibration
//!
//! This crate recommends finishing ranks for human players in asynchronous
//! matches, synthesizes AI opponents around them and reconciles one final
//! ranking across every participant.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod opponent;
pub mod personalization;
pub mod profile;
pub mod reasoning;
pub mod reconcile;
pub mod strategy;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use config::{RankingConfig, RankingConfigOverride};
pub use engine::RankingEngine;
pub use personalization::{
    InMemoryPersonalizationProvider, PersonalizationProfile, PersonalizationProfileProvider,
};
pub use profile::{InMemoryHistoryProvider, PlayerHistoryProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
