//! Cohort analysis and shared ranking factors
//!
//! This module summarizes the human cohort and provides the score/skill
//! factors, confidence and classification helpers every strategy builds on.

pub mod calculator;
pub mod cohort;

// Re-export commonly used types
pub use calculator::{
    confidence, experience_tier, human_rank, percentile, relative_performance, score_factor,
    skill_factor, ConfidenceBounds,
};
pub use cohort::{analyze_cohort, classify_skill};
