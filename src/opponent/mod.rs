//! AI opponent generation
//!
//! Synthesizes the non-human participants of a match, anchored to the ranks
//! the humans' strategies left open.

pub mod generator;

// Re-export commonly used types
pub use generator::{open_slots, skill_for_ratio, OpponentGenerator};
