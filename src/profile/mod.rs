//! Player performance profiling
//!
//! This module provides the history provider interface, the per-engine
//! profile cache, and the resolver that summarizes match history.

pub mod cache;
pub mod provider;
pub mod resolver;

// Re-export commonly used types
pub use cache::ProfileCache;
pub use provider::{InMemoryHistoryProvider, PlayerHistoryProvider};
pub use resolver::{build_profile, ProfileResolver};
