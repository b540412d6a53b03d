//! Player personalization profiles
//!
//! Behavioral profiles consumed by the personalized ranking strategy, the
//! provider interface that supplies them, and the uid-seeded generator used
//! when no usable profile exists.

pub mod profile;
pub mod provider;
pub mod synthetic;

// Re-export commonly used types
pub use profile::PersonalizationProfile;
pub use provider::{
    InMemoryPersonalizationProvider, PersonalizationProfileProvider, PersonalizationResolver,
};
pub use synthetic::synthesize_profile;
