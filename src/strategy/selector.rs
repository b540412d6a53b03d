//! Strategy selection by experience tier and configuration

use crate::analysis::calculator::experience_tier;
use crate::config::RankingConfig;
use crate::personalization::PersonalizationProfile;
use crate::types::{ExperienceTier, PlayerPerformanceProfile, StrategyKind};

/// Picks the ranking strategy for each player
#[derive(Debug, Clone)]
pub struct StrategySelector {
    config: RankingConfig,
}

impl StrategySelector {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Whether a personalization profile should be fetched for this player
    pub fn wants_personalization(&self, profile: &PlayerPerformanceProfile) -> bool {
        self.config.enable_personalization
            && !self.config.enable_win_rate_control
            && experience_tier(profile.total_matches, &self.config) == ExperienceTier::Veteran
            && profile.total_matches >= self.config.min_matches_for_personalization
    }

    /// Strategy for a player given their profile and, if fetched, their
    /// personalization profile
    pub fn select(
        &self,
        profile: &PlayerPerformanceProfile,
        personalization: Option<&PersonalizationProfile>,
    ) -> StrategyKind {
        if self.config.enable_win_rate_control {
            return StrategyKind::WinRateControlled;
        }

        match experience_tier(profile.total_matches, &self.config) {
            ExperienceTier::Newbie => StrategyKind::Newbie,
            ExperienceTier::Growing => StrategyKind::Growing,
            ExperienceTier::Veteran => {
                let usable = personalization.is_some_and(|p| {
                    p.meets_quality_bar(
                        self.config.min_personalization_data_quality,
                        self.config.min_personalization_confidence,
                    )
                });

                if usable && self.wants_personalization(profile) {
                    StrategyKind::Personalized
                } else {
                    StrategyKind::Veteran
                }
            }
        }
    }
}
