//! Ranking strategies
//!
//! Each strategy turns one human player's profile and the cohort snapshot into
//! an advisory rank. Advisory ranks anchor AI opponent generation; the final
//! delivered rank comes from reconciliation.

pub mod growing;
pub mod newbie;
pub mod personalized;
pub mod selector;
pub mod veteran;
pub mod win_rate;

use crate::analysis::calculator;
use crate::config::RankingConfig;
use crate::error::{RankingError, Result};
use crate::personalization::PersonalizationProfile;
use crate::types::{
    HumanAnalysis, HumanPlayer, PlayerPerformanceProfile, RelativePerformance, StrategyKind,
};

// Re-export commonly used types
pub use growing::GrowingStrategy;
pub use newbie::NewbieStrategy;
pub use personalized::PersonalizedStrategy;
pub use selector::StrategySelector;
pub use veteran::VeteranStrategy;
pub use win_rate::WinRateControlledStrategy;

/// Everything a strategy may look at for one player
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext<'a> {
    pub player: &'a HumanPlayer,
    pub profile: &'a PlayerPerformanceProfile,
    pub analysis: &'a HumanAnalysis,
    /// Humans plus AI opponents in this match
    pub total_participants: usize,
    pub human_players: &'a [HumanPlayer],
    pub config: &'a RankingConfig,
    /// Resolved personalization profile, when personalization was consulted
    pub personalization: Option<&'a PersonalizationProfile>,
}

impl<'a> StrategyContext<'a> {
    pub fn human_rank(&self) -> usize {
        calculator::human_rank(&self.player.uid, self.human_players)
    }

    pub fn human_count(&self) -> usize {
        self.human_players.len()
    }

    pub fn percentile(&self) -> f64 {
        calculator::percentile(self.human_rank(), self.human_count())
    }

    pub fn score_factor(&self) -> f64 {
        calculator::score_factor(self.player.score, self.analysis)
    }

    pub fn skill_factor(&self) -> f64 {
        calculator::skill_factor(self.profile)
    }

    pub fn relative_performance(&self) -> RelativePerformance {
        calculator::relative_performance(self.player.score, self.analysis, self.score_factor())
    }
}

/// Output of a single strategy run
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    pub strategy: StrategyKind,
    /// Rank among all participants before reconciliation (1-based)
    pub advisory_rank: u32,
    pub confidence: f64,
    pub reasoning: String,
    pub relative_performance: RelativePerformance,
}

/// Trait for computing a player's advisory rank
pub trait RankingStrategy: Send + Sync {
    /// Which strategy this is
    fn kind(&self) -> StrategyKind;

    /// Calculate the advisory rank, confidence and explanation for one player
    fn calculate_ranking(&self, ctx: &StrategyContext<'_>) -> Result<StrategyOutcome>;
}

static NEWBIE: NewbieStrategy = NewbieStrategy;
static GROWING: GrowingStrategy = GrowingStrategy;
static VETERAN: VeteranStrategy = VeteranStrategy;
static PERSONALIZED: PersonalizedStrategy = PersonalizedStrategy;
static WIN_RATE_CONTROLLED: WinRateControlledStrategy = WinRateControlledStrategy;

/// Look up the strategy implementing `kind`
pub fn strategy_for(kind: StrategyKind) -> Result<&'static dyn RankingStrategy> {
    match kind {
        StrategyKind::Newbie => Ok(&NEWBIE),
        StrategyKind::Growing => Ok(&GROWING),
        StrategyKind::Veteran => Ok(&VETERAN),
        StrategyKind::Personalized => Ok(&PERSONALIZED),
        StrategyKind::WinRateControlled => Ok(&WIN_RATE_CONTROLLED),
        StrategyKind::Default => Err(RankingError::StrategyFailed {
            reason: "the default ranking has no strategy implementation".to_string(),
        }
        .into()),
    }
}

/// Run the strategy for `kind` against `ctx`
pub fn calculate_ranking(kind: StrategyKind, ctx: &StrategyContext<'_>) -> Result<StrategyOutcome> {
    strategy_for(kind)?.calculate_ranking(ctx)
}
