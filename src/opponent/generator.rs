//! AI opponent synthesis
//!
//! Humans claim their advisory ranks first; AI opponents fill every rank that
//! is left. Each opponent's score is interpolated between the cohort's highest
//! and lowest scores according to its slot, then jittered.

use crate::error::{RankingError, Result};
use crate::types::{AIOpponent, HumanAnalysis, MatchId, SkillLevel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Largest jitter as a share of the score range or spread
const JITTER: f64 = 0.1;

const ADVANCED_NAMES: [&str; 4] = ["Ace", "Maverick", "Titan", "Nova"];
const INTERMEDIATE_NAMES: [&str; 4] = ["Rook", "Comet", "Falcon", "Juniper"];
const BEGINNER_NAMES: [&str; 4] = ["Pip", "Sprout", "Pebble", "Button"];

/// Ranks in `1..=total_participants` not claimed by a human
///
/// Humans claim in advisory-rank order (input order on ties). A human whose
/// rank is taken moves to the next free rank, wrapping to the lowest free rank
/// when nothing later is open.
pub fn open_slots(advisory_ranks: &[u32], total_participants: usize) -> Vec<u32> {
    let mut claimed = vec![false; total_participants];

    let mut order: Vec<usize> = (0..advisory_ranks.len()).collect();
    order.sort_by_key(|&index| advisory_ranks[index]);

    for index in order {
        let wanted = (advisory_ranks[index].max(1) as usize).min(total_participants.max(1)) - 1;
        let free = (wanted..total_participants)
            .chain(0..wanted)
            .find(|&slot| !claimed[slot]);
        if let Some(slot) = free {
            claimed[slot] = true;
        }
    }

    claimed
        .iter()
        .enumerate()
        .filter(|(_, taken)| !**taken)
        .map(|(slot, _)| slot as u32 + 1)
        .collect()
}

/// Skill label for an opponent at `rank_ratio` (0 = top of the table)
pub fn skill_for_ratio(rank_ratio: f64) -> SkillLevel {
    if rank_ratio <= 0.3 {
        SkillLevel::Advanced
    } else if rank_ratio <= 0.7 {
        SkillLevel::Intermediate
    } else {
        SkillLevel::Beginner
    }
}

/// High and low score bounds used for interpolation
///
/// A cohort with a single distinct score gets a symmetric range of
/// `max(average * 0.6, score * 0.8)` around that score.
pub fn score_bounds(analysis: &HumanAnalysis) -> (f64, f64) {
    let highest = analysis.score_distribution.highest;
    let lowest = analysis.score_distribution.lowest;

    if highest > lowest {
        return (highest, lowest);
    }

    let width = (analysis.average_score * 0.6).max(highest * 0.8);
    let high = highest + width / 2.0;
    let low = (highest - width / 2.0).max(0.0);
    (high, low)
}

/// Generates AI opponents for one request
pub struct OpponentGenerator {
    rng: ChaCha8Rng,
}

impl OpponentGenerator {
    /// Seeded generator when `seed` is set, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    /// Build one opponent per open slot
    pub fn generate(
        &mut self,
        match_id: MatchId,
        advisory_ranks: &[u32],
        total_participants: usize,
        analysis: &HumanAnalysis,
    ) -> Result<Vec<AIOpponent>> {
        let slots = open_slots(advisory_ranks, total_participants);
        let expected = total_participants.saturating_sub(advisory_ranks.len());
        if slots.len() != expected {
            return Err(RankingError::InternalError {
                message: format!(
                    "expected {} open slots for AI opponents, found {}",
                    expected,
                    slots.len()
                ),
            }
            .into());
        }

        let (high, low) = score_bounds(analysis);
        let range = high - low;
        let spread = if analysis.score_variance > 0.0 {
            analysis.score_variance.sqrt()
        } else {
            range / 2.0
        };

        let id_prefix = match_id.simple().to_string();
        let id_prefix = &id_prefix[..8];

        let opponents = slots
            .into_iter()
            .enumerate()
            .map(|(index, target_rank)| {
                let rank_ratio = if total_participants > 1 {
                    f64::from(target_rank - 1) / (total_participants - 1) as f64
                } else {
                    0.0
                };

                let base = high - rank_ratio * range + self.jitter() * range;
                let score = (base + self.jitter() * spread).max(0.0);
                let skill_level = skill_for_ratio(rank_ratio);

                debug!(
                    "AI slot {} (ratio {:.2}): score {:.1}, {}",
                    target_rank, rank_ratio, score, skill_level
                );

                AIOpponent {
                    uid: format!("ai_{}_{}", id_prefix, index + 1),
                    name: opponent_name(skill_level, index),
                    character_id: format!("{}_{:02}", skill_level, index % 4 + 1),
                    score,
                    target_rank,
                    recommended_rank: target_rank,
                    skill_level,
                    description: describe(skill_level).to_string(),
                }
            })
            .collect();

        Ok(opponents)
    }

    fn jitter(&mut self) -> f64 {
        self.rng.gen_range(-JITTER..=JITTER)
    }
}

fn opponent_name(skill_level: SkillLevel, index: usize) -> String {
    let names = match skill_level {
        SkillLevel::Advanced => &ADVANCED_NAMES,
        SkillLevel::Intermediate => &INTERMEDIATE_NAMES,
        SkillLevel::Beginner => &BEGINNER_NAMES,
    };
    format!("{} #{}", names[index % names.len()], index + 1)
}

fn describe(skill_level: SkillLevel) -> &'static str {
    match skill_level {
        SkillLevel::Advanced => "A sharp opponent who rarely misses a scoring chance",
        SkillLevel::Intermediate => "A steady opponent with solid fundamentals",
        SkillLevel::Beginner => "A relaxed opponent still learning the ropes",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScoreDistribution, SkillDistribution};
    use uuid::Uuid;

    fn analysis(highest: f64, lowest: f64, average: f64, variance: f64) -> HumanAnalysis {
        HumanAnalysis {
            average_score: average,
            score_distribution: ScoreDistribution {
                highest,
                lowest,
                median: average,
            },
            skill_distribution: SkillDistribution::default(),
            overall_skill_level: SkillLevel::Beginner,
            score_variance: variance,
        }
    }

    #[test]
    fn test_open_slots_skip_human_ranks() {
        assert_eq!(open_slots(&[2, 3, 1], 6), vec![4, 5, 6]);
        assert_eq!(open_slots(&[1], 4), vec![2, 3, 4]);
        assert_eq!(open_slots(&[4], 4), vec![1, 2, 3]);
    }

    #[test]
    fn test_open_slots_resolve_collisions() {
        // Both humans want rank 1; the second moves to rank 2
        assert_eq!(open_slots(&[1, 1], 4), vec![3, 4]);
        // Collision at the last rank wraps to the lowest free rank
        assert_eq!(open_slots(&[3, 3], 3), vec![2]);
    }

    #[test]
    fn test_skill_labels() {
        assert_eq!(skill_for_ratio(0.0), SkillLevel::Advanced);
        assert_eq!(skill_for_ratio(0.3), SkillLevel::Advanced);
        assert_eq!(skill_for_ratio(0.5), SkillLevel::Intermediate);
        assert_eq!(skill_for_ratio(0.7), SkillLevel::Intermediate);
        assert_eq!(skill_for_ratio(1.0), SkillLevel::Beginner);
    }

    #[test]
    fn test_single_score_bounds() {
        let (high, low) = score_bounds(&analysis(1000.0, 1000.0, 1000.0, 0.0));
        assert_eq!(high, 1400.0);
        assert_eq!(low, 600.0);

        let (high, low) = score_bounds(&analysis(0.0, 0.0, 0.0, 0.0));
        assert_eq!((high, low), (0.0, 0.0));
    }

    #[test]
    fn test_scores_follow_slots() {
        let cohort = analysis(1800.0, 1200.0, 1500.0, 60000.0);
        let mut generator = OpponentGenerator::new(Some(7));
        let opponents = generator
            .generate(Uuid::new_v4(), &[2, 3, 1], 6, &cohort)
            .unwrap();

        assert_eq!(opponents.len(), 3);
        let targets: Vec<u32> = opponents.iter().map(|ai| ai.target_rank).collect();
        assert_eq!(targets, vec![4, 5, 6]);

        for ai in &opponents {
            assert!(ai.score >= 0.0);
            let ratio = f64::from(ai.target_rank - 1) / 5.0;
            let center = 1800.0 - ratio * 600.0;
            // range jitter up to 60, spread jitter up to ~24.5
            assert!((ai.score - center).abs() <= 60.0 + 24.5 + 1e-6);
        }
        assert_eq!(opponents[2].skill_level, SkillLevel::Beginner);
    }

    #[test]
    fn test_seed_makes_scores_reproducible() {
        let cohort = analysis(1800.0, 1200.0, 1500.0, 60000.0);
        let match_id = Uuid::new_v4();

        let first = OpponentGenerator::new(Some(42))
            .generate(match_id, &[1, 2], 8, &cohort)
            .unwrap();
        let second = OpponentGenerator::new(Some(42))
            .generate(match_id, &[1, 2], 8, &cohort)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_scores_never_negative() {
        let cohort = analysis(10.0, 0.0, 5.0, 25.0);
        let opponents = OpponentGenerator::new(Some(3))
            .generate(Uuid::new_v4(), &[1], 10, &cohort)
            .unwrap();
        assert_eq!(opponents.len(), 9);
        assert!(opponents.iter().all(|ai| ai.score >= 0.0));
    }
}
