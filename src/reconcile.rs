//! Final rank reconciliation
//!
//! Merges humans (input order) and AI opponents (generation order), sorts the
//! combined list by score descending with ties kept in insertion order, and
//! overwrites every delivered rank with its position 1..N.

use crate::types::{AIOpponent, PlayerRankingResult};

#[derive(Debug, Clone, Copy)]
enum Participant {
    Human(usize),
    Ai(usize),
}

/// Assign final ranks to every participant in place
pub fn reconcile(humans: &mut [PlayerRankingResult], opponents: &mut [AIOpponent]) {
    let mut order: Vec<(f64, Participant)> = humans
        .iter()
        .enumerate()
        .map(|(index, h)| (h.score, Participant::Human(index)))
        .chain(
            opponents
                .iter()
                .enumerate()
                .map(|(index, ai)| (ai.score, Participant::Ai(index))),
        )
        .collect();

    // sort_by is stable
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (position, (_, participant)) in order.into_iter().enumerate() {
        let rank = position as u32 + 1;
        match participant {
            Participant::Human(index) => humans[index].recommended_rank = rank,
            Participant::Ai(index) => opponents[index].recommended_rank = rank,
        }
    }
}
