//! Discard suggestion for computer players.
//!
//! Isolated tiles near the edge of a suit are the cheapest to give up; tiles
//! that already sit in a pair or next to neighbours score higher.

use crate::tile::{Tile, TileCounts};

const RANK_WEIGHT: [u32; 9] = [1, 2, 3, 4, 5, 4, 3, 2, 1];

fn keep_score(held: &TileCounts, t: Tile) -> u32 {
    let mut score = 5 * held.get(t) as u32 + RANK_WEIGHT[t.rank() as usize - 1];
    // neighbours count once however many copies are held
    for (other, _) in held.iter().filter(|(o, _)| o.same_suit(t)) {
        score += match other.rank().abs_diff(t.rank()) {
            1 => 10,
            2 => 5,
            _ => 0,
        };
    }
    score
}

/// Every held tile sharing the lowest keep score, ascending. Empty only for
/// an empty hand.
pub fn discard_candidates(held: &TileCounts) -> Vec<Tile> {
    let scored: Vec<(Tile, u32)> = held.iter().map(|(t, _)| (t, keep_score(held, t))).collect();
    let Some(min) = scored.iter().map(|&(_, s)| s).min() else {
        return vec![];
    };
    let picks: Vec<Tile> = scored
        .into_iter()
        .filter(|&(_, s)| s == min)
        .map(|(t, _)| t)
        .collect();
    tracing::trace!(hand = %held, min, ?picks, "discard candidates");
    picks
}
