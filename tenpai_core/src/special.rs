use crate::tile::{Tile, TileCounts};
use crate::yaku::Yaku;

/// Minimum copies of each rank, 1 through 9, for the nine gates shape.
const NINE_GATES: [u8; 9] = [3, 1, 1, 1, 1, 1, 1, 1, 3];

pub fn is_special(y: Yaku) -> bool {
    matches!(
        y,
        Yaku::AllTerminals
            | Yaku::BlessingOfHeaven
            | Yaku::BlessingOfEarth
            | Yaku::FourClosedTriplets
            | Yaku::NineGates
    )
}

/// Full Flush, or Nine Gates when the single-suit hand also fits the gates.
pub fn flush(ready: &TileCounts, win_tile: Tile) -> Option<Yaku> {
    let suit = win_tile.suit();
    if !ready.iter().all(|(t, _)| t.suit() == suit) {
        return None;
    }

    let finished = ready.with(win_tile);
    let gates = NINE_GATES
        .iter()
        .zip(1..)
        .all(|(&min, rank)| finished.get(Tile::new(suit, rank)) >= min);

    Some(if gates { Yaku::NineGates } else { Yaku::FullFlush })
}

/// Special hands do not stack with ordinary ones: when any is present
/// only the special hands remain.
pub fn apply_override(yaku: Vec<Yaku>) -> Vec<Yaku> {
    if yaku.iter().copied().any(is_special) {
        yaku.into_iter().filter(|&y| is_special(y)).collect()
    } else {
        yaku
    }
}
