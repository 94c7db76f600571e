use crate::decompose::candidates;
use crate::tile::{Tile, TileCounts};
use std::collections::{BTreeMap, BTreeSet};

/// Tiles that would complete `concealed`. A tile already held four times
/// cannot be drawn again, so it never appears.
pub fn winnable_tiles(concealed: &TileCounts) -> BTreeSet<Tile> {
    assert!(
        concealed.is_concealed_size(),
        "winnable_tiles: hand of {} tiles is not a waiting size",
        concealed.total()
    );

    candidates(concealed)
        .flat_map(|c| c.winnable)
        .filter(|&t| concealed.get(t) < 4)
        .collect()
}

/// Discards that leave `held` one tile from winning, with the tiles each
/// would wait on. A discard is dropped entirely when any of its completing
/// tiles is already in `discarded`.
pub fn reachable_discards(held: &TileCounts, discarded: &TileCounts) -> BTreeMap<Tile, BTreeSet<Tile>> {
    assert!(
        held.is_drawn_size(),
        "reachable_discards: hand of {} tiles is not a post-draw size",
        held.total()
    );

    held.iter()
        .filter_map(|(tile, _)| {
            let waits = waits_after_discard(held, discarded, tile)?;
            (!waits.is_empty()).then_some((tile, waits))
        })
        .collect()
}

// None when the discard would leave a wait on a discarded tile
fn waits_after_discard(held: &TileCounts, discarded: &TileCounts, tile: Tile) -> Option<BTreeSet<Tile>> {
    let rest = held.without(tile);
    let mut waits = BTreeSet::new();
    for c in candidates(&rest) {
        for &t in c.winnable.iter() {
            if discarded.get(t) > 0 {
                return None;
            }
            if held.get(t) < 4 {
                waits.insert(t);
            }
        }
    }
    Some(waits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(code: &str) -> TileCounts {
        TileCounts::parse(code).unwrap()
    }

    fn ids(set: &BTreeSet<Tile>) -> Vec<u8> {
        set.iter().map(|t| t.id()).collect()
    }

    fn reachable(held: &str, discarded: &str) -> Vec<(u8, Vec<u8>)> {
        reachable_discards(&counts(held), &counts(discarded))
            .iter()
            .map(|(t, w)| (t.id(), ids(w)))
            .collect()
    }

    #[test]
    fn two_sided_wait() {
        assert_eq!(ids(&winnable_tiles(&counts("1234"))), vec![1, 4]);
    }

    #[test]
    fn exhausted_ends_leave_nothing() {
        assert!(winnable_tiles(&counts("1111234444")).is_empty());
    }

    #[test]
    fn never_a_fifth_copy() {
        for code in ["1111234", "A1112345678999", "2222345", "A11112345678C99"] {
            let c = counts(code);
            assert!(winnable_tiles(&c).iter().all(|&t| c.get(t) < 4), "{code}");
        }
    }

    #[test]
    fn nine_gates_waits_on_everything() {
        assert_eq!(ids(&winnable_tiles(&counts("A1112345678999"))), (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn seven_pairs_wait() {
        assert_eq!(ids(&winnable_tiles(&counts("A112244557788C9"))), vec![29]);
    }

    #[test]
    fn reachable_without_discards() {
        assert_eq!(
            reachable("12345", ""),
            vec![(1, vec![2, 5]), (2, vec![1]), (4, vec![5]), (5, vec![1, 4])]
        );
    }

    #[test]
    fn discarded_tile_blocks_waits_on_it() {
        assert_eq!(reachable("12345", "1"), vec![(1, vec![2, 5]), (4, vec![5])]);
        assert_eq!(reachable("12345", "2"), vec![(2, vec![1]), (4, vec![5]), (5, vec![1, 4])]);
        assert_eq!(reachable("12345", "12"), vec![(4, vec![5])]);
        assert!(reachable("12345", "15").is_empty());
        assert!(reachable("11112344449", "9").is_empty());
    }

    #[test]
    fn reachable_sets_avoid_discards() {
        let held = counts("A1123456789B55C34");
        let discarded = counts("A9C14");
        for (t, waits) in reachable_discards(&held, &discarded) {
            assert!(held.get(t) > 0);
            assert!(!waits.is_empty());
            assert!(waits.iter().all(|&w| discarded.get(w) == 0));
        }
    }

    #[test]
    #[should_panic]
    fn rejects_non_waiting_size() {
        winnable_tiles(&counts("12"));
    }
}
