use crate::decompose::candidates;
use crate::points::total_points;
use crate::special::apply_override;
use crate::tile::{Tile, TileCounts};
use crate::yaku::{eval_situational, eval_structural, Yaku};
use crate::{Rules, WinContext};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HandResult {
    pub yaku: Vec<Yaku>,
    pub points: u32,
}

/// Scores `ready` (the hand before the winning tile) completed by `win_tile`.
///
/// Every decomposition that `win_tile` completes is scored on its own and
/// the highest total wins; on a tie the first one enumerated is kept.
/// Situational yaku are added on top, then special hands replace
/// everything else.
///
/// Calling this with a tile that does not complete the hand is a caller
/// bug: debug builds panic, release builds log it and return an empty
/// result. A winning tile already held four times panics in every build.
pub fn evaluate_hand(ready: &TileCounts, win_tile: Tile, ctx: &WinContext, rules: &Rules) -> HandResult {
    assert!(
        ready.is_concealed_size(),
        "evaluate_hand: hand of {} tiles is not a waiting size",
        ready.total()
    );
    assert!(
        ready.get(win_tile) < 4,
        "evaluate_hand: {} would be a fifth copy in {}",
        win_tile,
        ready
    );

    let best: Option<(u32, Vec<Yaku>)> = candidates(ready)
        .filter(|c| c.completes_with(win_tile))
        .map(|c| {
            let yaku = eval_structural(&c, win_tile, ctx.win_type);
            (total_points(&yaku, rules), yaku)
        })
        .fold(None, |best, cand| match best {
            Some(b) if b.0 >= cand.0 => Some(b),
            _ => Some(cand),
        });

    let Some((structural_points, mut yaku)) = best else {
        debug_assert!(false, "{} does not complete {}", win_tile, ready);
        tracing::warn!(hand = %ready, tile = %win_tile, "win declared with a non-completing tile");
        return HandResult::default();
    };
    tracing::debug!(hand = %ready, tile = %win_tile, structural_points, ?yaku, "selected decomposition");

    yaku.extend(eval_situational(ready, win_tile, ctx));
    let mut yaku = apply_override(yaku);
    yaku.sort();
    yaku.dedup();

    let points = total_points(&yaku, rules);
    HandResult { yaku, points }
}
