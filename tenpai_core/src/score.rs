use crate::engine::evaluate_hand;
use crate::points::yaku_points;
use crate::tile::{Tile, TileCounts};
use crate::wait::winnable_tiles;
use crate::{Rules, ScoreRequest, ScoreResult, WinContext, YakuEntry};

pub fn score(req: &ScoreRequest, rules: &Rules) -> Result<ScoreResult, String> {
    let ready = TileCounts::parse(&req.ready_tiles)?;
    let win_tile = Tile::from_code(req.winning_tile.trim())?;

    if !ready.is_concealed_size() {
        return Err(format!("a waiting hand has 1, 4, 7, 10 or 13 tiles, got {}", ready.total()));
    }
    if ready.get(win_tile) >= 4 {
        return Err(format!("more than four copies of {}", win_tile));
    }
    if !winnable_tiles(&ready).contains(&win_tile) {
        return Err(format!("{} does not complete {}", win_tile, ready));
    }

    let ctx = WinContext {
        turn: req.turn,
        reach: req.reach,
        win_type: req.win_type,
        tiles_remaining: req.tiles_remaining,
    };
    let hand = evaluate_hand(&ready, win_tile, &ctx, rules);

    let yaku = hand
        .yaku
        .iter()
        .map(|&y| YakuEntry {
            id: y.id(),
            name: y.name().to_string(),
            points: yaku_points(y, rules),
        })
        .collect();

    Ok(ScoreResult {
        total_points: hand.points,
        yaku,
    })
}
