use crate::yaku::Yaku;
use crate::Rules;

/// Point value of one yaku. Full Flush grows with the deal: a 13-tile
/// deal makes it worth 6.
pub fn yaku_points(y: Yaku, rules: &Rules) -> u32 {
    match y {
        Yaku::FullFlush => 2 + rules.deal_count / 3,
        _ => y.base_points(),
    }
}

pub fn total_points(yaku: &[Yaku], rules: &Rules) -> u32 {
    yaku.iter().map(|&y| yaku_points(y, rules)).sum()
}
