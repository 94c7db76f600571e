use crate::decompose::{Candidate, Group};
use crate::tile::{Suit, Tile, TileCounts};
use crate::{ReachState, TurnState, WinContext, WinType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Yaku {
    Reach = 1,
    DoubleReach,
    OneShot,
    LastStock,
    LastDiscard,
    WinFromStock,
    AllMiddles,
    AllSequences,
    PureDoubleSequences,
    MixedTripleSequences,
    PureStraight,
    SevenTwins,
    AllTriplets,
    ThreeClosedTriplets,
    MixedTripleTriplets,
    AllOutside,
    TwoPureDoubleSequences,
    FullFlush,
    AllTerminals,
    BlessingOfHeaven,
    BlessingOfEarth,
    FourClosedTriplets,
    NineGates,
}

impl Yaku {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Yaku::Reach => "Reach",
            Yaku::DoubleReach => "Double Reach",
            Yaku::OneShot => "One Shot",
            Yaku::LastStock => "Last Stock",
            Yaku::LastDiscard => "Last Discard",
            Yaku::WinFromStock => "Win from Stock",
            Yaku::AllMiddles => "All Middles",
            Yaku::AllSequences => "All Sequences",
            Yaku::PureDoubleSequences => "Pure Double Sequences",
            Yaku::MixedTripleSequences => "Mixed Triple Sequences",
            Yaku::PureStraight => "Pure Straight",
            Yaku::SevenTwins => "Seven Twins",
            Yaku::AllTriplets => "All Triplets",
            Yaku::ThreeClosedTriplets => "Three Closed Triplets",
            Yaku::MixedTripleTriplets => "Mixed Triple Triplets",
            Yaku::AllOutside => "All Outside",
            Yaku::TwoPureDoubleSequences => "Two Pure Double Sequences",
            Yaku::FullFlush => "Full Flush",
            Yaku::AllTerminals => "All Terminals",
            Yaku::BlessingOfHeaven => "Blessing of Heaven",
            Yaku::BlessingOfEarth => "Blessing of Earth",
            Yaku::FourClosedTriplets => "Four Closed Triplets",
            Yaku::NineGates => "Nine Gates",
        }
    }

    /// Fixed value; Full Flush is scaled by the deal in `points`.
    pub(crate) fn base_points(self) -> u32 {
        match self {
            Yaku::DoubleReach
            | Yaku::MixedTripleSequences
            | Yaku::PureStraight
            | Yaku::SevenTwins
            | Yaku::AllTriplets
            | Yaku::ThreeClosedTriplets => 2,
            Yaku::MixedTripleTriplets | Yaku::AllOutside | Yaku::TwoPureDoubleSequences => 3,
            Yaku::FullFlush => 0,
            Yaku::AllTerminals
            | Yaku::BlessingOfHeaven
            | Yaku::BlessingOfEarth
            | Yaku::FourClosedTriplets
            | Yaku::NineGates => 13,
            _ => 1,
        }
    }
}

// =====================
// Structural yaku: one decomposition at a time
// =====================

pub fn eval_structural(cand: &Candidate, win_tile: Tile, win_type: WinType) -> Vec<Yaku> {
    if cand.seven_pairs {
        return vec![Yaku::SevenTwins];
    }

    let mut yaku = vec![];
    let groups = cand.winning_groups(win_tile);

    if is_all_sequences(cand) {
        yaku.push(Yaku::AllSequences);
    }
    if groups.iter().all(Group::is_outside) {
        yaku.push(Yaku::AllOutside);
    }
    if groups.iter().all(Group::is_identical) {
        yaku.push(Yaku::AllTriplets);
    }

    match closed_triplets(cand, win_type) {
        3 => yaku.push(Yaku::ThreeClosedTriplets),
        4 => yaku.push(Yaku::FourClosedTriplets),
        _ => {}
    }

    if let Some(y) = double_sequences(&groups) {
        yaku.push(y);
    }
    if is_pure_straight(&groups) {
        yaku.push(Yaku::PureStraight);
    }
    if is_mixed_triple(&groups, |g| matches!(g, Group::Run(_))) {
        yaku.push(Yaku::MixedTripleSequences);
    }
    if is_mixed_triple(&groups, |g| matches!(g, Group::Triplet(_))) {
        yaku.push(Yaku::MixedTripleTriplets);
    }

    yaku
}

// two-sided wait, every other group a run
fn is_all_sequences(cand: &Candidate) -> bool {
    if !cand.wait.is_sequential() || cand.wait.is_outside() {
        return false;
    }
    match cand.groups.split_last() {
        Some((_pair, rest)) => rest.iter().all(Group::is_sequential),
        None => true,
    }
}

fn closed_triplets(cand: &Candidate, win_type: WinType) -> usize {
    let held = cand
        .groups
        .iter()
        .filter(|g| matches!(g, Group::Triplet(_)))
        .count();
    // a pair completed by a discard is an open triplet
    let drawn = win_type == WinType::SelfDraw && matches!(cand.wait, Group::Pair(_));
    held + usize::from(drawn)
}

// groups[0] is the pair
fn double_sequences(groups: &[Group]) -> Option<Yaku> {
    let last = groups.len().saturating_sub(1);
    let dup = |i: usize| groups[i] == groups[i + 1];
    let first = (1..last).find(|&i| dup(i))?;
    if (first + 1..last).any(dup) {
        Some(Yaku::TwoPureDoubleSequences)
    } else {
        Some(Yaku::PureDoubleSequences)
    }
}

fn is_pure_straight(groups: &[Group]) -> bool {
    let has_run = |t: Tile| groups.contains(&Group::Run(t));
    [Suit::A, Suit::B, Suit::C]
        .into_iter()
        .any(|s| [1, 4, 7].into_iter().all(|r| has_run(Tile::new(s, r))))
}

fn is_mixed_triple(groups: &[Group], kind: impl Fn(&Group) -> bool) -> bool {
    groups
        .iter()
        .filter(|g| kind(g) && g.first().suit() == Suit::A)
        .any(|g| {
            let rank = g.first().rank();
            [Suit::B, Suit::C].into_iter().all(|s| {
                groups
                    .iter()
                    .any(|h| kind(h) && h.first() == Tile::new(s, rank))
            })
        })
}

// =====================
// Situational yaku: context and the finished tile set
// =====================

pub fn eval_situational(ready: &TileCounts, win_tile: Tile, ctx: &WinContext) -> Vec<Yaku> {
    let mut yaku = vec![];

    if ctx.reach != ReachState::None {
        match ctx.reach {
            ReachState::Reached => yaku.push(Yaku::Reach),
            ReachState::DoubleReached => yaku.push(Yaku::DoubleReach),
            _ => {}
        }
        if ctx.turn == TurnState::OneShot {
            yaku.push(Yaku::OneShot);
        }
    }

    match (ctx.win_type, ctx.turn) {
        (WinType::SelfDraw, TurnState::Heaven) => yaku.push(Yaku::BlessingOfHeaven),
        (WinType::SelfDraw, TurnState::Earth) => yaku.push(Yaku::BlessingOfEarth),
        (WinType::SelfDraw, _) => {
            if ctx.tiles_remaining == 0 {
                yaku.push(Yaku::LastStock);
            }
            yaku.push(Yaku::WinFromStock);
        }
        (WinType::Discard, _) => {
            if ctx.tiles_remaining == 0 {
                yaku.push(Yaku::LastDiscard);
            }
        }
    }

    let finished = ready.with(win_tile);
    if finished.iter().all(|(t, _)| !t.is_terminal()) {
        yaku.push(Yaku::AllMiddles);
    } else if finished.iter().all(|(t, _)| t.is_terminal()) {
        yaku.push(Yaku::AllTerminals);
    }

    if let Some(y) = crate::special::flush(ready, win_tile) {
        yaku.push(y);
    }

    yaku
}
