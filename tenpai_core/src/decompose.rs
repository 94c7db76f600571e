use crate::tile::{Tile, TileCounts, TILES};
use std::cmp::Ordering;
use tinyvec::ArrayVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Triplet(Tile),
    Run(Tile), // starting tile
    Pair(Tile),
    Single(Tile),
    Partial(Tile, Tile), // side or closed wait, lower tile first
}

impl Group {
    pub fn tiles(&self) -> ArrayVec<[Tile; 3]> {
        let mut v = ArrayVec::new();
        match *self {
            Group::Triplet(t) => v.extend([t, t, t]),
            Group::Run(t) => v.extend([t, t.offset(1), t.offset(2)]),
            Group::Pair(t) => v.extend([t, t]),
            Group::Single(t) => v.push(t),
            Group::Partial(a, b) => v.extend([a, b]),
        }
        v
    }

    pub fn len(&self) -> usize {
        match self {
            Group::Triplet(_) | Group::Run(_) => 3,
            Group::Pair(_) | Group::Partial(_, _) => 2,
            Group::Single(_) => 1,
        }
    }

    pub fn first(&self) -> Tile {
        match *self {
            Group::Triplet(t)
            | Group::Run(t)
            | Group::Pair(t)
            | Group::Single(t)
            | Group::Partial(t, _) => t,
        }
    }

    pub fn last(&self) -> Tile {
        match *self {
            Group::Run(t) => t.offset(2),
            Group::Partial(_, b) => b,
            g => g.first(),
        }
    }

    pub fn is_identical(&self) -> bool {
        matches!(self, Group::Triplet(_) | Group::Pair(_))
    }

    pub fn is_sequential(&self) -> bool {
        match *self {
            Group::Run(_) => true,
            Group::Partial(a, b) => b == a.offset(1),
            _ => false,
        }
    }

    pub fn is_outside(&self) -> bool {
        self.first().is_terminal() || self.last().is_terminal()
    }

    /// Merges a wait shape with the tile that completes it.
    pub fn complete_with(&self, tile: Tile) -> Group {
        match *self {
            Group::Single(t) => Group::Pair(t),
            Group::Pair(t) => Group::Triplet(t),
            Group::Partial(a, _) if tile < a => Group::Run(tile),
            Group::Partial(a, _) => Group::Run(a),
            g => g,
        }
    }
}

// shorter groups first, then tile by tile
impl Ord for Group {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.tiles().as_slice().cmp(other.tiles().as_slice()))
    }
}

impl PartialOrd for Group {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub groups: Vec<Group>, // complete groups, pair included
    pub wait: Group,
    pub winnable: ArrayVec<[Tile; 2]>,
    pub seven_pairs: bool,
}

impl Candidate {
    fn new(groups: Vec<Group>, wait: Group, winnable: &[Tile]) -> Self {
        let mut w = ArrayVec::new();
        w.extend(winnable.iter().copied());
        Candidate {
            groups,
            wait,
            winnable: w,
            seven_pairs: false,
        }
    }

    pub fn completes_with(&self, tile: Tile) -> bool {
        self.winnable.contains(&tile)
    }

    /// Groups of the finished hand, sorted.
    pub fn winning_groups(&self, tile: Tile) -> Vec<Group> {
        let mut groups = Vec::with_capacity(self.groups.len() + 1);
        groups.push(self.wait.complete_with(tile));
        groups.extend(self.groups.iter().copied());
        groups.sort();
        groups
    }
}

/// Every way to split a 1/4/7/10/13 tile hand into complete groups plus one
/// wait shape. Lazy; clone the iterator to restart it.
pub fn candidates(counts: &TileCounts) -> Candidates {
    Candidates {
        stack: vec![Frame::new(*counts, counts.total(), vec![])],
    }
}

#[derive(Debug, Clone)]
pub struct Candidates {
    stack: Vec<Frame>,
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let frame = self.stack.last_mut()?;
            if let Some(c) = frame.ready.pop() {
                return Some(c);
            }
            match frame.next_child() {
                Some(child) => self.stack.push(child),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Triplet,
    Run,
}

#[derive(Debug, Clone)]
struct Frame {
    counts: TileCounts,
    total: usize,
    prefix: Vec<Group>,
    ready: Vec<Candidate>, // yielded back to front
    cursor: usize,
    step: Step,
    search: bool,
}

impl Frame {
    fn new(counts: TileCounts, total: usize, prefix: Vec<Group>) -> Self {
        let mut frame = Frame {
            counts,
            total,
            prefix,
            ready: vec![],
            cursor: 0,
            step: Step::Triplet,
            search: true,
        };
        match total {
            1 => frame.single_wait(),
            4 => frame.four_tile_wait(),
            13 => frame.seven_pairs(),
            _ => {}
        }
        frame.ready.reverse();
        frame
    }

    fn single_wait(&mut self) {
        self.search = false;
        if let Some(t) = self.counts.first_with(|c| c == 1) {
            self.ready.push(Candidate::new(self.prefix.clone(), Group::Single(t), &[t]));
        }
    }

    fn four_tile_wait(&mut self) {
        let Some(p) = self.counts.first_with(|c| c >= 2) else {
            return;
        };
        if self.counts.get(p) == 4 {
            self.search = false;
            return;
        }

        if let Some(q) = self.counts.first_with_from(p.offset(1), |c| c == 2) {
            // either pair can be the one that becomes a triplet
            self.search = false;
            for (pair, wait) in [(p, q), (q, p)] {
                let mut groups = self.prefix.clone();
                groups.push(Group::Pair(pair));
                self.ready.push(Candidate::new(groups, Group::Pair(wait), &[wait]));
            }
            return;
        }

        let mut rest = self.counts;
        rest.remove(p);
        rest.remove(p);
        let Some(a) = rest.first_with(|c| c == 1) else {
            return;
        };
        let Some(b) = rest.first_with_from(a.offset(1), |c| c == 1) else {
            return;
        };
        if !a.same_suit(b) {
            return;
        }

        let winnable = if b == a.offset(1) {
            match b.rank() {
                2 => vec![b.offset(1)],
                9 => vec![a.offset(-1)],
                _ => vec![a.offset(-1), b.offset(1)],
            }
        } else if b == a.offset(2) {
            vec![a.offset(1)]
        } else {
            return;
        };
        let mut groups = self.prefix.clone();
        groups.push(Group::Pair(p));
        self.ready.push(Candidate::new(groups, Group::Partial(a, b), &winnable));
    }

    fn seven_pairs(&mut self) {
        let pairs: Vec<Group> = self
            .counts
            .iter()
            .filter(|&(_, c)| c == 2)
            .map(|(t, _)| Group::Pair(t))
            .collect();
        if pairs.len() != 6 {
            return;
        }
        if let Some(t) = self.counts.first_with(|c| c == 1) {
            let mut c = Candidate::new(pairs, Group::Single(t), &[t]);
            c.seven_pairs = true;
            self.ready.push(c);
        }
    }

    fn floor(&self) -> Tile {
        self.prefix.last().map(|g| g.first()).unwrap_or_default()
    }

    /// Next triplet or run to peel off, as a child frame.
    fn next_child(&mut self) -> Option<Frame> {
        if !self.search {
            return None;
        }
        let floor = self.floor();
        while self.cursor < TILES.len() {
            let t1 = TILES[self.cursor];
            let c = self.counts.get(t1);
            if t1 < floor || c == 0 {
                self.advance();
                continue;
            }
            match self.step {
                Step::Triplet => {
                    self.step = Step::Run;
                    if c >= 3 {
                        let mut rest = self.counts;
                        for _ in 0..3 {
                            rest.remove(t1);
                        }
                        return Some(self.child(rest, Group::Triplet(t1)));
                    }
                }
                Step::Run => {
                    self.advance();
                    let t2 = t1.offset(1);
                    let t3 = t1.offset(2);
                    if t3.index() < crate::tile::TILE_SLOTS
                        && self.counts.get(t2) > 0
                        && self.counts.get(t3) > 0
                        && t1.same_suit(t3)
                    {
                        let rest = self.counts.without(t1).without(t2).without(t3);
                        return Some(self.child(rest, Group::Run(t1)));
                    }
                }
            }
        }
        None
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.step = Step::Triplet;
    }

    fn child(&self, rest: TileCounts, group: Group) -> Frame {
        let mut prefix = self.prefix.clone();
        prefix.push(group);
        Frame::new(rest, self.total - 3, prefix)
    }
}
