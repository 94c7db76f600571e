use serde::{Deserialize, Serialize};
use std::fmt;

pub const SUIT_COUNT: u8 = 3;
pub const RANK_COUNT: u8 = 9;

/// Ids run 1..=29 with 10 and 20 unused, so a run can never cross suits.
pub const TILE_SLOTS: usize = 30;

pub const TILES: [Tile; 27] = {
    let mut tiles = [Tile(0); 27];
    let mut i = 0;
    while i < 27 {
        tiles[i] = Tile((i as u8 / RANK_COUNT) * (RANK_COUNT + 1) + i as u8 % RANK_COUNT + 1);
        i += 1;
    }
    tiles
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    A,
    B,
    C,
}

impl Suit {
    pub fn index(self) -> u8 {
        match self {
            Suit::A => 1,
            Suit::B => 2,
            Suit::C => 3,
        }
    }

    pub fn from_index(i: u8) -> Option<Self> {
        match i {
            1 => Some(Suit::A),
            2 => Some(Suit::B),
            3 => Some(Suit::C),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::A => 'A',
            Suit::B => 'B',
            Suit::C => 'C',
        }
    }

    fn from_letter(ch: char) -> Option<Self> {
        match ch {
            'A' => Some(Suit::A),
            'B' => Some(Suit::B),
            'C' => Some(Suit::C),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Tile(u8);

impl TryFrom<u8> for Tile {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, String> {
        Tile::from_id(id).ok_or_else(|| format!("invalid tile id: {}", id))
    }
}

impl Tile {
    pub fn new(suit: Suit, rank: u8) -> Self {
        debug_assert!((1..=RANK_COUNT).contains(&rank));
        Tile((RANK_COUNT + 1) * (suit.index() - 1) + rank)
    }

    pub fn from_id(id: u8) -> Option<Self> {
        let t = Tile(id);
        (Suit::from_index(id.div_ceil(RANK_COUNT + 1)).is_some() && t.rank() != 0).then_some(t)
    }

    /// Parses a single tile written as suit letter + rank, e.g. `"C9"`.
    pub fn from_code(code: &str) -> Result<Self, String> {
        let mut chars = code.chars();
        let (Some(s), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("invalid tile code: {}", code));
        };
        let suit = Suit::from_letter(s).ok_or_else(|| format!("invalid suit: {}", code))?;
        let rank = r
            .to_digit(10)
            .filter(|d| (1..=RANK_COUNT as u32).contains(d))
            .ok_or_else(|| format!("invalid rank: {}", code))? as u8;
        Ok(Tile::new(suit, rank))
    }

    /// Neighbour by id distance. The result can land on an unused slot
    /// (10, 20) and is only meant for lookups and comparisons.
    pub(crate) fn offset(self, delta: i8) -> Tile {
        Tile(self.0.wrapping_add_signed(delta))
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn suit(self) -> Suit {
        match self.0 / (RANK_COUNT + 1) {
            0 => Suit::A,
            1 => Suit::B,
            _ => Suit::C,
        }
    }

    pub fn rank(self) -> u8 {
        self.0 % (RANK_COUNT + 1)
    }

    pub fn is_terminal(self) -> bool {
        is_rank_terminal(self.rank())
    }

    pub fn same_suit(self, other: Tile) -> bool {
        self.suit() == other.suit()
    }

    pub fn code(self) -> String {
        format!("{}{}", self.suit().letter(), self.rank())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit().letter(), self.rank())
    }
}

pub fn is_rank_terminal(rank: u8) -> bool {
    rank == 1 || rank == RANK_COUNT
}

/// Reads the fixture notation: a suit letter followed by rank digits,
/// starting in suit A. `"A19B19C19"` is the six terminals.
pub fn parse_tiles(code: &str) -> Result<Vec<Tile>, String> {
    let mut tiles = vec![];
    let mut suit = Suit::A;
    for ch in code.chars() {
        if ch.is_whitespace() {
            continue;
        }
        if let Some(s) = Suit::from_letter(ch) {
            suit = s;
            continue;
        }
        match ch.to_digit(10) {
            Some(r @ 1..=9) => tiles.push(Tile::new(suit, r as u8)),
            _ => return Err(format!("invalid tile notation: {:?} in {:?}", ch, code)),
        }
    }
    Ok(tiles)
}

/// Inverse of [`parse_tiles`] for a sorted tile list.
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut out = String::new();
    let mut suit = None;
    for t in tiles {
        if suit != Some(t.suit()) {
            suit = Some(t.suit());
            out.push(t.suit().letter());
        }
        out.push(char::from(b'0' + t.rank()));
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCounts([u8; TILE_SLOTS]);

impl Default for TileCounts {
    fn default() -> Self {
        TileCounts([0; TILE_SLOTS])
    }
}

impl TileCounts {
    pub fn from_tiles(tiles: &[Tile]) -> Result<Self, String> {
        let mut counts = Self::default();
        for &t in tiles {
            if counts.get(t) >= 4 {
                return Err(format!("more than four copies of {}", t));
            }
            counts.add(t);
        }
        Ok(counts)
    }

    pub fn parse(code: &str) -> Result<Self, String> {
        Self::from_tiles(&parse_tiles(code)?)
    }

    pub fn get(&self, t: Tile) -> u8 {
        self.0[t.index()]
    }

    pub fn add(&mut self, t: Tile) {
        debug_assert!(self.get(t) < 4, "fifth copy of {}", t);
        self.0[t.index()] += 1;
    }

    pub fn remove(&mut self, t: Tile) {
        debug_assert!(self.get(t) > 0, "no {} to remove", t);
        self.0[t.index()] -= 1;
    }

    /// A copy with one more `t`.
    pub fn with(mut self, t: Tile) -> Self {
        self.add(t);
        self
    }

    /// A copy with one `t` fewer.
    pub fn without(mut self, t: Tile) -> Self {
        self.remove(t);
        self
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }

    /// Held tiles with their counts, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        TILES.iter().map(|&t| (t, self.get(t))).filter(|&(_, c)| c > 0)
    }

    /// Expands back into a sorted tile list.
    pub fn tiles(&self) -> Vec<Tile> {
        self.iter()
            .flat_map(|(t, c)| std::iter::repeat(t).take(c as usize))
            .collect()
    }

    pub fn first_with(&self, pred: impl Fn(u8) -> bool) -> Option<Tile> {
        self.first_with_from(Tile(0), pred)
    }

    pub fn first_with_from(&self, from: Tile, pred: impl Fn(u8) -> bool) -> Option<Tile> {
        TILES
            .iter()
            .copied()
            .filter(|&t| t >= from)
            .find(|&t| pred(self.get(t)))
    }

    /// Waiting hand sizes: 1, 4, 7, 10 or 13 tiles.
    pub fn is_concealed_size(&self) -> bool {
        let n = self.total();
        n <= 13 && n % 3 == 1
    }

    /// Hand sizes right after a draw: 2, 5, 8, 11 or 14 tiles.
    pub fn is_drawn_size(&self) -> bool {
        let n = self.total();
        n <= 14 && n % 3 == 2
    }
}

impl fmt::Display for TileCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tiles_to_string(&self.tiles()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tiles_switches_suit() {
        let ids: Vec<u8> = parse_tiles("A19B19C19").unwrap().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![1, 9, 11, 19, 21, 29]);
    }

    #[test]
    fn parse_tiles_defaults_to_first_suit() {
        assert_eq!(parse_tiles("12").unwrap(), vec![Tile(1), Tile(2)]);
        assert!(parse_tiles("A10").is_err());
        assert!(parse_tiles("D1").is_err());
    }

    #[test]
    fn tile_counts_from_tiles() {
        let counts = TileCounts::from_tiles(&[Tile(1), Tile(1), Tile(1), Tile(9), Tile(9), Tile(29)]).unwrap();
        assert_eq!(counts.0[0], 0);
        assert_eq!(counts.get(Tile(1)), 3);
        assert_eq!(counts.get(Tile(9)), 2);
        assert_eq!(counts.get(Tile(11)), 0);
        assert_eq!(counts.get(Tile(29)), 1);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn tile_counts_reject_fifth_copy() {
        assert!(TileCounts::parse("11111").is_err());
    }

    #[test]
    fn suit_and_rank() {
        let t = Tile::new(Suit::C, 9);
        assert_eq!(t.id(), 29);
        assert_eq!(t.suit(), Suit::C);
        assert_eq!(t.rank(), 9);
        assert!(t.is_terminal());
        assert!(!Tile::new(Suit::B, 5).is_terminal());
        assert_eq!(Tile::from_code("B5"), Ok(Tile(15)));
        assert!(Tile::from_code("B0").is_err());
        assert_eq!(Tile::from_id(10), None);
        assert_eq!(Tile::from_id(21), Some(Tile(21)));
    }

    #[test]
    fn ids_deserialize_through_validation() {
        assert_eq!(serde_json::from_str::<Tile>("15").unwrap(), Tile::new(Suit::B, 5));
        assert_eq!(serde_json::to_string(&Tile::new(Suit::C, 1)).unwrap(), "21");
        assert!(serde_json::from_str::<Tile>("20").is_err());
        assert!(serde_json::from_str::<Tile>("35").is_err());
        assert!(serde_json::from_str::<Tile>("0").is_err());
    }

    #[test]
    fn suit_follows_id_decade() {
        assert!(TILES[..9].iter().all(|t| t.suit() == Suit::A));
        assert!(TILES[9..18].iter().all(|t| t.suit() == Suit::B));
        assert!(TILES[18..].iter().all(|t| t.suit() == Suit::C));
        assert_eq!(Tile::new(Suit::A, 9).offset(2), Tile::new(Suit::B, 1));
        assert_eq!(Tile::new(Suit::B, 1).offset(-2), Tile::new(Suit::A, 9));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "fifth copy")]
    fn add_stops_at_four() {
        let mut counts = TileCounts::parse("A1111").unwrap();
        counts.add(Tile::new(Suit::A, 1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no B2")]
    fn remove_needs_a_copy() {
        let mut counts = TileCounts::parse("B1").unwrap();
        counts.remove(Tile::new(Suit::B, 2));
    }

    #[test]
    fn tiles_table_skips_gaps() {
        assert_eq!(TILES[0], Tile(1));
        assert_eq!(TILES[9], Tile(11));
        assert_eq!(TILES[26], Tile(29));
        assert!(TILES.iter().all(|t| t.rank() != 0));
    }

    #[test]
    fn notation_round_trip_keeps_suit_letters_once() {
        let counts = TileCounts::parse("A112244557788C9").unwrap();
        assert_eq!(counts.to_string(), "A112244557788C9");
        assert_eq!(tiles_to_string(&[Tile(1), Tile(4)]), "A14");
    }

    #[test]
    fn size_classes() {
        assert!(TileCounts::parse("1234").unwrap().is_concealed_size());
        assert!(!TileCounts::parse("12345").unwrap().is_concealed_size());
        assert!(TileCounts::parse("12345").unwrap().is_drawn_size());
        assert!(!TileCounts::parse("A1112223334445B55").unwrap().is_concealed_size());
    }
}
