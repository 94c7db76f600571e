use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnState {
    #[default]
    Normal,
    Heaven,  // dealer's first draw
    Earth,   // non-dealer's first draw
    OneShot, // first go-around after declaring ready
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReachState {
    #[default]
    None,
    Reachable,
    Reaching,
    Reached,
    DoubleReached,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WinType {
    Discard,
    SelfDraw,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct WinContext {
    pub turn: TurnState,
    pub reach: ReachState,
    pub win_type: WinType,
    pub tiles_remaining: u32,
}

impl WinContext {
    pub fn discard() -> Self {
        WinContext {
            turn: TurnState::Normal,
            reach: ReachState::None,
            win_type: WinType::Discard,
            tiles_remaining: 1,
        }
    }

    pub fn self_draw() -> Self {
        WinContext {
            win_type: WinType::SelfDraw,
            ..Self::discard()
        }
    }
}

/// Table rules that change scoring.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct Rules {
    /// Tiles dealt to each player: 1, 4, 7, 10 or 13.
    pub deal_count: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { deal_count: 13 }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), String> {
        if self.deal_count > 13 || self.deal_count % 3 != 1 {
            return Err(format!("invalid deal count: {}", self.deal_count));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRequest {
    pub ready_tiles: String,
    pub winning_tile: String,
    pub win_type: WinType,
    #[serde(default)]
    pub turn: TurnState,
    #[serde(default)]
    pub reach: ReachState,
    pub tiles_remaining: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct YakuEntry {
    pub id: u8,
    pub name: String,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScoreResult {
    pub total_points: u32,
    pub yaku: Vec<YakuEntry>,
}

pub mod decompose;
mod engine;
pub mod hint;
mod points;
mod score;
mod special;
pub mod tile;
pub mod wait;
mod yaku;

pub use engine::{evaluate_hand, HandResult};
pub use score::score;
pub use tile::{parse_tiles, tiles_to_string, Suit, Tile, TileCounts};
pub use wait::{reachable_discards, winnable_tiles};
pub use yaku::Yaku;
