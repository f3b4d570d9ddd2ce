use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Boards are GRID_SIZE x GRID_SIZE.
pub const GRID_SIZE: u8 = 10;

/// Fleet roster: carrier, battleship, destroyer, submarine, patrol.
pub const SHIP_LENGTHS: [usize; 5] = [5, 4, 3, 3, 2];

/// Squares a full fleet occupies. Losing all of them loses the game; the win
/// check compares against this exact constant, so keep it in sync with
/// SHIP_LENGTHS.
pub const TOTAL_SHIP_SQUARES: usize = 17;

/// A grid square in wire format, e.g. `x3y7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Square(String);

impl Square {
    pub fn at(x: u8, y: u8) -> Self {
        Square(format!("x{}y{}", x, y))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Coordinates, if the square parses as `x<col>y<row>`.
    pub fn coords(&self) -> Option<(u8, u8)> {
        let rest = self.0.strip_prefix('x')?;
        let (x, y) = rest.split_once('y')?;
        Some((x.parse().ok()?, y.parse().ok()?))
    }

    pub fn in_bounds(&self) -> bool {
        matches!(self.coords(), Some((x, y)) if x < GRID_SIZE && y < GRID_SIZE)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Game phases. Transitions are strictly forward:
/// PLACEMENT -> PLAYING -> DONE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Placement,
    Playing,
    Done,
}

/// Authoritative per-game record at `games/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub players: [String; 2],
    pub current_player: String,
    pub state: GameState,
    pub tries: HashMap<String, Vec<Square>>,
    pub hits: HashMap<String, Vec<Square>>,
    #[serde(default)]
    pub has_placed: Vec<String>,
    #[serde(default)]
    pub winner: Option<String>,
}

impl Game {
    /// Fresh game in placement phase; `player1` acts first.
    pub fn new(player1: &str, player2: &str) -> Self {
        let empty: HashMap<String, Vec<Square>> = [player1, player2]
            .iter()
            .map(|p| (p.to_string(), Vec::new()))
            .collect();
        Game {
            players: [player1.to_string(), player2.to_string()],
            current_player: player1.to_string(),
            state: GameState::Placement,
            tries: empty.clone(),
            hits: empty,
            has_placed: Vec::new(),
            winner: None,
        }
    }

    pub fn is_player(&self, uid: &str) -> bool {
        self.players.iter().any(|p| p == uid)
    }

    /// The other participant.
    pub fn opponent_of(&self, uid: &str) -> Option<&str> {
        self.players.iter().find(|p| p.as_str() != uid).map(String::as_str)
    }
}

/// Immutable audit entry appended under `games/{id}/turns` for every accepted
/// guess: a server timestamp plus the full field delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRecord {
    pub created: DateTime<Utc>,
    pub tries: HashMap<String, Vec<Square>>,
    pub hits: HashMap<String, Vec<Square>>,
    pub current_player: String,
    pub winner: Option<String>,
    pub state: GameState,
}
