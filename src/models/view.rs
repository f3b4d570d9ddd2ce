use serde::{Deserialize, Serialize};

use super::game::GameState;

/// Per-user mirror of a game at `users/{uid}/games/{gameId}`, so a client
/// only ever reads its own subtree. Written exclusively by the engine's
/// fan-out; never created by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGame {
    pub opponent: String,
    pub opponent_name: String,
    #[serde(default)]
    pub current_player: Option<String>,
    #[serde(default)]
    pub state: Option<GameState>,
    #[serde(default)]
    pub winner: Option<String>,
}
