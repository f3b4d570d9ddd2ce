//! Turn resolution: validate one guess against the opponent's hidden fleet
//! and apply the full outcome atomically.

use chrono::Utc;
use log::debug;
use serde::Serialize;

use crate::errors::CustomError;
use crate::models::game::{Game, GameState, Square, TurnRecord, TOTAL_SHIP_SQUARES};
use crate::models::placement::PlacementDoc;
use crate::store::Store;

use super::{game_path, ids, placement_path, turn_path, views};

/// What the caller learns about their guess, and nothing more.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOutcome {
    pub is_hit: bool,
    pub game_is_won: bool,
}

/// Resolve one guess. Reads Game + Placement, validates every precondition
/// against that snapshot, then writes the game, both user views, and an
/// immutable turn-history record in the same transaction.
pub fn try_square(
    store: &Store,
    uid: &str,
    game_id: &str,
    square: &Square,
) -> Result<TryOutcome, CustomError> {
    store.run_transaction(|tx| {
        let mut game: Game = tx.get(&game_path(game_id))?.ok_or(CustomError::GameNotFound)?;
        let placement: PlacementDoc = tx
            .get(&placement_path(game_id))?
            .ok_or(CustomError::PlacementNotFound)?;

        // doubles as authorization: only the active player may mutate state
        if game.current_player != uid {
            return Err(CustomError::NotYourTurn);
        }
        if game.state != GameState::Playing {
            return Err(CustomError::GameNotPlaying);
        }

        let opponent = game.opponent_of(uid).ok_or(CustomError::NotInGame)?.to_string();

        let already_tried = game.tries.get(uid).map_or(false, |tries| tries.contains(square));
        if already_tried {
            return Err(CustomError::AlreadyGuessed);
        }

        let fleet = placement.get(&opponent).ok_or(CustomError::PlacementNotFound)?;
        let is_hit = fleet.iter().any(|ship| ship.squares().contains(square));

        // the win is checked against the hit count *before* this guess: the
        // final needed hit completes the game on this very call
        let former_hits = game.hits.get(uid).map_or(0, Vec::len);
        let game_is_won = former_hits == TOTAL_SHIP_SQUARES - 1 && is_hit;

        game.tries.entry(uid.to_string()).or_default().push(square.clone());
        if is_hit {
            game.hits.entry(uid.to_string()).or_default().push(square.clone());
        }
        // turns always alternate, hit or miss
        game.current_player = opponent.clone();
        if game_is_won {
            game.state = GameState::Done;
            game.winner = Some(uid.to_string());
        }

        tx.set(&game_path(game_id), &game)?;
        views::update_game_views(tx, game_id, &game)?;
        tx.create(
            &turn_path(game_id, &ids::short_id()),
            &TurnRecord {
                created: Utc::now(),
                tries: game.tries.clone(),
                hits: game.hits.clone(),
                current_player: game.current_player.clone(),
                winner: game.winner.clone(),
                state: game.state,
            },
        )?;

        debug!(
            "{} tried {} in game {}: hit={} won={}",
            uid, square, game_id, is_hit, game_is_won
        );
        Ok(TryOutcome { is_hit, game_is_won })
    })
}
