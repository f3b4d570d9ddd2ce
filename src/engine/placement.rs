//! Placement submission and the readiness gate that flips a game from
//! PLACEMENT to PLAYING once both fleets are in.

use log::info;

use crate::errors::CustomError;
use crate::models::game::{Game, GameState};
use crate::models::placement::{legal_fleet, PlacementDoc, Ship};
use crate::store::{DocEvent, Store};

use super::{game_path, placement_path, views};

/// Submit the caller's fleet for a game, exactly once, before PLAYING.
pub fn submit_placement(
    store: &Store,
    uid: &str,
    game_id: &str,
    ships: &[Ship],
) -> Result<(), CustomError> {
    if !legal_fleet(ships) {
        return Err(CustomError::IllegalPlacement);
    }
    store.run_transaction(|tx| {
        let game: Game = tx.get(&game_path(game_id))?.ok_or(CustomError::GameNotFound)?;
        if !game.is_player(uid) {
            return Err(CustomError::NotInGame);
        }
        if game.state != GameState::Placement {
            return Err(CustomError::GameNotPlacing);
        }
        let mut placement: PlacementDoc = tx
            .get(&placement_path(game_id))?
            .ok_or(CustomError::PlacementNotFound)?;
        if placement.contains_key(uid) {
            return Err(CustomError::AlreadyPlaced);
        }
        placement.insert(uid.to_string(), ships.to_vec());
        tx.set(&placement_path(game_id), &placement)?;
        Ok(())
    })?;
    info!("{} placed their fleet in game {}", uid, game_id);
    Ok(())
}

// Trigger on placement update: the readiness gate. Runs against the current
// game snapshot so the PLACEMENT -> PLAYING transition happens exactly once.
pub(crate) fn placement_added(store: &Store, event: &DocEvent) -> anyhow::Result<()> {
    let game_id = event.path.id().to_string();
    store.run_transaction(|tx| {
        let Some(mut game) = tx.get::<Game>(&game_path(&game_id))? else {
            return Ok(());
        };
        let Some(placement) = tx.get::<PlacementDoc>(&placement_path(&game_id))? else {
            return Ok(());
        };
        game.has_placed = game
            .players
            .iter()
            .filter(|player| placement.contains_key(*player))
            .cloned()
            .collect();
        if game.state == GameState::Placement && game.has_placed.len() == game.players.len() {
            info!("both fleets placed, game {} is now playing", game_id);
            game.state = GameState::Playing;
        }
        tx.set(&game_path(&game_id), &game)?;
        views::update_game_views(tx, &game_id, &game)?;
        Ok::<_, anyhow::Error>(())
    })
}
