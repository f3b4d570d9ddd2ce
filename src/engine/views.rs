//! Centralized fan-out into the per-user mirrors. Every transaction that
//! creates or mutates a game goes through here, so the list of mirror targets
//! and their projections lives in exactly one place.

use crate::models::game::Game;
use crate::models::placement::PlacementDoc;
use crate::models::user::UserProfile;
use crate::models::view::UserGame;
use crate::store::{StoreError, Transaction};

use super::{game_path, placement_path, user_game_path, user_path};

/// Create the Game, its empty Placement record, and both players' views in
/// the surrounding transaction. `player1` acts first. Shared by matchmaking
/// pairing and challenge acceptance.
pub(crate) fn create_match(
    tx: &mut Transaction,
    game_id: &str,
    player1: &str,
    player2: &str,
) -> Result<(), StoreError> {
    let game = Game::new(player1, player2);
    tx.create(&game_path(game_id), &game)?;
    tx.create(&placement_path(game_id), &PlacementDoc::new())?;

    let name1 = profile_name(tx, player1)?;
    let name2 = profile_name(tx, player2)?;
    tx.create(
        &user_game_path(player1, game_id),
        &UserGame {
            opponent: player2.to_string(),
            opponent_name: name2,
            current_player: Some(game.current_player.clone()),
            state: Some(game.state),
            winner: None,
        },
    )?;
    tx.create(
        &user_game_path(player2, game_id),
        &UserGame {
            opponent: player1.to_string(),
            opponent_name: name1,
            current_player: Some(game.current_player.clone()),
            state: Some(game.state),
            winner: None,
        },
    )?;
    Ok(())
}

/// Mirror the game's derived fields into both players' views.
pub(crate) fn update_game_views(
    tx: &mut Transaction,
    game_id: &str,
    game: &Game,
) -> Result<(), StoreError> {
    for uid in &game.players {
        let path = user_game_path(uid, game_id);
        let opponent = game.opponent_of(uid).unwrap_or_default().to_string();
        let mut view = tx.get::<UserGame>(&path)?.unwrap_or(UserGame {
            opponent: opponent.clone(),
            opponent_name: opponent,
            current_player: None,
            state: None,
            winner: None,
        });
        view.current_player = Some(game.current_player.clone());
        view.state = Some(game.state);
        view.winner = game.winner.clone();
        tx.set(&path, &view)?;
    }
    Ok(())
}

/// Display name from the profile, falling back to the uid.
pub(crate) fn profile_name(tx: &mut Transaction, uid: &str) -> Result<String, StoreError> {
    Ok(tx
        .get::<UserProfile>(&user_path(uid))?
        .and_then(|profile| profile.display_name)
        .unwrap_or_else(|| uid.to_string()))
}
