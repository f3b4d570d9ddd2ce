mod common;

use broadside::engine::{self, matchmaking, placement};
use broadside::errors::CustomError;
use broadside::models::game::{Game, GameState};
use broadside::models::placement::PlacementDoc;
use broadside::models::view::UserGame;
use common::{add_user, fleet_cols, fleet_rows, matched_game_id, run, test_store};
use pretty_assertions::assert_eq;

fn placement_game(store: &broadside::store::Store) -> String {
    add_user(store, "alice");
    add_user(store, "bob");
    matchmaking::join_queue(store, "alice").unwrap();
    matchmaking::join_queue(store, "bob").unwrap();
    matched_game_id(store, "alice")
}

#[test]
fn readiness_gate_flips_to_playing_exactly_once_both_placed() {
    let store = test_store();
    let game_id = placement_game(&store);

    placement::submit_placement(&store, "alice", &game_id, &fleet_rows()).unwrap();
    let game: Game = store.get(&engine::game_path(&game_id)).unwrap().unwrap();
    assert_eq!(game.state, GameState::Placement);
    assert_eq!(game.has_placed, vec!["alice".to_string()]);

    placement::submit_placement(&store, "bob", &game_id, &fleet_cols()).unwrap();
    let game: Game = store.get(&engine::game_path(&game_id)).unwrap().unwrap();
    assert_eq!(game.state, GameState::Playing);
    assert_eq!(game.has_placed.len(), 2);

    // the transition is mirrored into both views
    for uid in ["alice", "bob"] {
        let view: UserGame = store
            .get(&engine::user_game_path(uid, &game_id))
            .unwrap()
            .unwrap();
        assert_eq!(view.state, Some(GameState::Playing));
        assert_eq!(view.current_player, Some("alice".to_string()));
    }
}

#[test]
fn illegal_fleets_are_rejected_before_any_write() {
    let store = test_store();
    let game_id = placement_game(&store);

    // patrol crossing the carrier
    let mut ships = fleet_rows();
    ships[4] = run(0, 0, 2, true);
    let err = placement::submit_placement(&store, "alice", &game_id, &ships).unwrap_err();
    assert_eq!(err, CustomError::IllegalPlacement);

    let doc: PlacementDoc = store.get(&engine::placement_path(&game_id)).unwrap().unwrap();
    assert!(doc.is_empty());
}

#[test]
fn placement_is_write_once_per_player() {
    let store = test_store();
    let game_id = placement_game(&store);

    placement::submit_placement(&store, "alice", &game_id, &fleet_rows()).unwrap();
    let err = placement::submit_placement(&store, "alice", &game_id, &fleet_cols()).unwrap_err();
    assert_eq!(err, CustomError::AlreadyPlaced);

    let doc: PlacementDoc = store.get(&engine::placement_path(&game_id)).unwrap().unwrap();
    assert_eq!(doc["alice"], fleet_rows());
}

#[test]
fn outsiders_cannot_place() {
    let store = test_store();
    let game_id = placement_game(&store);
    add_user(&store, "mallory");

    let err = placement::submit_placement(&store, "mallory", &game_id, &fleet_rows()).unwrap_err();
    assert_eq!(err, CustomError::NotInGame);
}

#[test]
fn no_placement_once_the_game_is_playing() {
    let store = test_store();
    let game_id = placement_game(&store);

    placement::submit_placement(&store, "alice", &game_id, &fleet_rows()).unwrap();
    placement::submit_placement(&store, "bob", &game_id, &fleet_cols()).unwrap();

    let err = placement::submit_placement(&store, "alice", &game_id, &fleet_rows()).unwrap_err();
    assert_eq!(err, CustomError::GameNotPlacing);
}

#[test]
fn unknown_game_is_not_found() {
    let store = test_store();
    add_user(&store, "alice");
    let err = placement::submit_placement(&store, "alice", "missing", &fleet_rows()).unwrap_err();
    assert_eq!(err, CustomError::GameNotFound);
}
