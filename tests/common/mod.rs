#![allow(dead_code)]

use std::sync::Arc;

use broadside::engine;
use broadside::models::game::Square;
use broadside::models::placement::Ship;
use broadside::store::Store;

/// A store with the engine's triggers wired, as `main` would set it up.
pub fn test_store() -> Arc<Store> {
    let store = Arc::new(Store::new());
    engine::register_triggers(&store);
    store
}

pub fn add_user(store: &Store, uid: &str) {
    engine::provision::create_user(store, uid, Some(format!("Captain {}", uid)), "hash")
        .unwrap();
}

pub fn sq(x: u8, y: u8) -> Square {
    Square::at(x, y)
}

pub fn run(x: u8, y: u8, len: u8, down: bool) -> Ship {
    Ship(
        (0..len)
            .map(|i| if down { Square::at(x, y + i) } else { Square::at(x + i, y) })
            .collect(),
    )
}

/// Legal fleet laid out in horizontal rows.
pub fn fleet_rows() -> Vec<Ship> {
    vec![
        run(0, 0, 5, false),
        run(0, 2, 4, false),
        run(0, 4, 3, false),
        run(0, 6, 3, false),
        run(0, 8, 2, false),
    ]
}

/// Legal fleet laid out in vertical columns.
pub fn fleet_cols() -> Vec<Ship> {
    vec![
        run(0, 0, 5, true),
        run(2, 0, 4, true),
        run(4, 0, 3, true),
        run(6, 0, 3, true),
        run(8, 0, 2, true),
    ]
}

/// Id of the single game mirrored into a user's subtree.
pub fn matched_game_id(store: &Store, uid: &str) -> String {
    let games = store.list(&format!("users/{}/games", uid));
    assert_eq!(games.len(), 1, "expected exactly one game for {}", uid);
    games[0].0.id().to_string()
}

/// Two provisioned users paired through the queue with both fleets placed;
/// the returned game is in the PLAYING state with `a` to act.
pub fn playing_game(store: &Store, a: &str, b: &str) -> String {
    add_user(store, a);
    add_user(store, b);
    engine::matchmaking::join_queue(store, a).unwrap();
    engine::matchmaking::join_queue(store, b).unwrap();
    let game_id = matched_game_id(store, a);
    engine::placement::submit_placement(store, a, &game_id, &fleet_rows()).unwrap();
    engine::placement::submit_placement(store, b, &game_id, &fleet_cols()).unwrap();
    game_id
}
