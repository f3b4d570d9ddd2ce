//! The transactional core: matchmaking, placement readiness, turn
//! resolution, social records, and provisioning. Every operation here is a
//! single store transaction, callable without the HTTP layer.

pub mod ids;
pub mod matchmaking;
pub mod placement;
pub mod provision;
pub mod social;
pub mod turns;
pub mod views;

use crate::store::{DocPath, EventKind, Store};

pub fn game_path(game_id: &str) -> DocPath {
    DocPath::doc("games", game_id)
}

pub fn placement_path(game_id: &str) -> DocPath {
    DocPath::doc("placements", game_id)
}

pub fn queue_path(uid: &str) -> DocPath {
    DocPath::doc("matchmaking", uid)
}

pub fn user_path(uid: &str) -> DocPath {
    DocPath::doc("users", uid)
}

pub fn public_user_path(code: &str) -> DocPath {
    DocPath::doc("public-users", code)
}

pub fn user_game_path(uid: &str, game_id: &str) -> DocPath {
    user_path(uid).child("games", game_id)
}

pub fn turn_path(game_id: &str, turn_id: &str) -> DocPath {
    game_path(game_id).child("turns", turn_id)
}

pub fn friend_request_path(target: &str, from: &str) -> DocPath {
    user_path(target).child("friend-requests", from)
}

pub fn friend_path(uid: &str, other: &str) -> DocPath {
    user_path(uid).child("friends", other)
}

pub fn challenge_path(target: &str, from: &str) -> DocPath {
    user_path(target).child("challenges", from)
}

/// Wire the reactive half of the engine to the store.
pub fn register_triggers(store: &Store) {
    store.on(EventKind::Created, "matchmaking", matchmaking::pair_players);
    store.on(EventKind::Updated, "matchmaking", matchmaking::delete_matched);
    store.on(EventKind::Updated, "placements", placement::placement_added);
    store.on(EventKind::Created, "users", provision::provision_user);
}
