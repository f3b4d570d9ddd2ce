mod common;

use broadside::engine::{self, provision, social};
use broadside::errors::CustomError;
use broadside::models::game::{Game, GameState};
use broadside::models::user::{Friend, FriendRequest, PublicUser, UserProfile};
use common::{add_user, fleet_cols, fleet_rows, test_store};
use pretty_assertions::assert_eq;

#[test]
fn signup_provisions_friend_code_and_public_lookup() {
    let store = test_store();
    provision::create_user(&store, "alice", None, "hash").unwrap();

    let profile: UserProfile = store.get(&engine::user_path("alice")).unwrap().unwrap();
    let code = profile.friend_code.expect("friend code assigned");
    // no display name supplied, so one was generated
    let name = profile.display_name.expect("display name assigned");

    let public: PublicUser = store.get(&engine::public_user_path(&code)).unwrap().unwrap();
    assert_eq!(public.user_id, "alice");
    assert_eq!(public.display_name, name);
}

#[test]
fn duplicate_signup_is_rejected() {
    let store = test_store();
    add_user(&store, "alice");
    let err = provision::create_user(&store, "alice", None, "other").unwrap_err();
    assert_eq!(err, CustomError::UserExists);
}

#[test]
fn friend_request_and_acceptance_are_reciprocal() {
    let store = test_store();
    add_user(&store, "alice");
    add_user(&store, "bob");

    social::send_friend_request(&store, "alice", "bob").unwrap();
    let request: FriendRequest = store
        .get(&engine::friend_request_path("bob", "alice"))
        .unwrap()
        .unwrap();
    assert_eq!(request.user_id, "alice");
    assert_eq!(request.display_name, "Captain alice");

    // the same request twice is a precondition failure
    let err = social::send_friend_request(&store, "alice", "bob").unwrap_err();
    assert_eq!(err, CustomError::DuplicateRequest);

    social::accept_friend_request(&store, "bob", "alice").unwrap();

    let bobs_friend: Friend = store.get(&engine::friend_path("bob", "alice")).unwrap().unwrap();
    assert_eq!(bobs_friend.user_id, "alice");
    let alices_friend: Friend = store.get(&engine::friend_path("alice", "bob")).unwrap().unwrap();
    assert_eq!(alices_friend.user_id, "bob");

    // the request is consumed by the acceptance
    assert!(store
        .get::<FriendRequest>(&engine::friend_request_path("bob", "alice"))
        .unwrap()
        .is_none());
    let err = social::accept_friend_request(&store, "bob", "alice").unwrap_err();
    assert_eq!(err, CustomError::RequestNotFound);

    // and a new request between friends is rejected
    let err = social::send_friend_request(&store, "alice", "bob").unwrap_err();
    assert_eq!(err, CustomError::AlreadyFriends);
}

#[test]
fn requests_to_unknown_users_are_rejected() {
    let store = test_store();
    add_user(&store, "alice");

    let err = social::send_friend_request(&store, "alice", "nobody").unwrap_err();
    assert_eq!(err, CustomError::UserNotFound);
    let err = social::send_challenge(&store, "alice", "nobody").unwrap_err();
    assert_eq!(err, CustomError::UserNotFound);
}

#[test]
fn accepting_without_a_pending_record_is_not_found() {
    let store = test_store();
    add_user(&store, "alice");
    add_user(&store, "bob");

    let err = social::accept_friend_request(&store, "alice", "bob").unwrap_err();
    assert_eq!(err, CustomError::RequestNotFound);
    let err = social::accept_challenge(&store, "alice", "bob").unwrap_err();
    assert_eq!(err, CustomError::ChallengeNotFound);
}

#[test]
fn accepted_challenge_creates_a_playable_game() {
    let store = test_store();
    add_user(&store, "alice");
    add_user(&store, "bob");

    social::send_challenge(&store, "alice", "bob").unwrap();
    let err = social::send_challenge(&store, "alice", "bob").unwrap_err();
    assert_eq!(err, CustomError::DuplicateChallenge);

    let game_id = social::accept_challenge(&store, "bob", "alice").unwrap();

    // the challenger is player one and acts first
    let game: Game = store.get(&engine::game_path(&game_id)).unwrap().unwrap();
    assert_eq!(game.players, ["alice".to_string(), "bob".to_string()]);
    assert_eq!(game.current_player, "alice");
    assert_eq!(game.state, GameState::Placement);

    // the challenge is consumed
    let err = social::accept_challenge(&store, "bob", "alice").unwrap_err();
    assert_eq!(err, CustomError::ChallengeNotFound);

    // the game runs through the normal placement flow
    engine::placement::submit_placement(&store, "alice", &game_id, &fleet_rows()).unwrap();
    engine::placement::submit_placement(&store, "bob", &game_id, &fleet_cols()).unwrap();
    let game: Game = store.get(&engine::game_path(&game_id)).unwrap().unwrap();
    assert_eq!(game.state, GameState::Playing);

    let outcome = engine::turns::try_square(&store, "alice", &game_id, &common::sq(0, 0)).unwrap();
    assert!(outcome.is_hit);
}
