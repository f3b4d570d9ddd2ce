//! Friend requests and direct challenges. Same transactional pattern as
//! queue pairing, minus the queue: a request document under the target's
//! subtree, consumed symmetrically on acceptance.

use chrono::Utc;
use log::info;

use crate::errors::CustomError;
use crate::models::user::{Challenge, Friend, FriendRequest, UserProfile};
use crate::store::Store;

use super::{challenge_path, friend_path, friend_request_path, ids, user_path, views};

/// Leave a friend request under the target's subtree.
pub fn send_friend_request(store: &Store, caller: &str, target: &str) -> Result<(), CustomError> {
    store.run_transaction(|tx| {
        if tx.get::<UserProfile>(&user_path(target))?.is_none() {
            return Err(CustomError::UserNotFound);
        }
        if tx.exists(&friend_path(caller, target)) {
            return Err(CustomError::AlreadyFriends);
        }
        if tx.exists(&friend_request_path(target, caller)) {
            return Err(CustomError::DuplicateRequest);
        }
        let display_name = views::profile_name(tx, caller)?;
        tx.create(
            &friend_request_path(target, caller),
            &FriendRequest {
                user_id: caller.to_string(),
                display_name,
                created: Utc::now(),
            },
        )?;
        Ok(())
    })?;
    info!("{} sent a friend request to {}", caller, target);
    Ok(())
}

/// Accept a pending request from `from`: create the reciprocal friend records
/// and delete the request, in one transaction.
pub fn accept_friend_request(store: &Store, caller: &str, from: &str) -> Result<(), CustomError> {
    store.run_transaction(|tx| {
        if !tx.exists(&friend_request_path(caller, from)) {
            return Err(CustomError::RequestNotFound);
        }
        if tx.exists(&friend_path(caller, from)) || tx.exists(&friend_path(from, caller)) {
            return Err(CustomError::AlreadyFriends);
        }
        let caller_name = views::profile_name(tx, caller)?;
        let from_name = views::profile_name(tx, from)?;
        let now = Utc::now();
        tx.create(
            &friend_path(caller, from),
            &Friend { user_id: from.to_string(), display_name: from_name, created: now },
        )?;
        tx.create(
            &friend_path(from, caller),
            &Friend { user_id: caller.to_string(), display_name: caller_name, created: now },
        )?;
        tx.delete(&friend_request_path(caller, from));
        Ok(())
    })?;
    info!("{} and {} are now friends", caller, from);
    Ok(())
}

/// Leave a challenge under the target's subtree.
pub fn send_challenge(store: &Store, caller: &str, target: &str) -> Result<(), CustomError> {
    store.run_transaction(|tx| {
        if tx.get::<UserProfile>(&user_path(target))?.is_none() {
            return Err(CustomError::UserNotFound);
        }
        if tx.exists(&challenge_path(target, caller)) {
            return Err(CustomError::DuplicateChallenge);
        }
        let display_name = views::profile_name(tx, caller)?;
        tx.create(
            &challenge_path(target, caller),
            &Challenge {
                user_id: caller.to_string(),
                display_name,
                created: Utc::now(),
            },
        )?;
        Ok(())
    })?;
    info!("{} challenged {}", caller, target);
    Ok(())
}

/// Accept a challenge from `from`: creates a fresh game (the challenger acts
/// first) with the same shape as queue pairing, and deletes the challenge.
/// Returns the new game id.
pub fn accept_challenge(store: &Store, caller: &str, from: &str) -> Result<String, CustomError> {
    let game_id = store.run_transaction(|tx| {
        if !tx.exists(&challenge_path(caller, from)) {
            return Err(CustomError::ChallengeNotFound);
        }
        let game_id = ids::short_id();
        views::create_match(tx, &game_id, from, caller)?;
        tx.delete(&challenge_path(caller, from));
        Ok(game_id)
    })?;
    info!("{} accepted a challenge from {}: game {}", caller, from, game_id);
    Ok(game_id)
}
