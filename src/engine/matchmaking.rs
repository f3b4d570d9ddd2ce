//! Queue pairing. The protocol is two-phase: a joiner who finds no waiting
//! head parks itself as the head (`handled = true`); the next joiner consumes
//! the head inside one transaction. This way two simultaneous joiners who
//! both see an empty queue cannot deadlock each other out of a match.

use log::info;
use serde_json::Value;

use crate::errors::CustomError;
use crate::models::matchmaking::QueueEntry;
use crate::store::{DocEvent, Store, StoreError};

use super::{ids, queue_path, views};

/// Join the matchmaking queue. Re-joining overwrites the existing entry.
pub fn join_queue(store: &Store, uid: &str) -> Result<(), CustomError> {
    info!("{} joins the matchmaking queue", uid);
    let entry = QueueEntry::new();
    store.run_transaction(|tx| {
        tx.set(&queue_path(uid), &entry)?;
        Ok::<_, CustomError>(())
    })
}

/// Leave the queue unconditionally.
pub fn exit_queue(store: &Store, uid: &str) -> Result<(), CustomError> {
    info!("{} exits the matchmaking queue", uid);
    store.run_transaction(|tx| {
        tx.delete(&queue_path(uid));
        Ok::<_, CustomError>(())
    })
}

// Trigger on queue-entry creation: consume the current head or become it.
pub(crate) fn pair_players(store: &Store, event: &DocEvent) -> anyhow::Result<()> {
    let player2 = event.path.id().to_string();
    store.run_transaction(|tx| {
        // the fresh entry is handled=false, so it can never match itself; a
        // head that already carries a game id is paired and merely awaiting
        // cleanup, so it is no head either
        let head = tx.query_first("matchmaking", |doc| {
            doc.get("handled").and_then(Value::as_bool).unwrap_or(false)
                && doc.get("gameId").map_or(true, Value::is_null)
        })?;
        let Some(mut entry) = tx.get::<QueueEntry>(&event.path)? else {
            // the joiner already left again; nothing to pair
            return Ok(());
        };
        match head {
            Some((head_path, head_doc)) => {
                let player1 = head_path.id().to_string();
                let game_id = ids::short_id();
                info!("matched {} against {} in game {}", player1, player2, game_id);
                views::create_match(tx, &game_id, &player1, &player2)?;

                let mut head_entry: QueueEntry =
                    serde_json::from_value(head_doc.clone()).map_err(StoreError::Serde)?;
                head_entry.game_id = Some(game_id.clone());
                tx.set(&head_path, &head_entry)?;

                entry.game_id = Some(game_id);
                tx.set(&event.path, &entry)?;
            }
            None => {
                entry.handled = true;
                tx.set(&event.path, &entry)?;
            }
        }
        Ok::<_, anyhow::Error>(())
    })
}

// Trigger on queue-entry update: entries that acquired a game leave the queue.
pub(crate) fn delete_matched(store: &Store, event: &DocEvent) -> anyhow::Result<()> {
    let matched = event
        .after
        .as_ref()
        .and_then(|doc| doc.get("gameId"))
        .map_or(false, |game_id| !game_id.is_null());
    if !matched {
        return Ok(());
    }
    let path = event.path.clone();
    store.run_transaction(|tx| {
        tx.delete(&path);
        Ok::<_, StoreError>(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EventKind;
    use chrono::Utc;

    // A head that is already paired but whose queue entry has not been cleaned
    // up yet must not be matched a second time.
    #[test]
    fn stale_paired_head_is_not_rematched() {
        // bare store, so the stale entry is not cleaned up behind our back
        let store = Store::new();
        let stale = QueueEntry {
            created: Utc::now(),
            handled: true,
            game_id: Some("g1".to_string()),
        };
        store
            .run_transaction(|tx| {
                tx.set(&queue_path("alice"), &stale)?;
                Ok::<_, StoreError>(())
            })
            .unwrap();

        join_queue(&store, "bob").unwrap();
        let event = crate::store::DocEvent {
            kind: EventKind::Created,
            path: queue_path("bob"),
            before: None,
            after: None,
        };
        pair_players(&store, &event).unwrap();

        // bob becomes a fresh head instead of pairing against the stale entry
        let entry: QueueEntry = store
            .get(&queue_path("bob"))
            .unwrap()
            .unwrap();
        assert!(entry.handled);
        assert_eq!(entry.game_id, None);
        assert!(store.list("games").is_empty());
    }
}
