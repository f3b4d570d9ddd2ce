use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Queue entry at `matchmaking/{uid}`. Created on queue-join, marked handled
/// when it becomes the waiting head, stamped with the game id on pairing and
/// then cleaned up by the matched-entry trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub created: DateTime<Utc>,
    pub handled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

impl QueueEntry {
    pub fn new() -> Self {
        QueueEntry {
            created: Utc::now(),
            handled: false,
            game_id: None,
        }
    }
}

impl Default for QueueEntry {
    fn default() -> Self {
        Self::new()
    }
}
