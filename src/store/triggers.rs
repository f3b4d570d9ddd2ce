//! Change notifications, delivered after the transaction that produced them
//! commits. This is the reactive half of the store: matchmaking pairing, the
//! placement readiness gate, and user provisioning all hang off these events.

use std::sync::Arc;

use serde_json::Value;

use super::{DocPath, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Created,
    Updated,
    Deleted,
}

/// One committed document change.
#[derive(Debug, Clone)]
pub struct DocEvent {
    pub kind: EventKind,
    pub path: DocPath,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

pub(crate) type Handler = Arc<dyn Fn(&Store, &DocEvent) -> anyhow::Result<()> + Send + Sync>;

pub(crate) struct Trigger {
    pub kind: EventKind,
    pub collection: String,
    pub handler: Handler,
}
