//! In-process document store with optimistic multi-document transactions and
//! post-commit change triggers. Every state-changing operation in the engine
//! runs as one transaction: read, validate, write, commit-or-retry.

pub mod transaction;
pub mod triggers;

pub use transaction::Transaction;
pub use triggers::{DocEvent, EventKind};

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde_json::Value;

use transaction::WriteOp;
use triggers::Trigger;

// Commit attempts before a transaction gives up with Contention
pub const MAX_TX_ATTEMPTS: u32 = 16;

/// Path of a document: alternating collection/id segments,
/// e.g. `games/g1` or `users/u1/games/g1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    pub fn doc(collection: &str, id: &str) -> Self {
        DocPath {
            segments: vec![collection.to_string(), id.to_string()],
        }
    }

    /// Document in a subcollection of this document.
    pub fn child(&self, collection: &str, id: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(collection.to_string());
        segments.push(id.to_string());
        DocPath { segments }
    }

    /// Id of the document itself (last segment).
    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Path of the collection holding this document.
    pub fn collection(&self) -> String {
        self.segments[..self.segments.len() - 1].join("/")
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

#[derive(Debug)]
pub enum StoreError {
    // Optimistic retries exhausted
    Contention,
    // A document did not match the expected shape
    Serde(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contention => write!(f, "transaction retries exhausted"),
            Self::Serde(err) => write!(f, "document shape mismatch: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

struct Versioned {
    value: Value,
    version: u64,
}

#[derive(Default)]
struct Docs {
    map: HashMap<DocPath, Versioned>,
    next_version: u64,
}

pub struct Store {
    docs: Mutex<Docs>,
    triggers: RwLock<Vec<Trigger>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Store {
            docs: Mutex::new(Docs::default()),
            triggers: RwLock::new(Vec::new()),
        }
    }

    /// Run `body` against a consistent snapshot and commit its writes
    /// atomically. If any document (or query result) read by the body changed
    /// between read and commit, the attempt is discarded and the body re-run.
    /// Errors returned by the body abort immediately without writing anything.
    pub fn run_transaction<T, E, F>(&self, mut body: F) -> Result<T, E>
    where
        F: FnMut(&mut Transaction) -> Result<T, E>,
        E: From<StoreError>,
    {
        for attempt in 1..=MAX_TX_ATTEMPTS {
            let mut tx = Transaction::new(self);
            let out = body(&mut tx)?;
            match self.commit(tx) {
                Some(events) => {
                    self.dispatch(events);
                    return Ok(out);
                }
                None => debug!("transaction conflict on attempt {}, retrying", attempt),
            }
        }
        Err(StoreError::Contention.into())
    }

    /// Register a trigger for documents of one collection path. Handlers run
    /// after the commit that produced the event; a failing handler is logged
    /// and never propagates into the committing caller.
    pub fn on<F>(&self, kind: EventKind, collection: &str, handler: F)
    where
        F: Fn(&Store, &DocEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.triggers.write().unwrap().push(Trigger {
            kind,
            collection: collection.to_string(),
            handler: Arc::new(handler),
        });
    }

    /// One-shot snapshot read outside any transaction.
    pub fn get<T: DeserializeOwned>(&self, path: &DocPath) -> Result<Option<T>, StoreError> {
        let docs = self.docs.lock().unwrap();
        docs.map
            .get(path)
            .map(|doc| serde_json::from_value(doc.value.clone()).map_err(StoreError::Serde))
            .transpose()
    }

    /// Snapshot of every document in a collection, ordered by id.
    pub fn list(&self, collection: &str) -> Vec<(DocPath, Value)> {
        let docs = self.docs.lock().unwrap();
        let mut out: Vec<(DocPath, Value)> = docs
            .map
            .iter()
            .filter(|(path, _)| path.collection() == collection)
            .map(|(path, doc)| (path.clone(), doc.value.clone()))
            .collect();
        out.sort_by(|a, b| a.0.id().cmp(b.0.id()));
        out
    }

    pub(crate) fn snapshot(&self, path: &DocPath) -> Option<(Value, u64)> {
        let docs = self.docs.lock().unwrap();
        docs.map.get(path).map(|doc| (doc.value.clone(), doc.version))
    }

    pub(crate) fn query_snapshot(
        &self,
        collection: &str,
        filter: &dyn Fn(&Value) -> bool,
    ) -> Option<(DocPath, u64, Value)> {
        let docs = self.docs.lock().unwrap();
        query_first_locked(&docs, collection, filter)
    }

    // Validate every recorded read against current versions, then apply all
    // writes under the lock. None means conflict: caller retries.
    fn commit(&self, tx: Transaction) -> Option<Vec<DocEvent>> {
        let (reads, queries, writes) = tx.into_parts();
        let mut docs = self.docs.lock().unwrap();

        for (path, seen) in &reads {
            if docs.map.get(path).map(|doc| doc.version) != *seen {
                return None;
            }
        }
        for query in &queries {
            let current = query_first_locked(&docs, &query.collection, query.filter.as_ref())
                .map(|(path, version, _)| (path, version));
            if current != query.observed {
                return None;
            }
        }
        for (path, op) in &writes {
            if matches!(op, WriteOp::Create(_)) && docs.map.contains_key(path) {
                return None;
            }
        }

        let mut events = Vec::new();
        for (path, op) in writes {
            let before = docs.map.get(&path).map(|doc| doc.value.clone());
            match op {
                WriteOp::Set(value) | WriteOp::Create(value) => {
                    docs.next_version += 1;
                    let version = docs.next_version;
                    docs.map.insert(path.clone(), Versioned { value: value.clone(), version });
                    let kind = if before.is_some() { EventKind::Updated } else { EventKind::Created };
                    events.push(DocEvent { kind, path, before, after: Some(value) });
                }
                WriteOp::Delete => {
                    if docs.map.remove(&path).is_some() {
                        events.push(DocEvent { kind: EventKind::Deleted, path, before, after: None });
                    }
                }
            }
        }
        Some(events)
    }

    // Dispatch runs outside the docs lock so handlers can open their own
    // transactions against the committed state.
    fn dispatch(&self, events: Vec<DocEvent>) {
        for event in events {
            let handlers: Vec<_> = self
                .triggers
                .read()
                .unwrap()
                .iter()
                .filter(|t| t.kind == event.kind && t.collection == event.path.collection())
                .map(|t| t.handler.clone())
                .collect();
            for handler in handlers {
                if let Err(err) = handler(self, &event) {
                    error!("trigger for {} failed: {:#}", event.path, err);
                }
            }
        }
    }
}

// Earliest-created document of a collection matching the filter. Documents
// without a parseable `created` field sort last; ties break on id.
fn query_first_locked(
    docs: &Docs,
    collection: &str,
    filter: &dyn Fn(&Value) -> bool,
) -> Option<(DocPath, u64, Value)> {
    docs.map
        .iter()
        .filter(|(path, _)| path.collection() == collection)
        .filter(|(_, doc)| filter(&doc.value))
        .min_by_key(|(path, doc)| {
            let created = created_of(&doc.value);
            (created.is_none(), created, path.id().to_string())
        })
        .map(|(path, doc)| (path.clone(), doc.version, doc.value.clone()))
}

fn created_of(value: &Value) -> Option<DateTime<Utc>> {
    value
        .get("created")
        .and_then(|raw| serde_json::from_value(raw.clone()).ok())
}
