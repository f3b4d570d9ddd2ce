//! A transaction records every read (document version or absence) and buffers
//! every write. Nothing touches the store until commit validates the whole
//! read set; see `Store::run_transaction`.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{DocPath, Store, StoreError};

pub(crate) enum WriteOp {
    Set(Value),
    Create(Value),
    Delete,
}

pub(crate) struct QueryRead {
    pub collection: String,
    pub filter: Box<dyn Fn(&Value) -> bool>,
    pub observed: Option<(DocPath, u64)>,
}

pub struct Transaction<'a> {
    store: &'a Store,
    reads: HashMap<DocPath, Option<u64>>,
    queries: Vec<QueryRead>,
    writes: Vec<(DocPath, WriteOp)>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Transaction {
            store,
            reads: HashMap::new(),
            queries: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Read a document into a typed value, recording it in the read set.
    pub fn get<T: DeserializeOwned>(&mut self, path: &DocPath) -> Result<Option<T>, StoreError> {
        match self.get_raw(path) {
            Some(value) => serde_json::from_value(value).map(Some).map_err(StoreError::Serde),
            None => Ok(None),
        }
    }

    /// Read a document as raw JSON. Absence is recorded too, so a document
    /// created behind our back still conflicts at commit.
    pub fn get_raw(&mut self, path: &DocPath) -> Option<Value> {
        let snap = self.store.snapshot(path);
        // the version observed first is the one validated at commit
        self.reads
            .entry(path.clone())
            .or_insert(snap.as_ref().map(|(_, version)| *version));
        snap.map(|(value, _)| value)
    }

    /// Whether a document exists, as a recorded read.
    pub fn exists(&mut self, path: &DocPath) -> bool {
        self.get_raw(path).is_some()
    }

    /// Earliest-created document in `collection` matching `filter`. The
    /// observed result (or its absence) is validated at commit like a read.
    pub fn query_first<F>(
        &mut self,
        collection: &str,
        filter: F,
    ) -> Result<Option<(DocPath, Value)>, StoreError>
    where
        F: Fn(&Value) -> bool + 'static,
    {
        let observed = self.store.query_snapshot(collection, &filter);
        let result = observed.clone().map(|(path, _, value)| (path, value));
        self.queries.push(QueryRead {
            collection: collection.to_string(),
            filter: Box::new(filter),
            observed: observed.map(|(path, version, _)| (path, version)),
        });
        Ok(result)
    }

    /// Write a document, creating or replacing it.
    pub fn set<T: Serialize>(&mut self, path: &DocPath, doc: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(doc).map_err(StoreError::Serde)?;
        self.writes.push((path.clone(), WriteOp::Set(value)));
        Ok(())
    }

    /// Write a document that must not already exist. An existing document at
    /// commit time aborts the attempt.
    pub fn create<T: Serialize>(&mut self, path: &DocPath, doc: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(doc).map_err(StoreError::Serde)?;
        self.writes.push((path.clone(), WriteOp::Create(value)));
        Ok(())
    }

    /// Delete a document. Deleting an absent document is a no-op.
    pub fn delete(&mut self, path: &DocPath) {
        self.writes.push((path.clone(), WriteOp::Delete));
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        HashMap<DocPath, Option<u64>>,
        Vec<QueryRead>,
        Vec<(DocPath, WriteOp)>,
    ) {
        (self.reads, self.queries, self.writes)
    }
}
