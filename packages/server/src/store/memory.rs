use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{Document, DocumentStore, Filter, Order, Query, StoreError, apply_patch};

struct Stored {
    seq: u64,
    doc: Document,
}

/// In-process document store.
///
/// Insertion order is tracked with a global sequence so `find` orders the
/// same way the SQL backend does.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, HashMap<String, Stored>>,
    seq: AtomicU64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matching(&self, collection: &str, filter: &Filter) -> Vec<(u64, Document)> {
        self.collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|stored| filter.matches(&stored.doc))
                    .map(|stored| (stored.seq, stored.doc.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).map(|stored| stored.doc.clone())))
    }

    async fn insert(
        &self,
        collection: &str,
        id: &str,
        mut doc: Document,
    ) -> Result<(), StoreError> {
        doc.insert("id".into(), Value::String(id.to_string()));
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        match docs.entry(id.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
            Entry::Vacant(slot) => {
                let seq = self.seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Stored { seq, doc });
                Ok(())
            }
        }
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<bool, StoreError> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        match docs.get_mut(id) {
            Some(stored) => {
                apply_patch(&mut stored.doc, patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        Ok(self
            .collections
            .get_mut(collection)
            .is_some_and(|mut docs| docs.remove(id).is_some()))
    }

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let mut docs = self.matching(collection, &query.filter);
        docs.sort_by_key(|(seq, _)| *seq);
        if query.order == Order::NewestFirst {
            docs.reverse();
        }

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(docs
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, doc)| doc)
            .collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        Ok(self.matching(collection, filter).len() as u64)
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
