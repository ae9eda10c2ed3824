//! Keyed JSON document collections.
//!
//! Every persisted record in the service (content entities, users, file
//! records, notifications) lives in a named collection behind
//! [`DocumentStore`]. Two backends exist: [`SqlDocumentStore`] over sea-orm
//! and [`MemoryDocumentStore`] for tests and `memory://`.

mod filter;
mod memory;
mod sql;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use filter::{Filter, json_contains};
pub use memory::MemoryDocumentStore;
pub use sql::SqlDocumentStore;

/// A stored document. Always carries an `id` field equal to its key.
pub type Document = serde_json::Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document '{id}' already exists in '{collection}'")]
    Duplicate { collection: String, id: String },
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store operation timed out")]
    Timeout,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Insertion order.
    #[default]
    OldestFirst,
    NewestFirst,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filter: Filter,
    pub skip: u64,
    pub limit: Option<u64>,
    pub order: Order,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matching(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn page(mut self, skip: u64, limit: u64) -> Self {
        self.skip = skip;
        self.limit = Some(limit);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = Order::NewestFirst;
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert a new document under `id`. The stored body gets `id` set.
    async fn insert(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Shallow-merge `patch` into an existing document.
    ///
    /// Returns `false` when no document exists under `id`. The `id` field is
    /// never overwritten.
    async fn update(&self, collection: &str, id: &str, patch: Document)
    -> Result<bool, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Release backend resources. Called once after the server stops.
    async fn close(&self) -> Result<(), StoreError>;
}

/// Merge `patch` into `target`, leaving `id` untouched.
pub(crate) fn apply_patch(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        if key != "id" {
            target.insert(key, value);
        }
    }
}

/// Run a store call, failing with [`StoreError::Timeout`] once `limit` elapses.
pub(crate) async fn with_deadline<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout)?
}

/// Serialize a typed record into a document body.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => Ok(doc),
        other => Err(StoreError::Database(format!(
            "expected an object, got {other}"
        ))),
    }
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}
