use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::EntityKind;
use crate::store::{Document, DocumentStore, Filter, Query, StoreError};

/// CRUD over one entity collection.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
    kind: EntityKind,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>, kind: EntityKind) -> Self {
        Self { store, kind }
    }

    /// Insert `doc` under a fresh id and return the stored document.
    pub async fn create(&self, doc: Document) -> Result<Document, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.store.insert(self.kind.collection(), &id, doc).await?;
        self.store
            .get(self.kind.collection(), &id)
            .await?
            .ok_or_else(|| StoreError::Database(format!("{} '{id}' missing after insert", self.kind)))
    }

    pub async fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.store.get(self.kind.collection(), id).await
    }

    pub async fn find(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.store.find(self.kind.collection(), query).await
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64, StoreError> {
        self.store.count(self.kind.collection(), filter).await
    }

    /// Apply `patch` and return the updated document, or `None` if absent.
    pub async fn update(&self, id: &str, patch: Document) -> Result<Option<Document>, StoreError> {
        if !self.store.update(self.kind.collection(), id, patch).await? {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Delete and return the removed document, or `None` if absent.
    pub async fn delete(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };
        if !self.store.delete(self.kind.collection(), id).await? {
            return Ok(None);
        }
        Ok(Some(existing))
    }
}
