//! File id → content / URL records.
//!
//! Two independent records may exist for one file id: a content record
//! (`files`, bytes inline as base64) and a URL record (`file_urls`, a
//! locator into object storage). Either may be missing.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{DocumentStore, StoreError, from_document, to_document};

pub const CONTENT_COLLECTION: &str = "files";
pub const URL_COLLECTION: &str = "file_urls";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContentRecord {
    pub id: String,
    pub filename: String,
    /// Standard base64 of the file bytes.
    pub content: String,
}

impl ContentRecord {
    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UrlRecord {
    pub file_id: String,
    pub filename: String,
    pub url: String,
    /// Media kind recorded at upload time (`image`, `document`, `video`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Clone)]
pub struct LocatorStore {
    store: Arc<dyn DocumentStore>,
}

impl LocatorStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Store file bytes under a fresh id and return it.
    pub async fn put_content(&self, filename: &str, bytes: &[u8]) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.put_content_with_id(&id, filename, bytes).await?;
        Ok(id)
    }

    pub async fn put_content_with_id(
        &self,
        id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), StoreError> {
        let record = ContentRecord {
            id: id.to_string(),
            filename: filename.to_string(),
            content: STANDARD.encode(bytes),
        };
        self.store
            .insert(CONTENT_COLLECTION, id, to_document(&record)?)
            .await
    }

    /// Register a locator for `record.file_id`.
    ///
    /// Records are keyed by file id, so a second registration for the same
    /// id fails with [`StoreError::Duplicate`].
    pub async fn put_url(&self, record: &UrlRecord) -> Result<(), StoreError> {
        self.store
            .insert(URL_COLLECTION, &record.file_id, to_document(record)?)
            .await
    }

    pub async fn get_content(&self, id: &str) -> Result<Option<ContentRecord>, StoreError> {
        self.store
            .get(CONTENT_COLLECTION, id)
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn get_url(&self, id: &str) -> Result<Option<UrlRecord>, StoreError> {
        self.store
            .get(URL_COLLECTION, id)
            .await?
            .map(from_document)
            .transpose()
    }

    /// Remove a content record written for an upload that was then rejected.
    pub async fn delete_content(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete(CONTENT_COLLECTION, id).await
    }
}
