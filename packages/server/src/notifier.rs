//! Activity notifications.
//!
//! Content mutations record a notification for the acting user. Recording
//! is best effort: a failed write is logged and never fails the mutation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::catalog::EntityKind;
use crate::store::{Document, DocumentStore, Filter, Query, StoreError, from_document, to_document};

pub const COLLECTION: &str = "notifications";

/// Upper bound on notifications returned by a listing.
pub const LIST_LIMIT: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: String,
    pub user_email: String,
    pub message: String,
    /// e.g. `product_created`
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated,
    Deleted,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

#[derive(Clone)]
pub struct Notifier {
    store: Arc<dyn DocumentStore>,
}

impl Notifier {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        user_email: &str,
        message: &str,
        kind: &str,
    ) -> Result<Notification, StoreError> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_email: user_email.to_string(),
            message: message.to_string(),
            kind: kind.to_string(),
            created_at: Utc::now(),
            read: false,
        };
        self.store
            .insert(COLLECTION, &notification.id, to_document(&notification)?)
            .await?;
        Ok(notification)
    }

    /// Record a content mutation. Failures are logged only.
    pub async fn record(&self, user_email: &str, entity: EntityKind, action: Action, label: &str) {
        let message = format!(
            "{} '{}' has been {}.",
            entity.display_name(),
            label,
            action.as_str()
        );
        let kind = format!("{}_{}", entity.singular(), action.as_str());

        if let Err(e) = self.create(user_email, &message, &kind).await {
            warn!(user = user_email, kind = %kind, error = %e, "Failed to record notification");
        }
    }

    /// The user's notifications, newest first.
    pub async fn list_for(&self, user_email: &str) -> Result<Vec<Notification>, StoreError> {
        let query = Query::matching(Filter::all().eq("user_email", user_email))
            .newest_first()
            .page(0, LIST_LIMIT);
        self.store
            .find(COLLECTION, &query)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    async fn owned(&self, user_email: &str, id: &str) -> Result<Option<Notification>, StoreError> {
        let Some(doc) = self.store.get(COLLECTION, id).await? else {
            return Ok(None);
        };
        let notification: Notification = from_document(doc)?;
        Ok((notification.user_email == user_email).then_some(notification))
    }

    /// Returns `false` if the notification does not exist for this user.
    pub async fn mark_read(&self, user_email: &str, id: &str) -> Result<bool, StoreError> {
        if self.owned(user_email, id).await?.is_none() {
            return Ok(false);
        }
        let mut patch = Document::new();
        patch.insert("read".into(), true.into());
        self.store.update(COLLECTION, id, patch).await
    }

    /// Returns `false` if the notification does not exist for this user.
    pub async fn delete(&self, user_email: &str, id: &str) -> Result<bool, StoreError> {
        if self.owned(user_email, id).await?.is_none() {
            return Ok(false);
        }
        self.store.delete(COLLECTION, id).await
    }
}
