use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnAcquireErr, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr, TransactionTrait,
};
use serde_json::Value;

use super::{Document, DocumentStore, Filter, Order, Query, StoreError, apply_patch, with_deadline};
use crate::entity::document;

/// Document store over a single `document` table with a `jsonb` body.
///
/// Every call is bounded by `statement_timeout`.
pub struct SqlDocumentStore {
    db: DatabaseConnection,
    statement_timeout: Duration,
}

impl SqlDocumentStore {
    pub fn new(db: DatabaseConnection, statement_timeout: Duration) -> Self {
        Self {
            db,
            statement_timeout,
        }
    }

    fn select(collection: &str, filter: &Filter) -> Select<document::Entity> {
        let select = document::Entity::find().filter(document::Column::Collection.eq(collection));
        if filter.is_empty() {
            return select;
        }
        select.filter(Expr::cust_with_values(
            r#""document"."body" @> ?"#,
            [Value::Object(filter.pattern().clone())],
        ))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => StoreError::Timeout,
            other => StoreError::Database(other.to_string()),
        }
    }
}

fn into_document(model: document::Model) -> Result<Document, StoreError> {
    match model.body {
        Value::Object(doc) => Ok(doc),
        other => Err(StoreError::Database(format!(
            "document '{}/{}' has a non-object body: {}",
            model.collection, model.id, other
        ))),
    }
}

#[async_trait]
impl DocumentStore for SqlDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        with_deadline(self.statement_timeout, async {
            document::Entity::find_by_id((collection.to_string(), id.to_string()))
                .one(&self.db)
                .await?
                .map(into_document)
                .transpose()
        })
        .await
    }

    async fn insert(
        &self,
        collection: &str,
        id: &str,
        mut doc: Document,
    ) -> Result<(), StoreError> {
        doc.insert("id".into(), Value::String(id.to_string()));
        let model = document::ActiveModel {
            collection: Set(collection.to_string()),
            id: Set(id.to_string()),
            body: Set(Value::Object(doc)),
            created_at: Set(Utc::now()),
        };

        with_deadline(self.statement_timeout, async {
            document::Entity::insert(model)
                .exec_without_returning(&self.db)
                .await
                .map_err(|e| match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Duplicate {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    },
                    _ => StoreError::from(e),
                })?;
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<bool, StoreError> {
        with_deadline(self.statement_timeout, async {
            let txn = self.db.begin().await?;

            let Some(existing) =
                document::Entity::find_by_id((collection.to_string(), id.to_string()))
                    .lock_exclusive()
                    .one(&txn)
                    .await?
            else {
                return Ok::<_, StoreError>(false);
            };

            let mut body = into_document(existing.clone())?;
            apply_patch(&mut body, patch);

            let mut active: document::ActiveModel = existing.into();
            active.body = Set(Value::Object(body));
            active.update(&txn).await?;
            txn.commit().await?;
            Ok::<_, StoreError>(true)
        })
        .await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        with_deadline(self.statement_timeout, async {
            let result = document::Entity::delete_by_id((collection.to_string(), id.to_string()))
                .exec(&self.db)
                .await?;
            Ok::<_, StoreError>(result.rows_affected > 0)
        })
        .await
    }

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let select = Self::select(collection, &query.filter);
        let select = match query.order {
            Order::OldestFirst => select
                .order_by_asc(document::Column::CreatedAt)
                .order_by_asc(document::Column::Id),
            Order::NewestFirst => select
                .order_by_desc(document::Column::CreatedAt)
                .order_by_desc(document::Column::Id),
        };

        with_deadline(self.statement_timeout, async {
            select
                .offset(query.skip)
                .limit(query.limit)
                .all(&self.db)
                .await?
                .into_iter()
                .map(into_document)
                .collect::<Result<Vec<_>, StoreError>>()
        })
        .await
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        with_deadline(self.statement_timeout, async {
            Ok::<_, StoreError>(Self::select(collection, filter).count(&self.db).await?)
        })
        .await
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.db.clone().close().await?;
        Ok(())
    }
}
