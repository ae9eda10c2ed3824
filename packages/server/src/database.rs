use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::store::{DocumentStore, MemoryDocumentStore, SqlDocumentStore};

pub const MEMORY_URL_SCHEME: &str = "memory://";

/// Open the document store selected by `database.url`.
pub async fn init_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, DbErr> {
    if config.url.starts_with(MEMORY_URL_SCHEME) {
        info!("Using in-process document store");
        return Ok(Arc::new(MemoryDocumentStore::new()));
    }

    let db = init_db(config).await?;
    info!("Connected to SQL document store");
    Ok(Arc::new(SqlDocumentStore::new(
        db,
        Duration::from_secs(config.statement_timeout_secs),
    )))
}

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("vitrine::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}
