use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection: String, // Grouping identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String, // Unique identifier within the collection

    /// Full document body, including its own `id`.
    #[sea_orm(column_type = "JsonBinary")]
    pub body: Json,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
