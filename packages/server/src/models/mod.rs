pub mod about;
pub mod auth;
pub mod certificate;
pub mod client;
pub mod gallery;
pub mod industry;
pub mod news;
pub mod product;
pub mod quote;
pub mod shared;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::EntityKind;
use crate::error::AppError;

/// Request-level validation run before anything is persisted.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// A content entity served through the generic CRUD handlers.
///
/// `Create` and `Update` serialize into the stored document and the patch
/// respectively, so their field names are the persisted field names.
pub trait Resource: Send + Sync + 'static {
    const KIND: EntityKind;
    type Create: DeserializeOwned + Serialize + Validate + Send + 'static;
    type Update: DeserializeOwned + Serialize + Validate + Send + 'static;
}
