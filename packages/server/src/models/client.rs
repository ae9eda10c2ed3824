use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{double_option, validate_optional_required, validate_required};
use super::{Resource, Validate};
use crate::catalog::EntityKind;
use crate::error::AppError;

pub struct Client;

impl Resource for Client {
    const KIND: EntityKind = EntityKind::Client;
    type Create = CreateClientRequest;
    type Update = UpdateClientRequest;
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClientRequest {
    #[schema(example = "Acme Corp")]
    pub client_name: String,
    #[serde(default)]
    #[schema(example = "https://acme.example.com")]
    pub website: Option<String>,
    /// File id.
    #[serde(default)]
    pub client_logo: Option<String>,
}

impl Validate for CreateClientRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.client_name, "Client name")
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateClientRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub client_logo: Option<Option<String>>,
}

impl Validate for UpdateClientRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_optional_required(self.client_name.as_ref(), "Client name")
    }
}
