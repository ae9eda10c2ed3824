use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{double_option, validate_optional_required, validate_required};
use super::{Resource, Validate};
use crate::catalog::EntityKind;
use crate::error::AppError;

pub struct Certificate;

impl Resource for Certificate {
    const KIND: EntityKind = EntityKind::Certificate;
    type Create = CreateCertificateRequest;
    type Update = UpdateCertificateRequest;
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCertificateRequest {
    #[schema(example = "ISO 9001")]
    pub certificate_name: String,
    /// File id.
    #[serde(default)]
    pub certificate_logo: Option<String>,
}

impl Validate for CreateCertificateRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.certificate_name, "Certificate name")
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCertificateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub certificate_logo: Option<Option<String>>,
}

impl Validate for UpdateCertificateRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_optional_required(self.certificate_name.as_ref(), "Certificate name")
    }
}
