use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::gallery::{GalleryInput, deserialize_ids, deserialize_optional_ids};
use super::shared::{double_option, validate_optional_required, validate_required};
use super::{Resource, Validate};
use crate::catalog::EntityKind;
use crate::error::AppError;

pub struct Industry;

impl Resource for Industry {
    const KIND: EntityKind = EntityKind::Industry;
    type Create = CreateIndustryRequest;
    type Update = UpdateIndustryRequest;
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateIndustryRequest {
    #[schema(example = "Mining")]
    pub industry_name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    /// File id.
    #[serde(default)]
    pub industry_logo: Option<String>,
    /// File id.
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    #[schema(value_type = GalleryInput)]
    pub industry_images: Vec<String>,
    #[serde(default)]
    pub client_ids: Vec<String>,
    #[serde(default)]
    pub product_ids: Vec<String>,
    #[serde(default)]
    pub certification_ids: Vec<String>,
}

impl Validate for CreateIndustryRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.industry_name, "Industry name")
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateIndustryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub short_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub long_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub industry_logo: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub cover_image: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_ids",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<GalleryInput>)]
    pub industry_images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification_ids: Option<Vec<String>>,
}

impl Validate for UpdateIndustryRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_optional_required(self.industry_name.as_ref(), "Industry name")
    }
}

/// Body of `POST /industries/{id}/associate-products`: a bare id list or
/// `{"product_ids": [...]}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AssociateProductsRequest {
    Ids(Vec<String>),
    Wrapped { product_ids: Vec<String> },
}

impl AssociateProductsRequest {
    pub fn into_ids(self) -> Vec<String> {
        match self {
            Self::Ids(ids) | Self::Wrapped { product_ids: ids } => ids,
        }
    }
}

/// Append ids from `incoming` that are not yet in `existing`, keeping order.
pub fn union_ids(mut existing: Vec<String>, incoming: Vec<String>) -> Vec<String> {
    for id in incoming {
        if !id.trim().is_empty() && !existing.contains(&id) {
            existing.push(id);
        }
    }
    existing
}
