use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::gallery::{GalleryInput, deserialize_ids, deserialize_optional_ids};
use super::shared::{double_option, validate_optional_required, validate_required};
use super::{Resource, Validate};
use crate::catalog::EntityKind;
use crate::error::AppError;

pub struct News;

impl Resource for News {
    const KIND: EntityKind = EntityKind::News;
    type Create = CreateNewsRequest;
    type Update = UpdateNewsRequest;
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateNewsRequest {
    #[schema(example = "New plant opens")]
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    /// File id.
    #[serde(default)]
    pub news_logo: Option<String>,
    /// File id.
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    #[schema(value_type = GalleryInput)]
    pub news_images: Vec<String>,
}

impl Validate for CreateNewsRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.title, "Title")
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateNewsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub short_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub long_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub news_logo: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub cover_image: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_ids",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<GalleryInput>)]
    pub news_images: Option<Vec<String>>,
}

impl Validate for UpdateNewsRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_optional_required(self.title.as_ref(), "Title")
    }
}
