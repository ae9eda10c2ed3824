use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::gallery::{GalleryInput, deserialize_ids, deserialize_optional_ids};
use super::shared::{double_option, validate_optional_required, validate_required};
use super::{Resource, Validate};
use crate::catalog::EntityKind;
use crate::error::AppError;

pub struct About;

impl Resource for About {
    const KIND: EntityKind = EntityKind::About;
    type Create = CreateAboutRequest;
    type Update = UpdateAboutRequest;
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndustryServed {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAboutRequest {
    #[schema(example = "About us")]
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    /// File id of a video.
    #[serde(default)]
    pub about_video: Option<String>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    #[schema(value_type = GalleryInput)]
    pub product_images: Vec<String>,
    #[serde(default)]
    pub industries_served: Vec<IndustryServed>,
    #[serde(default)]
    pub gallery: Vec<MediaItem>,
}

impl Validate for CreateAboutRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.title, "Title")?;
        validate_served(&self.industries_served)
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAboutRequest {
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
    pub about_video: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_ids",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<GalleryInput>)]
    pub product_images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries_served: Option<Vec<IndustryServed>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<MediaItem>>,
}

impl Validate for UpdateAboutRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_optional_required(self.title.as_ref(), "Title")?;
        match &self.industries_served {
            Some(served) => validate_served(served),
            None => Ok(()),
        }
    }
}

fn validate_served(served: &[IndustryServed]) -> Result<(), AppError> {
    for item in served {
        validate_required(&item.title, "Industry served title")?;
    }
    Ok(())
}
