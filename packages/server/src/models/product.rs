use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::gallery::{GalleryInput, deserialize_ids, deserialize_optional_ids};
use super::shared::{double_option, validate_optional_required, validate_required};
use super::{Resource, Validate};
use crate::catalog::EntityKind;
use crate::error::AppError;

pub struct Product;

impl Resource for Product {
    const KIND: EntityKind = EntityKind::Product;
    type Create = CreateProductRequest;
    type Update = UpdateProductRequest;
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Specification {
    #[schema(example = "power")]
    pub key: String,
    #[schema(example = "500W")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feature {
    pub title: String,
    #[serde(default)]
    pub details: String,
    /// File id of the feature image.
    #[serde(default)]
    pub image_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Cordless Drill")]
    pub name: String,
    #[serde(rename = "productType", default)]
    #[schema(example = "power-tools")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// File id.
    #[serde(default)]
    pub cover_image: Option<String>,
    /// File id.
    #[serde(default)]
    pub product_360_image: Option<String>,
    /// File id of a video.
    #[serde(default)]
    pub product_3d_video: Option<String>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    #[schema(value_type = GalleryInput)]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    #[schema(value_type = GalleryInput)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Validate for CreateProductRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.name, "Name")?;
        validate_features(&self.features)
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "productType",
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub product_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub short_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub long_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub cover_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub product_360_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub product_3d_video: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_ids",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<GalleryInput>)]
    pub images: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_ids",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<GalleryInput>)]
    pub documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Vec<Specification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
}

impl Validate for UpdateProductRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_optional_required(self.name.as_ref(), "Name")?;
        match &self.features {
            Some(features) => validate_features(features),
            None => Ok(()),
        }
    }
}

fn validate_features(features: &[Feature]) -> Result<(), AppError> {
    for feature in features {
        validate_required(&feature.title, "Feature title")?;
    }
    Ok(())
}

/// Body of `POST /products/filter`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductFilterRequest {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(rename = "productType", default)]
    pub product_type: Option<String>,
    /// Required `key: value` specification pairs. All must match.
    #[serde(default)]
    pub specifications: Option<std::collections::BTreeMap<String, String>>,
}

impl ProductFilterRequest {
    pub fn has_criteria(&self) -> bool {
        self.product_type
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
            || self
                .specifications
                .as_ref()
                .is_some_and(|specs| !specs.is_empty())
    }
}
