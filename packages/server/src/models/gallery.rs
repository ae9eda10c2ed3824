//! Multi-value file fields accept either a plain id list or a diff
//! directive `{keep, new_uploaded_ids}` from clients that edit a gallery
//! in place. Both normalize to a flat id list before persistence.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum GalleryInput {
    Ids(Vec<String>),
    Diff(GalleryDiff),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GalleryDiff {
    /// Ids the client retained from the current gallery.
    #[serde(default)]
    pub keep: Vec<String>,
    /// Ids of files uploaded during this edit.
    #[serde(default)]
    pub new_uploaded_ids: Vec<String>,
}

impl GalleryInput {
    /// Kept ids followed by new ids. No dedupe, no reordering.
    pub fn into_ids(self) -> Vec<String> {
        match self {
            GalleryInput::Ids(ids) => ids,
            GalleryInput::Diff(diff) => {
                let mut ids = diff.keep;
                ids.extend(diff.new_uploaded_ids);
                ids
            }
        }
    }
}

impl Default for GalleryInput {
    fn default() -> Self {
        GalleryInput::Ids(Vec::new())
    }
}

/// Serde helper for required multi-value file fields.
pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<GalleryInput>::deserialize(deserializer)?
        .map(GalleryInput::into_ids)
        .unwrap_or_default())
}

/// Serde helper for multi-value file fields in partial updates.
///
/// Absent stays `None` (with `#[serde(default)]`); `null` clears the list.
pub fn deserialize_optional_ids<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(
        Option::<GalleryInput>::deserialize(deserializer)?
            .map(GalleryInput::into_ids)
            .unwrap_or_default(),
    ))
}

/// Best-effort id extraction from a stored value.
///
/// Tolerates bare ids, numbers, lists and documents persisted before
/// directive normalization existed. Empty and null entries are skipped.
pub fn ids_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(single_id).collect(),
        Value::Object(_) => serde_json::from_value::<GalleryDiff>(value.clone())
            .map(|diff| GalleryInput::Diff(diff).into_ids())
            .unwrap_or_default()
            .into_iter()
            .filter(|id| !id.is_empty())
            .collect(),
        other => single_id(other).into_iter().collect(),
    }
}

/// A scalar id, if `value` holds one.
pub fn single_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
