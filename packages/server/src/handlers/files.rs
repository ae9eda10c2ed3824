use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::base_url::BaseUrl;
use crate::locator::{ContentRecord, UrlRecord};
use crate::resolver::absolutize;
use crate::state::AppState;

fn file_not_found() -> AppError {
    AppError::NotFound("File not found".into())
}

#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "Files",
    operation_id = "getFileContent",
    summary = "Get a file's inline content record",
    params(("id" = String, Path, description = "File id")),
    responses(
        (status = 200, description = "Content record", body = ContentRecord),
        (status = 404, description = "No content record (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentRecord>, AppError> {
    let record = state
        .locator
        .get_content(&id)
        .await?
        .ok_or_else(file_not_found)?;
    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/file-urls/{id}",
    tag = "Files",
    operation_id = "getFileUrl",
    summary = "Get a file's URL record",
    description = "Root-relative URLs are returned absolute, against the public base URL.",
    params(("id" = String, Path, description = "File id")),
    responses(
        (status = 200, description = "URL record", body = UrlRecord),
        (status = 404, description = "No URL record (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, base_url))]
pub async fn get_file_url(
    State(state): State<AppState>,
    base_url: BaseUrl,
    Path(id): Path<String>,
) -> Result<Json<UrlRecord>, AppError> {
    let mut record = state
        .locator
        .get_url(&id)
        .await?
        .ok_or_else(file_not_found)?;
    record.url = absolutize(&record.url, &base_url.0);
    Ok(Json(record))
}
