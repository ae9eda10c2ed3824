use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::state::AppState;
use crate::upload::{IncomingFile, MediaKind, UploadOutcome, register_files};
use crate::utils::filename::{upload_filename, validate_key_prefix};

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(256 * 1024 * 1024) // 256 MB per request
}

/// Multipart fields of an upload request.
struct UploadForm {
    files: Vec<IncomingFile>,
    prefix: Option<String>,
}

async fn read_form(mut multipart: Multipart, max_file_size: u64) -> Result<UploadForm, AppError> {
    let mut files = Vec::new();
    let mut prefix = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("files") | Some("file") => {
                let filename = upload_filename(field.file_name())
                    .map_err(|e| AppError::Validation(e.message().into()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                if bytes.len() as u64 > max_file_size {
                    return Err(AppError::PayloadTooLarge(format!(
                        "'{filename}' exceeds the {max_file_size} byte limit"
                    )));
                }
                files.push(IncomingFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some("folder") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read folder: {e}")))?;
                if !text.trim().is_empty() {
                    prefix = Some(validate_key_prefix(&text).map_err(|e| AppError::Validation(e.into()))?);
                }
            }
            _ => {} // Ignore unknown fields.
        }
    }

    if files.is_empty() {
        return Err(AppError::Validation("At least one file is required".into()));
    }

    Ok(UploadForm { files, prefix })
}

async fn upload(
    state: &AppState,
    multipart: Multipart,
    kind: MediaKind,
) -> Result<Json<Vec<UploadOutcome>>, AppError> {
    let form = read_form(multipart, state.uploads.max_file_size()).await?;
    let count = form.files.len();

    let outcomes = register_files(
        &state.uploads,
        &state.locator,
        form.files,
        kind,
        form.prefix.as_deref(),
    )
    .await?;

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    info!(kind = kind.as_str(), count, failed, "Upload batch processed");
    Ok(Json(outcomes))
}

#[utoipa::path(
    post,
    path = "/upload/images",
    tag = "Uploads",
    operation_id = "uploadImages",
    summary = "Upload images",
    description = "Accepts one or more `files` parts and an optional `folder` key prefix. \
        Each file is stored once and registered under a single id with both a content \
        record and a URL record. Results are returned in request order.",
    request_body(content_type = "multipart/form-data", description = "Repeated `files` parts"),
    responses(
        (status = 200, description = "Per-file results", body = Vec<UploadOutcome>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 413, description = "File too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 502, description = "Remote storage failed (STORAGE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip_all, fields(email = %auth_user.email))]
pub async fn upload_images(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<UploadOutcome>>, AppError> {
    upload(&state, multipart, MediaKind::Image).await
}

#[utoipa::path(
    post,
    path = "/upload/docs",
    tag = "Uploads",
    operation_id = "uploadDocuments",
    summary = "Upload documents",
    request_body(content_type = "multipart/form-data", description = "Repeated `files` parts"),
    responses(
        (status = 200, description = "Per-file results", body = Vec<UploadOutcome>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 413, description = "File too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 502, description = "Remote storage failed (STORAGE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip_all, fields(email = %auth_user.email))]
pub async fn upload_docs(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<UploadOutcome>>, AppError> {
    upload(&state, multipart, MediaKind::Document).await
}

#[utoipa::path(
    post,
    path = "/upload/videos",
    tag = "Uploads",
    operation_id = "uploadVideos",
    summary = "Upload videos",
    request_body(content_type = "multipart/form-data", description = "Repeated `files` parts"),
    responses(
        (status = 200, description = "Per-file results", body = Vec<UploadOutcome>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 413, description = "File too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 502, description = "Remote storage failed (STORAGE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip_all, fields(email = %auth_user.email))]
pub async fn upload_videos(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<UploadOutcome>>, AppError> {
    upload(&state, multipart, MediaKind::Video).await
}
