use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppQuery;
use crate::models::shared::{MessageResponse, validate_required};
use crate::notifier::Notification;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateNotificationParams {
    /// Notification text.
    pub message: String,
    /// Notification type, e.g. `product_created`.
    #[serde(rename = "type")]
    pub kind: String,
}

fn notification_not_found() -> AppError {
    AppError::NotFound("Notification not found".into())
}

#[utoipa::path(
    post,
    path = "/notifications",
    tag = "Notifications",
    operation_id = "createNotification",
    summary = "Create a notification for the caller",
    params(CreateNotificationParams),
    responses(
        (status = 201, description = "Created", body = Notification),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip_all, fields(email = %auth_user.email))]
pub async fn create_notification(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CreateNotificationParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_required(&params.message, "Message")?;
    validate_required(&params.kind, "Type")?;

    let notification = state
        .notifier
        .create(&auth_user.email, params.message.trim(), params.kind.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    operation_id = "listNotifications",
    summary = "The caller's notifications, newest first",
    responses(
        (status = 200, description = "Notifications (at most 100)", body = Vec<Notification>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip_all, fields(email = %auth_user.email))]
pub async fn list_notifications(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.notifier.list_for(&auth_user.email).await?))
}

#[utoipa::path(
    put,
    path = "/notifications/{id}/read",
    tag = "Notifications",
    operation_id = "markNotificationRead",
    summary = "Mark a notification as read",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Marked", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email))]
pub async fn mark_read(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.notifier.mark_read(&auth_user.email, &id).await? {
        return Err(notification_not_found());
    }
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = "Notifications",
    operation_id = "deleteNotification",
    summary = "Delete a notification",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email))]
pub async fn delete_notification(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.notifier.delete(&auth_user.email, &id).await? {
        return Err(notification_not_found());
    }
    Ok(Json(MessageResponse::new("Notification deleted")))
}
