use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::content::not_found;
use crate::catalog::EntityKind;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::Validate;
use crate::models::quote::{Quote, QuoteCreatedResponse, QuoteListResponse, QuoteRequest};
use crate::state::AppState;
use crate::store::{Query, from_document, to_document};

const KIND: EntityKind = EntityKind::Quote;

/// Submit a contact / quote request. Public.
#[utoipa::path(
    post,
    path = "/contact-us",
    tag = "Contact",
    operation_id = "submitQuote",
    summary = "Submit a quote request",
    request_body = QuoteRequest,
    responses(
        (status = 201, description = "Request stored", body = QuoteCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(email = %payload.email))]
pub async fn submit_quote(
    State(state): State<AppState>,
    AppJson(payload): AppJson<QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quote = Quote {
        id: Uuid::new_v4().to_string(),
        request: payload,
        created_at: chrono::Utc::now(),
    };
    state
        .store
        .insert(KIND.collection(), &quote.id, to_document(&quote)?)
        .await?;
    info!(quote_id = %quote.id, "Quote request received");

    Ok((
        StatusCode::CREATED,
        Json(QuoteCreatedResponse {
            message: "Quote request submitted successfully".into(),
            id: quote.id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/contact-us",
    tag = "Contact",
    operation_id = "listQuotes",
    summary = "List quote requests, newest first",
    responses(
        (status = 200, description = "Quote requests", body = QuoteListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip_all, fields(email = %auth_user.email))]
pub async fn list_quotes(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<QuoteListResponse>, AppError> {
    let quotes = state
        .store
        .find(KIND.collection(), &Query::all().newest_first())
        .await?
        .into_iter()
        .map(from_document)
        .collect::<Result<Vec<Quote>, _>>()?;

    Ok(Json(QuoteListResponse {
        count: quotes.len(),
        quotes,
    }))
}

#[utoipa::path(
    get,
    path = "/contact-us/{id}",
    tag = "Contact",
    operation_id = "getQuote",
    summary = "Get one quote request",
    params(("id" = String, Path, description = "Quote request id")),
    responses(
        (status = 200, description = "Quote request", body = Quote),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email))]
pub async fn get_quote(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quote>, AppError> {
    let doc = state
        .store
        .get(KIND.collection(), &id)
        .await?
        .ok_or_else(|| not_found(KIND))?;
    Ok(Json(from_document(doc)?))
}
