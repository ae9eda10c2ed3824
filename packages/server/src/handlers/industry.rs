use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use super::content::{label_of, not_found};
use crate::catalog::EntityKind;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::gallery::ids_from_value;
use crate::models::industry::{AssociateProductsRequest, union_ids};
use crate::notifier::Action;
use crate::resolver::Resolution;
use crate::state::AppState;
use crate::store::Document;

#[utoipa::path(
    post,
    path = "/industries/{id}/associate-products",
    tag = "Industries",
    operation_id = "associateProducts",
    summary = "Link products to an industry",
    description = "Appends the given product ids to the industry's `product_ids`, skipping ids already linked.",
    params(("id" = String, Path, description = "Industry id")),
    request_body = AssociateProductsRequest,
    responses(
        (status = 200, description = "`{message, industry}`"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Industry not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(email = %auth_user.email))]
pub async fn associate_products(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<AssociateProductsRequest>,
) -> Result<Json<Value>, AppError> {
    let kind = EntityKind::Industry;
    let repo = state.repo(kind);

    let incoming = payload.into_ids();
    if incoming.is_empty() {
        return Err(AppError::Validation("product_ids must not be empty".into()));
    }

    let existing = repo.get(&id).await?.ok_or_else(|| not_found(kind))?;
    let current = existing
        .get("product_ids")
        .map(ids_from_value)
        .unwrap_or_default();

    let mut patch = Document::new();
    patch.insert("product_ids".into(), json!(union_ids(current, incoming)));
    patch.insert(
        "updated_at".into(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );

    let updated = repo.update(&id, patch).await?.ok_or_else(|| not_found(kind))?;

    state
        .notifier
        .record(&auth_user.email, kind, Action::Updated, &label_of(kind, &updated))
        .await;

    let expanded = state.resolver.expand(kind, updated, &Resolution::Inline).await;
    Ok(Json(json!({
        "message": "Products associated successfully",
        "industry": expanded,
    })))
}
