use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use super::content::list_page;
use crate::catalog::EntityKind;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::{AppJson, AppQuery};
use crate::models::product::ProductFilterRequest;
use crate::models::shared::{PageParams, PageWindow};
use crate::state::AppState;
use crate::store::Filter;

/// Containment filter for a product search.
fn product_filter(request: &ProductFilterRequest) -> Filter {
    let mut filter = Filter::all();
    if let Some(product_type) = request
        .product_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        filter = filter.eq("productType", product_type);
    }
    for (key, value) in request.specifications.iter().flatten() {
        filter = filter.contains_element("specifications", json!({"key": key, "value": value}));
    }
    filter
}

#[utoipa::path(
    post,
    path = "/products/filter",
    tag = "Products",
    operation_id = "filterProducts",
    summary = "Filter products by type and specifications",
    description = "Every given specification pair must be present on the product. At least one criterion is required.",
    request_body = ProductFilterRequest,
    responses(
        (status = 200, description = "`{page, limit, total, products}`"),
        (status = 400, description = "No filter criteria (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip_all, fields(email = %auth_user.email))]
pub async fn filter_products(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductFilterRequest>,
) -> Result<Json<Value>, AppError> {
    if !payload.has_criteria() {
        return Err(AppError::Validation(
            "At least one of productType or specifications is required".into(),
        ));
    }

    let window = PageWindow::new(payload.page, payload.limit);
    let body = list_page(&state, EntityKind::Product, product_filter(&payload), window).await?;
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/products/by-type/{product_type}",
    tag = "Products",
    operation_id = "listProductsByType",
    summary = "List products of one type",
    params(
        ("product_type" = String, Path, description = "Product type"),
        PageParams,
    ),
    responses(
        (status = 200, description = "`{page, limit, total, products}`"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, params), fields(email = %auth_user.email))]
pub async fn list_by_type(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(product_type): Path<String>,
    AppQuery(params): AppQuery<PageParams>,
) -> Result<Json<Value>, AppError> {
    let filter = Filter::all().eq("productType", product_type);
    let body = list_page(&state, EntityKind::Product, filter, params.into()).await?;
    Ok(Json(body))
}
