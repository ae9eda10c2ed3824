//! CRUD handlers shared by every content entity.
//!
//! Each handler is generic over a [`Resource`]; the entity kind supplies
//! the collection, response keys and expansion rules.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Map, Value, json};
use tracing::instrument;

use crate::catalog::EntityKind;
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::base_url::BaseUrl;
use crate::extractors::json::{AppJson, AppQuery};
use crate::models::shared::{MessageResponse, PageParams, PageWindow};
use crate::models::{Resource, Validate};
use crate::notifier::Action;
use crate::resolver::Resolution;
use crate::state::AppState;
use crate::store::{Document, Filter, Query, to_document};

pub(crate) fn not_found(kind: EntityKind) -> AppError {
    AppError::NotFound(format!("{} not found", kind.display_name()))
}

/// Value of the entity's label field, falling back to its id.
pub(crate) fn label_of(kind: EntityKind, doc: &Document) -> String {
    doc.get(kind.label_field())
        .and_then(Value::as_str)
        .or_else(|| doc.get("id").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// `{page, limit, total, <plural>}`
pub(crate) fn page_body(kind: EntityKind, window: PageWindow, total: u64, docs: Vec<Document>) -> Value {
    let mut body = Map::new();
    body.insert("page".into(), window.page.into());
    body.insert("limit".into(), window.limit.into());
    body.insert("total".into(), total.into());
    body.insert(
        kind.plural().into(),
        Value::Array(docs.into_iter().map(Value::Object).collect()),
    );
    Value::Object(body)
}

/// Run a paginated, inline-expanded listing.
pub(crate) async fn list_page(
    state: &AppState,
    kind: EntityKind,
    filter: Filter,
    window: PageWindow,
) -> Result<Value, AppError> {
    let repo = state.repo(kind);
    let total = repo.count(&filter).await?;
    let docs = repo
        .find(&Query::matching(filter).page(window.skip(), window.limit))
        .await?;
    let docs = state
        .resolver
        .expand_all(kind, docs, &Resolution::Inline)
        .await;
    Ok(page_body(kind, window, total, docs))
}

#[instrument(skip_all, fields(kind = %R::KIND, email = %auth_user.email))]
pub async fn list<R: Resource>(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> Result<Json<Value>, AppError> {
    let body = list_page(&state, R::KIND, Filter::all(), params.into()).await?;
    Ok(Json(body))
}

#[instrument(skip_all, fields(kind = %R::KIND))]
pub async fn list_urls<R: Resource>(
    State(state): State<AppState>,
    base_url: BaseUrl,
) -> Result<Json<Value>, AppError> {
    let kind = R::KIND;
    let docs = state.repo(kind).find(&Query::all()).await?;
    let docs = state
        .resolver
        .expand_all(kind, docs, &base_url.resolution())
        .await;

    let mut body = Map::new();
    body.insert("count".into(), docs.len().into());
    body.insert(
        kind.plural().into(),
        Value::Array(docs.into_iter().map(Value::Object).collect()),
    );
    Ok(Json(Value::Object(body)))
}

#[instrument(skip(state, auth_user), fields(kind = %R::KIND, email = %auth_user.email))]
pub async fn get_one<R: Resource>(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let kind = R::KIND;
    let doc = state
        .repo(kind)
        .get(&id)
        .await?
        .ok_or_else(|| not_found(kind))?;
    let doc = state.resolver.expand(kind, doc, &Resolution::Inline).await;
    Ok(Json(Value::Object(doc)))
}

#[instrument(skip(state, base_url), fields(kind = %R::KIND))]
pub async fn get_url<R: Resource>(
    State(state): State<AppState>,
    base_url: BaseUrl,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let kind = R::KIND;
    let doc = state
        .repo(kind)
        .get(&id)
        .await?
        .ok_or_else(|| not_found(kind))?;
    let doc = state
        .resolver
        .expand(kind, doc, &base_url.resolution())
        .await;
    Ok(Json(Value::Object(doc)))
}

#[instrument(skip_all, fields(kind = %R::KIND, email = %auth_user.email))]
pub async fn create<R: Resource>(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<R::Create>,
) -> Result<impl IntoResponse, AppError> {
    let kind = R::KIND;
    payload.validate()?;

    let mut doc = to_document(&payload)?;
    doc.insert("created_by".into(), Value::String(auth_user.email.clone()));
    doc.insert(
        "created_at".into(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );

    let created = state.repo(kind).create(doc).await?;
    let id = created
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    state
        .notifier
        .record(&auth_user.email, kind, Action::Created, &label_of(kind, &created))
        .await;

    let expanded = state.resolver.expand(kind, created, &Resolution::Inline).await;
    let body = json!({
        "message": format!("{} created successfully", kind.display_name()),
        "id": id,
        kind.singular(): expanded,
    });
    Ok((StatusCode::CREATED, Json(body)))
}

#[instrument(skip_all, fields(kind = %R::KIND, email = %auth_user.email, id = %id))]
pub async fn update<R: Resource>(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<R::Update>,
) -> Result<Json<Value>, AppError> {
    let kind = R::KIND;
    payload.validate()?;

    let mut patch = to_document(&payload)?;
    if patch.is_empty() {
        return Err(AppError::Validation("No fields to update".into()));
    }
    patch.insert(
        "updated_at".into(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );

    let updated = state
        .repo(kind)
        .update(&id, patch)
        .await?
        .ok_or_else(|| not_found(kind))?;

    state
        .notifier
        .record(&auth_user.email, kind, Action::Updated, &label_of(kind, &updated))
        .await;

    let expanded = state.resolver.expand(kind, updated, &Resolution::Inline).await;
    Ok(Json(json!({
        "message": format!("{} updated successfully", kind.display_name()),
        kind.singular(): expanded,
    })))
}

#[instrument(skip(state, auth_user), fields(kind = %R::KIND, email = %auth_user.email))]
pub async fn delete<R: Resource>(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let kind = R::KIND;
    let removed = state
        .repo(kind)
        .delete(&id)
        .await?
        .ok_or_else(|| not_found(kind))?;

    state
        .notifier
        .record(&auth_user.email, kind, Action::Deleted, &label_of(kind, &removed))
        .await;

    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        kind.display_name()
    ))))
}

/// The standard route set for `R`, mounted at its path prefix.
///
/// Collection routes are registered with and without a trailing slash.
pub fn resource_routes<R: Resource>() -> Router<AppState> {
    let base = R::KIND.path();
    let collection = || get(list::<R>).post(create::<R>);
    let url_collection = || get(list_urls::<R>);

    Router::new()
        .route(base, collection())
        .route(&format!("{base}/"), collection())
        .route(&format!("{base}/url"), url_collection())
        .route(&format!("{base}/url/"), url_collection())
        .route(&format!("{base}/url/{{id}}"), get(get_url::<R>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_one::<R>).put(update::<R>).delete(delete::<R>),
        )
}
