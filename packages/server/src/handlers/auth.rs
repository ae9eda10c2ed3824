use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    LoginRequest, LoginResponse, MeResponse, SignupRequest, UserRecord, validate_login_request,
    validate_signup_request,
};
use crate::models::shared::MessageResponse;
use crate::state::AppState;
use crate::store::{Document, StoreError, from_document, to_document};
use crate::utils::{hash, jwt};

pub const USERS_COLLECTION: &str = "users";

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Handle account signup.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Auth",
    operation_id = "signup",
    summary = "Create an account",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email already registered (EMAIL_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_signup_request(&payload)?;

    let email = normalize_email(&payload.email);
    let password = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let user = UserRecord {
        firstname: payload.firstname.trim().to_string(),
        lastname: payload.lastname.trim().to_string(),
        company: payload.company,
        email: email.clone(),
        password,
        is_email_verified: false,
        created_at: chrono::Utc::now(),
        last_login: None,
    };

    state
        .store
        .insert(USERS_COLLECTION, &email, to_document(&user)?)
        .await
        .map_err(|e| match e {
            StoreError::Duplicate { .. } => AppError::EmailTaken,
            other => AppError::from(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Handle login.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Exchange credentials for a bearer token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Bad credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let email = normalize_email(&payload.email);
    let user: UserRecord = state
        .store
        .get(USERS_COLLECTION, &email)
        .await?
        .map(from_document)
        .transpose()?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let mut patch = Document::new();
    patch.insert(
        "last_login".into(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );
    state.store.update(USERS_COLLECTION, &email, patch).await?;

    let access_token = jwt::sign(
        &user.email,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_minutes,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// Return the authenticated principal.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current principal",
    responses(
        (status = 200, description = "Principal", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user), fields(email = %auth_user.email))]
pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        email: auth_user.email,
    })
}
