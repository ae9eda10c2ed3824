use serde::{Deserialize, Serialize};

use super::shared::{validate_email, validate_required};
use crate::error::AppError;

/// Request body for account signup.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Ada")]
    pub firstname: String,
    #[schema(example = "Lovelace")]
    pub lastname: String,
    #[serde(default)]
    #[schema(example = "Analytical Engines Ltd")]
    pub company: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_signup_request(payload: &SignupRequest) -> Result<(), AppError> {
    validate_required(&payload.firstname, "First name")?;
    validate_required(&payload.lastname, "Last name")?;
    validate_email(&payload.email)?;
    if payload.password.len() < 8 || payload.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: &'static str,
}

/// Current user info.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// A stored account.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub company: Option<String>,
    pub email: String,
    /// argon2 PHC string.
    pub password: String,
    pub is_email_verified: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}
