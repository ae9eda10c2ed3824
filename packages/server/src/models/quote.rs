use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Validate;
use super::shared::{validate_email, validate_required};
use crate::error::AppError;

/// Public contact / quote request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub request_details: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub work_address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub subscribe_updates: bool,
}

impl Validate for QuoteRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.first_name, "First name")?;
        validate_required(&self.last_name, "Last name")?;
        validate_email(&self.email)
    }
}

/// A stored quote request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    pub id: String,
    #[serde(flatten)]
    pub request: QuoteRequest,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct QuoteCreatedResponse {
    #[schema(example = "Quote request submitted successfully")]
    pub message: String,
    pub id: String,
}

#[derive(Serialize, ToSchema)]
pub struct QuoteListResponse {
    pub count: usize,
    pub quotes: Vec<Quote>,
}
