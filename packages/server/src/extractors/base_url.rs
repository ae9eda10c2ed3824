use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::resolver::Resolution;
use crate::state::AppState;

/// `scheme://host` of the public API, used to absolutize root-relative URLs.
///
/// Taken from `server.public_base_url` when configured, otherwise from the
/// `X-Forwarded-Proto` / `X-Forwarded-Host` / `Host` request headers.
#[derive(Debug, Clone)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    pub fn resolution(self) -> Resolution {
        Resolution::Url { base: self.0 }
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        // Proxies may append; the first entry is the client-facing one.
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(base) = &state.config.server.public_base_url {
            return Ok(BaseUrl(base.trim_end_matches('/').to_string()));
        }

        let scheme = header_value(parts, "x-forwarded-proto").unwrap_or("http");
        let host = header_value(parts, "x-forwarded-host")
            .or_else(|| header_value(parts, header::HOST.as_str()))
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost");

        Ok(BaseUrl(format!("{scheme}://{host}")))
    }
}
