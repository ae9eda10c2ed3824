pub mod catalog;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod locator;
pub mod models;
pub mod notifier;
pub mod repository;
pub mod resolver;
pub mod routes;
pub mod state;
pub mod store;
pub mod upload;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vitrine Content API",
        version = "1.0.0",
        description = "Content management API for a company marketing site: products, \
            industries, clients, certificates, news, about pages, uploads and contact requests. \
            Each content entity is served under `/{entity}/` (authenticated, inline file \
            content) and `/{entity}/url/` (public, file URLs)."
    ),
    paths(
        handlers::health::health,
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::me,
        handlers::upload::upload_images,
        handlers::upload::upload_docs,
        handlers::upload::upload_videos,
        handlers::files::get_file,
        handlers::files::get_file_url,
        handlers::product::filter_products,
        handlers::product::list_by_type,
        handlers::industry::associate_products,
        handlers::quote::submit_quote,
        handlers::quote::list_quotes,
        handlers::quote::get_quote,
        handlers::notification::create_notification,
        handlers::notification::list_notifications,
        handlers::notification::mark_read,
        handlers::notification::delete_notification,
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Auth", description = "Accounts and bearer tokens"),
        (name = "Uploads", description = "File upload and registration"),
        (name = "Files", description = "Content and URL records by file id"),
        (name = "Products", description = "Product search beyond the standard CRUD routes"),
        (name = "Industries", description = "Industry linking beyond the standard CRUD routes"),
        (name = "Contact", description = "Public quote requests"),
        (name = "Notifications", description = "Per-user activity notifications"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Mount point for locally stored uploads, always `/`-prefixed.
fn public_mount(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim().trim_matches('/');
    (!trimmed.is_empty()).then(|| format!("/{trimmed}"))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = ApiDoc::openapi();
    let cors = cors_layer(&state.config.server.cors);

    let mut router = routes::api_routes();
    if let Some(mount) = public_mount(&state.config.storage.public_prefix) {
        router = router.nest_service(&mount, ServeDir::new(&state.config.storage.local_root));
    }

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
