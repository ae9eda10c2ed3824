use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers::{self, content::resource_routes};
use crate::models::{
    about::About, certificate::Certificate, client::Client, industry::Industry, news::News,
    product::Product,
};
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/auth", auth_routes())
        .merge(upload_routes())
        .merge(file_routes())
        .merge(product_routes())
        .merge(industry_routes())
        .merge(resource_routes::<Client>())
        .merge(resource_routes::<Certificate>())
        .merge(resource_routes::<News>())
        .merge(resource_routes::<About>())
        .merge(quote_routes())
        .merge(notification_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me))
}

fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/upload/images", post(handlers::upload::upload_images))
        .route("/upload/docs", post(handlers::upload::upload_docs))
        .route("/upload/videos", post(handlers::upload::upload_videos))
        .layer(handlers::upload::upload_body_limit())
}

fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}", get(handlers::files::get_file))
        .route("/file-urls/{id}", get(handlers::files::get_file_url))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products/filter", post(handlers::product::filter_products))
        .route(
            "/products/by-type/{product_type}",
            get(handlers::product::list_by_type),
        )
        .merge(resource_routes::<Product>())
}

fn industry_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/industries/{id}/associate-products",
            post(handlers::industry::associate_products),
        )
        .merge(resource_routes::<Industry>())
}

fn quote_routes() -> Router<AppState> {
    let collection =
        || post(handlers::quote::submit_quote).get(handlers::quote::list_quotes);
    Router::new()
        .route("/contact-us", collection())
        .route("/contact-us/", collection())
        .route("/contact-us/{id}", get(handlers::quote::get_quote))
}

fn notification_routes() -> Router<AppState> {
    let collection = || {
        get(handlers::notification::list_notifications)
            .post(handlers::notification::create_notification)
    };
    Router::new()
        .route("/notifications", collection())
        .route("/notifications/", collection())
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            axum::routing::delete(handlers::notification::delete_notification),
        )
}
