//! Shelfmark Personal Library Server
//!
//! A REST JSON API for cataloguing a personal book collection, lending
//! copies to borrowers and following up on overdue checkouts.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Identity
        .route("/user", get(api::users::get_current_user))
        // Books
        .route("/books", get(api::books::list_books).post(api::books::create_book))
        .route(
            "/books/:id",
            get(api::books::get_book)
                .put(api::books::update_book)
                .delete(api::books::delete_book),
        )
        .route("/books/:id/copies", get(api::books::list_copies))
        // Copies
        .route("/book-copies", post(api::copies::create_copy))
        .route(
            "/book-copies/:id",
            put(api::copies::update_copy).delete(api::copies::delete_copy),
        )
        .route("/book-copies/:id/status", get(api::copies::get_copy_status))
        // Borrowers
        .route(
            "/borrowers",
            get(api::borrowers::list_borrowers).post(api::borrowers::create_borrower),
        )
        .route("/borrowers/autocomplete", get(api::borrowers::autocomplete_borrowers))
        .route(
            "/borrowers/:id",
            get(api::borrowers::get_borrower)
                .put(api::borrowers::update_borrower)
                .delete(api::borrowers::delete_borrower),
        )
        // Checkouts
        .route(
            "/checkouts",
            get(api::checkouts::list_checkouts).post(api::checkouts::create_checkout),
        )
        .route("/checkouts/:id", axum::routing::delete(api::checkouts::delete_checkout))
        .route("/checkouts/:id/return", put(api::checkouts::return_checkout))
        .route("/checkout-history", get(api::checkouts::checkout_history))
        // Follow-ups
        .route(
            "/follow-ups",
            get(api::follow_ups::list_follow_ups).post(api::follow_ups::create_follow_up),
        )
        .route(
            "/follow-ups/:id",
            put(api::follow_ups::update_follow_up).delete(api::follow_ups::delete_follow_up),
        )
        // Wishlist
        .route(
            "/wishlist",
            get(api::wishlist::list_wishlist).post(api::wishlist::create_wishlist_item),
        )
        .route(
            "/wishlist/:id",
            put(api::wishlist::update_wishlist_item).delete(api::wishlist::delete_wishlist_item),
        )
        // Dashboard
        .route("/dashboard/stats", get(api::dashboard::get_dashboard_stats))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS restricted to the configured origins; an empty list allows any.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
