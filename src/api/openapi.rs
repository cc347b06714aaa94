//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    books, borrowers, checkouts, copies, dashboard, follow_ups, health, users, wishlist,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "0.3.0",
        description = "Personal library lending REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        // Identity
        users::get_current_user,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::list_copies,
        // Copies
        copies::create_copy,
        copies::update_copy,
        copies::delete_copy,
        copies::get_copy_status,
        // Borrowers
        borrowers::list_borrowers,
        borrowers::autocomplete_borrowers,
        borrowers::get_borrower,
        borrowers::create_borrower,
        borrowers::update_borrower,
        borrowers::delete_borrower,
        // Checkouts
        checkouts::list_checkouts,
        checkouts::create_checkout,
        checkouts::return_checkout,
        checkouts::delete_checkout,
        checkouts::checkout_history,
        // Follow-ups
        follow_ups::list_follow_ups,
        follow_ups::create_follow_up,
        follow_ups::update_follow_up,
        follow_ups::delete_follow_up,
        // Wishlist
        wishlist::list_wishlist,
        wishlist::create_wishlist_item,
        wishlist::update_wishlist_item,
        wishlist::delete_wishlist_item,
        // Dashboard
        dashboard::get_dashboard_stats,
    ),
    components(
        schemas(
            // Identity
            crate::models::user::CurrentUser,
            // Books
            crate::models::book::Book,
            crate::models::book::BookWithCounts,
            crate::models::book::BookInput,
            // Copies
            crate::models::copy::BookCopy,
            crate::models::copy::CopyDetails,
            crate::models::copy::CopyCheckoutInfo,
            crate::models::copy::CreateCopy,
            crate::models::copy::UpdateCopy,
            crate::models::copy::CopyStatusResponse,
            // Borrowers
            crate::models::borrower::Borrower,
            crate::models::borrower::BorrowerSummary,
            crate::models::borrower::BorrowerDetails,
            crate::models::borrower::BorrowerSuggestion,
            crate::models::borrower::BorrowerInput,
            // Checkouts
            crate::models::checkout::Checkout,
            crate::models::checkout::ActiveCheckout,
            crate::models::checkout::CheckoutHistoryEntry,
            crate::models::checkout::CreateCheckout,
            // Follow-ups
            crate::models::follow_up::FollowUp,
            crate::models::follow_up::FollowUpDetails,
            crate::models::follow_up::CreateFollowUp,
            crate::models::follow_up::UpdateFollowUp,
            // Wishlist
            crate::models::wishlist::WishlistItem,
            crate::models::wishlist::WishlistInput,
            // Dashboard
            crate::services::stats::DashboardStats,
            // Common
            health::HealthResponse,
            super::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&IdentityHeader),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Caller identity"),
        (name = "books", description = "Book catalog"),
        (name = "copies", description = "Physical copies and their availability"),
        (name = "borrowers", description = "Borrower management"),
        (name = "checkouts", description = "Checkout lifecycle"),
        (name = "follow-ups", description = "Follow-up tracking on checkouts"),
        (name = "wishlist", description = "Books wanted"),
        (name = "dashboard", description = "Collection counters")
    )
)]
pub struct ApiDoc;

/// Declares the identity header used by every secured path
struct IdentityHeader;

impl Modify for IdentityHeader {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "identity_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-User-Email"))),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
