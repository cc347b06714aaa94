//! Checkout lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::checkout::{
        ActiveCheckout, Checkout, CheckoutHistoryEntry, CheckoutSearch, CreateCheckout,
        HistoryQuery,
    },
};

use super::{CurrentOwner, MessageResponse};

/// List active checkouts, oldest first
#[utoipa::path(
    get,
    path = "/checkouts",
    tag = "checkouts",
    security(("identity_header" = [])),
    params(CheckoutSearch),
    responses(
        (status = 200, description = "Active checkouts", body = Vec<ActiveCheckout>)
    )
)]
pub async fn list_checkouts(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Query(query): Query<CheckoutSearch>,
) -> AppResult<Json<Vec<ActiveCheckout>>> {
    let checkouts = state
        .services
        .checkouts
        .list_active(user.id, query.search.as_deref())
        .await?;
    Ok(Json(checkouts))
}

/// Lend a copy to a borrower
#[utoipa::path(
    post,
    path = "/checkouts",
    tag = "checkouts",
    security(("identity_header" = [])),
    request_body = CreateCheckout,
    responses(
        (status = 201, description = "Checkout created", body = Checkout),
        (status = 400, description = "Copy is not available"),
        (status = 404, description = "Copy or borrower not found")
    )
)]
pub async fn create_checkout(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Json(request): Json<CreateCheckout>,
) -> AppResult<(StatusCode, Json<Checkout>)> {
    let checkout = state.services.checkouts.create_checkout(user.id, request).await?;
    Ok((StatusCode::CREATED, Json(checkout)))
}

/// Return a checked out copy
#[utoipa::path(
    put,
    path = "/checkouts/{id}/return",
    tag = "checkouts",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Checkout ID")),
    responses(
        (status = 200, description = "Checkout returned", body = Checkout),
        (status = 404, description = "Active checkout not found")
    )
)]
pub async fn return_checkout(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Checkout>> {
    let checkout = state.services.checkouts.return_checkout(id, user.id).await?;
    Ok(Json(checkout))
}

/// Delete a checkout record
#[utoipa::path(
    delete,
    path = "/checkouts/{id}",
    tag = "checkouts",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Checkout ID")),
    responses(
        (status = 200, description = "Checkout deleted", body = MessageResponse),
        (status = 404, description = "Checkout not found")
    )
)]
pub async fn delete_checkout(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.checkouts.delete_checkout(id, user.id).await?;
    Ok(Json(MessageResponse::new("Checkout deleted successfully")))
}

/// Checkout history, newest first
#[utoipa::path(
    get,
    path = "/checkout-history",
    tag = "checkouts",
    security(("identity_header" = [])),
    params(HistoryQuery),
    responses(
        (status = 200, description = "Checkouts of any status", body = Vec<CheckoutHistoryEntry>)
    )
)]
pub async fn checkout_history(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<CheckoutHistoryEntry>>> {
    let history = state.services.checkouts.history(user.id, &query).await?;
    Ok(Json(history))
}
