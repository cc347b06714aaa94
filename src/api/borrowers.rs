//! Borrower endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::borrower::{
        AutocompleteQuery, Borrower, BorrowerDetails, BorrowerInput, BorrowerQuery,
        BorrowerSuggestion, BorrowerSummary,
    },
};

use super::{CurrentOwner, MessageResponse};

/// List borrowers with their active checkout counts
#[utoipa::path(
    get,
    path = "/borrowers",
    tag = "borrowers",
    security(("identity_header" = [])),
    params(BorrowerQuery),
    responses(
        (status = 200, description = "Borrowers ordered by name", body = Vec<BorrowerSummary>)
    )
)]
pub async fn list_borrowers(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Query(query): Query<BorrowerQuery>,
) -> AppResult<Json<Vec<BorrowerSummary>>> {
    let borrowers = state
        .services
        .borrowers
        .search(user.id, query.search.as_deref())
        .await?;
    Ok(Json(borrowers))
}

/// Name suggestions for the checkout form
#[utoipa::path(
    get,
    path = "/borrowers/autocomplete",
    tag = "borrowers",
    security(("identity_header" = [])),
    params(AutocompleteQuery),
    responses(
        (status = 200, description = "Up to 10 matching borrowers", body = Vec<BorrowerSuggestion>)
    )
)]
pub async fn autocomplete_borrowers(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Query(query): Query<AutocompleteQuery>,
) -> AppResult<Json<Vec<BorrowerSuggestion>>> {
    let suggestions = state
        .services
        .borrowers
        .autocomplete(user.id, query.q.as_deref())
        .await?;
    Ok(Json(suggestions))
}

/// Get a borrower
#[utoipa::path(
    get,
    path = "/borrowers/{id}",
    tag = "borrowers",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower with checkout counts", body = BorrowerDetails),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowerDetails>> {
    let borrower = state.services.borrowers.get(id, user.id).await?;
    Ok(Json(borrower))
}

/// Add a borrower
#[utoipa::path(
    post,
    path = "/borrowers",
    tag = "borrowers",
    security(("identity_header" = [])),
    request_body = BorrowerInput,
    responses(
        (status = 201, description = "Borrower created", body = Borrower),
        (status = 400, description = "Name missing")
    )
)]
pub async fn create_borrower(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Json(input): Json<BorrowerInput>,
) -> AppResult<(StatusCode, Json<Borrower>)> {
    let borrower = state.services.borrowers.create(user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(borrower)))
}

/// Replace a borrower's details
#[utoipa::path(
    put,
    path = "/borrowers/{id}",
    tag = "borrowers",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Borrower ID")),
    request_body = BorrowerInput,
    responses(
        (status = 200, description = "Borrower updated", body = Borrower),
        (status = 400, description = "Name missing"),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn update_borrower(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
    Json(input): Json<BorrowerInput>,
) -> AppResult<Json<Borrower>> {
    let borrower = state.services.borrowers.update(id, user.id, &input).await?;
    Ok(Json(borrower))
}

/// Delete a borrower
#[utoipa::path(
    delete,
    path = "/borrowers/{id}",
    tag = "borrowers",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower deleted", body = MessageResponse),
        (status = 400, description = "Borrower has active checkouts"),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn delete_borrower(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.borrowers.delete(id, user.id).await?;
    Ok(Json(MessageResponse::new("Borrower deleted successfully")))
}
