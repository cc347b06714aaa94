//! Book copy endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::copy::{BookCopy, CopyStatusResponse, CreateCopy, UpdateCopy},
};

use super::{CurrentOwner, MessageResponse};

/// Add a copy to a book
#[utoipa::path(
    post,
    path = "/book-copies",
    tag = "copies",
    security(("identity_header" = [])),
    request_body = CreateCopy,
    responses(
        (status = 201, description = "Copy created with the next copy number", body = BookCopy),
        (status = 400, description = "Copies cannot be created checked out"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn create_copy(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Json(request): Json<CreateCopy>,
) -> AppResult<(StatusCode, Json<BookCopy>)> {
    let copy = state.services.catalog.create_copy(user.id, &request).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// Edit a copy
#[utoipa::path(
    put,
    path = "/book-copies/{id}",
    tag = "copies",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Copy ID")),
    request_body = UpdateCopy,
    responses(
        (status = 200, description = "Copy updated", body = BookCopy),
        (status = 400, description = "Status change not allowed"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_copy(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCopy>,
) -> AppResult<Json<BookCopy>> {
    let copy = state.services.catalog.update_copy(id, user.id, &request).await?;
    Ok(Json(copy))
}

/// Delete a copy
#[utoipa::path(
    delete,
    path = "/book-copies/{id}",
    tag = "copies",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy deleted", body = MessageResponse),
        (status = 400, description = "Copy is currently checked out"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_copy(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_copy(id, user.id).await?;
    Ok(Json(MessageResponse::new("Copy deleted successfully")))
}

/// Availability of a copy
#[utoipa::path(
    get,
    path = "/book-copies/{id}/status",
    tag = "copies",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Current copy status", body = CopyStatusResponse),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy_status(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CopyStatusResponse>> {
    let status = state.services.catalog.copy_status(id, user.id).await?;
    Ok(Json(status))
}
