//! Wishlist endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::wishlist::{WishlistInput, WishlistItem},
};

use super::{CurrentOwner, MessageResponse};

#[utoipa::path(
    get,
    path = "/wishlist",
    tag = "wishlist",
    security(("identity_header" = [])),
    responses(
        (status = 200, description = "Wishlist by priority, newest first", body = Vec<WishlistItem>)
    )
)]
pub async fn list_wishlist(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
) -> AppResult<Json<Vec<WishlistItem>>> {
    let items = state.services.wishlist.list(user.id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/wishlist",
    tag = "wishlist",
    security(("identity_header" = [])),
    request_body = WishlistInput,
    responses(
        (status = 201, description = "Wishlist entry created", body = WishlistItem),
        (status = 400, description = "Title missing")
    )
)]
pub async fn create_wishlist_item(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Json(input): Json<WishlistInput>,
) -> AppResult<(StatusCode, Json<WishlistItem>)> {
    let item = state.services.wishlist.create(user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/wishlist/{id}",
    tag = "wishlist",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Wishlist entry ID")),
    request_body = WishlistInput,
    responses(
        (status = 200, description = "Wishlist entry updated", body = WishlistItem),
        (status = 404, description = "Wishlist entry not found")
    )
)]
pub async fn update_wishlist_item(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
    Json(input): Json<WishlistInput>,
) -> AppResult<Json<WishlistItem>> {
    let item = state.services.wishlist.update(id, user.id, &input).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/wishlist/{id}",
    tag = "wishlist",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Wishlist entry ID")),
    responses(
        (status = 200, description = "Wishlist entry deleted", body = MessageResponse),
        (status = 404, description = "Wishlist entry not found")
    )
)]
pub async fn delete_wishlist_item(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.wishlist.delete(id, user.id).await?;
    Ok(Json(MessageResponse::new("Wishlist item deleted successfully")))
}
