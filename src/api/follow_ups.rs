//! Follow-up tracking endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::follow_up::{CreateFollowUp, FollowUp, FollowUpDetails, UpdateFollowUp},
};

use super::{CurrentOwner, MessageResponse};

#[utoipa::path(
    get,
    path = "/follow-ups",
    tag = "follow-ups",
    security(("identity_header" = [])),
    responses(
        (status = 200, description = "Follow-ups, oldest checkout first", body = Vec<FollowUpDetails>)
    )
)]
pub async fn list_follow_ups(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
) -> AppResult<Json<Vec<FollowUpDetails>>> {
    let follow_ups = state.services.follow_ups.list(user.id).await?;
    Ok(Json(follow_ups))
}

/// Open a follow-up on a checkout
#[utoipa::path(
    post,
    path = "/follow-ups",
    tag = "follow-ups",
    security(("identity_header" = [])),
    request_body = CreateFollowUp,
    responses(
        (status = 201, description = "Follow-up created", body = FollowUp),
        (status = 400, description = "A follow-up already exists for this checkout"),
        (status = 404, description = "Checkout not found")
    )
)]
pub async fn create_follow_up(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Json(request): Json<CreateFollowUp>,
) -> AppResult<(StatusCode, Json<FollowUp>)> {
    let follow_up = state.services.follow_ups.create(user.id, &request).await?;
    Ok((StatusCode::CREATED, Json(follow_up)))
}

#[utoipa::path(
    put,
    path = "/follow-ups/{id}",
    tag = "follow-ups",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Follow-up ID")),
    request_body = UpdateFollowUp,
    responses(
        (status = 200, description = "Follow-up updated", body = FollowUp),
        (status = 404, description = "Follow-up not found")
    )
)]
pub async fn update_follow_up(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFollowUp>,
) -> AppResult<Json<FollowUp>> {
    let follow_up = state.services.follow_ups.update(id, user.id, &request).await?;
    Ok(Json(follow_up))
}

#[utoipa::path(
    delete,
    path = "/follow-ups/{id}",
    tag = "follow-ups",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Follow-up ID")),
    responses(
        (status = 200, description = "Follow-up deleted", body = MessageResponse),
        (status = 404, description = "Follow-up not found")
    )
)]
pub async fn delete_follow_up(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.follow_ups.delete(id, user.id).await?;
    Ok(Json(MessageResponse::new("Follow-up deleted successfully")))
}
