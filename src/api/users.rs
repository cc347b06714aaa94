//! Caller identity endpoint

use axum::Json;

use crate::{error::AppResult, models::user::CurrentUser};

use super::CurrentOwner;

/// Get the resolved caller
#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    security(("identity_header" = [])),
    responses(
        (status = 200, description = "Current user", body = CurrentUser),
        (status = 401, description = "Identity header missing")
    )
)]
pub async fn get_current_user(CurrentOwner(user): CurrentOwner) -> AppResult<Json<CurrentUser>> {
    Ok(Json(user))
}
