//! Dashboard endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::DashboardStats};

use super::CurrentOwner;

/// Collection counters for the caller
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    security(("identity_header" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats)
    )
)]
pub async fn get_dashboard_stats(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.stats.dashboard(user.id).await?;
    Ok(Json(stats))
}
