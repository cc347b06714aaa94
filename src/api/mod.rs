//! API handlers for Shelfmark REST endpoints

pub mod books;
pub mod borrowers;
pub mod checkouts;
pub mod copies;
pub mod dashboard;
pub mod follow_ups;
pub mod health;
pub mod openapi;
pub mod users;
pub mod wishlist;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::user::CurrentUser, AppState};

/// Extractor for the calling owner, resolved from the identity header
pub struct CurrentOwner(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for CurrentOwner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = parts
            .headers
            .get(state.config.auth.identity_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Authentication("Authentication required".to_string()))?;

        let user = state.services.identity.resolve(identity).await?;
        Ok(CurrentOwner(user))
    }
}

/// Plain confirmation body returned by delete endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
