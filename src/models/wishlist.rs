//! Wishlist (books the owner wants to acquire)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{WishlistPriority, WishlistStatus};

/// Wishlist row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub requested_by: Option<String>,
    pub request_notes: Option<String>,
    #[sqlx(try_from = "String")]
    #[schema(value_type = String, example = "Medium")]
    pub priority: WishlistPriority,
    #[sqlx(try_from = "String")]
    #[schema(value_type = String, example = "Requested")]
    pub status: WishlistStatus,
    pub created_at: DateTime<Utc>,
}

/// Create/update wishlist request
#[serde_as]
#[derive(Debug, Deserialize, ToSchema)]
pub struct WishlistInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub requested_by: Option<String>,
    pub request_notes: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub priority: Option<WishlistPriority>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Option<WishlistStatus>,
}

/// Display order: priority rank, newest first within a rank.
pub fn sort_for_display(items: &mut [WishlistItem]) {
    items.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
