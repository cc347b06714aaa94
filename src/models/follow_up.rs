//! Follow-up (escalation on an overdue or problematic checkout)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::FollowUpStatus;

/// Follow-up row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FollowUp {
    pub id: Uuid,
    pub checkout_id: Uuid,
    pub user_id: Uuid,
    pub reason: Option<String>,
    #[sqlx(try_from = "String")]
    #[schema(value_type = String, example = "Pending")]
    pub status: FollowUpStatus,
    pub contacted_date: Option<NaiveDate>,
    pub resolution_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Follow-up joined with its checkout, book and borrower
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FollowUpDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub follow_up: FollowUp,
    pub checkout_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub title: String,
    pub author: String,
    pub copy_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sqlx(skip)]
    pub days_checked_out: i64,
}

/// Create follow-up request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFollowUp {
    pub checkout_id: Uuid,
    pub reason: Option<String>,
}

/// Partial follow-up update; absent (or empty) fields are left unchanged
#[serde_as]
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFollowUp {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Option<FollowUpStatus>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub contacted_date: Option<NaiveDate>,
    pub resolution_notes: Option<String>,
}

/// Display order: oldest checkout first, then status label.
pub fn sort_for_display(follow_ups: &mut [FollowUpDetails]) {
    follow_ups.sort_by(|a, b| {
        a.checkout_date
            .cmp(&b.checkout_date)
            .then_with(|| a.follow_up.status.as_str().cmp(b.follow_up.status.as_str()))
    });
}
