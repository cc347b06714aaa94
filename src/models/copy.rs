//! Book copy (physical instance) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::CopyStatus;

/// Book copy row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookCopy {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub copy_number: i32,
    pub condition: String,
    pub location: Option<String>,
    #[sqlx(try_from = "String")]
    #[schema(value_type = String, example = "Available")]
    pub status: CopyStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Summary of the active checkout holding a copy
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CopyCheckoutInfo {
    pub id: Uuid,
    pub borrower_name: String,
    pub borrower_email: Option<String>,
    pub checkout_date: DateTime<Utc>,
    pub due_date: NaiveDate,
}

/// Copy listing entry for a book
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CopyDetails {
    #[serde(flatten)]
    pub copy: BookCopy,
    pub title: String,
    pub author: String,
    pub checkout_info: Option<CopyCheckoutInfo>,
}

/// Row shape of the copy listing query (LEFT JOIN on the active checkout)
#[derive(Debug, FromRow)]
pub struct CopyDetailsRow {
    #[sqlx(flatten)]
    pub copy: BookCopy,
    pub title: String,
    pub author: String,
    pub checkout_id: Option<Uuid>,
    pub borrower_first_name: Option<String>,
    pub borrower_last_name: Option<String>,
    pub borrower_email: Option<String>,
    pub checkout_date: Option<DateTime<Utc>>,
    pub due_date: Option<NaiveDate>,
}

impl From<CopyDetailsRow> for CopyDetails {
    fn from(row: CopyDetailsRow) -> Self {
        let checkout_info = match (row.checkout_id, row.checkout_date, row.due_date) {
            (Some(id), Some(checkout_date), Some(due_date)) => Some(CopyCheckoutInfo {
                id,
                borrower_name: format!(
                    "{} {}",
                    row.borrower_first_name.unwrap_or_default(),
                    row.borrower_last_name.unwrap_or_default()
                )
                .trim()
                .to_string(),
                borrower_email: row.borrower_email,
                checkout_date,
                due_date,
            }),
            _ => None,
        };

        Self {
            copy: row.copy,
            title: row.title,
            author: row.author,
            checkout_info,
        }
    }
}

/// Create copy request
#[serde_as]
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCopy {
    pub book_id: Uuid,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub condition: Option<String>,
    pub location: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Option<CopyStatus>,
    pub notes: Option<String>,
}

/// Update copy request. Absent fields keep their value; `""` clears
/// `location` and `notes`.
#[serde_as]
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCopy {
    pub condition: Option<String>,
    pub location: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Option<CopyStatus>,
    pub notes: Option<String>,
}

/// Ledger view of a single copy
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CopyStatusResponse {
    pub copy_id: Uuid,
    #[schema(value_type = String)]
    pub status: CopyStatus,
}
