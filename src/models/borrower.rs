//! Borrower model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Borrower row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Borrower {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alt_phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Borrower listing entry
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowerSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub borrower: Borrower,
    pub active_checkouts: i64,
}

/// Borrower detail, with returned-checkout count
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowerDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub borrower: Borrower,
    pub active_checkouts: i64,
    pub total_checkouts: i64,
}

/// Autocomplete suggestion
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowerSuggestion {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Create/update borrower request
#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowerInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alt_phone: Option<String>,
    pub address: Option<String>,
}

impl BorrowerInput {
    /// Trimmed first and last name, both required.
    pub fn names(&self) -> Result<(String, String), String> {
        let first = self.first_name.as_deref().map(str::trim).unwrap_or_default();
        let last = self.last_name.as_deref().map(str::trim).unwrap_or_default();
        if first.is_empty() || last.is_empty() {
            return Err("first_name and last_name are required".to_string());
        }
        Ok((first.to_string(), last.to_string()))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BorrowerQuery {
    /// Case-insensitive substring of first name, last name or email
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AutocompleteQuery {
    /// Name prefix or fragment
    pub q: Option<String>,
}
