//! Checkout (loan of one copy to one borrower) model and related types

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, NoneAsEmptyString, PickFirst};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::enums::CheckoutStatus;

/// Checkout row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Checkout {
    pub id: Uuid,
    pub copy_id: Uuid,
    pub borrower_id: Uuid,
    pub user_id: Uuid,
    pub checkout_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub return_date: Option<DateTime<Utc>>,
    #[sqlx(try_from = "String")]
    #[schema(value_type = String, example = "Checked Out")]
    pub status: CheckoutStatus,
    pub notes: Option<String>,
}

impl Checkout {
    pub fn is_active(&self) -> bool {
        self.status == CheckoutStatus::CheckedOut
    }
}

/// Active checkout joined with its book and borrower
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ActiveCheckout {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub checkout: Checkout,
    pub title: String,
    pub author: String,
    pub copy_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Whole days since checkout
    #[sqlx(skip)]
    pub days_checked_out: i64,
}

/// Checkout of any status joined with its book and borrower
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CheckoutHistoryEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub checkout: Checkout,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub copy_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// Whole days between checkout and return (or now, if still out)
    #[sqlx(skip)]
    pub duration_days: i64,
}

/// Create checkout request
#[serde_as]
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCheckout {
    pub copy_id: Uuid,
    pub borrower_id: Uuid,
    /// Loan length in days. Empty, non-numeric or non-positive values fall
    /// back to the configured default.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub due_days: Option<i64>,
    pub notes: Option<String>,
}

/// Search filter for the active checkout list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CheckoutSearch {
    /// Case-insensitive substring of book title or borrower name
    pub search: Option<String>,
}

/// Filters for the checkout history. Empty ids are treated as unset.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct HistoryQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub book_id: Option<Uuid>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub borrower_id: Option<Uuid>,
    /// Case-insensitive substring of book title, author or borrower name
    pub search: Option<String>,
}

/// Loan length actually applied: positive requested values win, anything
/// else falls back to `default_days`.
pub fn effective_due_days(requested: Option<i64>, default_days: i64) -> i64 {
    requested.filter(|days| *days > 0).unwrap_or(default_days)
}

/// Due date for a checkout taken out at `checkout_date`, or `None` when
/// `due_days` lands outside the representable date range.
pub fn due_date_for(checkout_date: DateTime<Utc>, due_days: i64) -> Option<NaiveDate> {
    let loan = Duration::try_days(due_days)?;
    checkout_date
        .checked_add_signed(loan)
        .map(|due| due.date_naive())
}

/// Whole days elapsed from `from` to `to`, rounded down. Never negative.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}

/// Normalises a free-text search into a `LIKE` pattern, escaping the
/// wildcard characters. Blank input means "no filter".
pub fn like_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|s| !s.is_empty())?;
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_default_due_date_is_fourteen_days() {
        let checkout_date = at(2024, 1, 1, 10);
        let days = effective_due_days(None, 14);
        assert_eq!(
            due_date_for(checkout_date, days),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_out_of_range_due_days_has_no_due_date() {
        let checkout_date = at(2024, 1, 1, 10);
        assert_eq!(due_date_for(checkout_date, 1_000_000_000), None);
        assert_eq!(due_date_for(checkout_date, i64::MAX), None);
        assert!(due_date_for(checkout_date, 36_500).is_some());
    }

    #[test]
    fn test_non_positive_due_days_fall_back() {
        assert_eq!(effective_due_days(Some(0), 14), 14);
        assert_eq!(effective_due_days(Some(-3), 14), 14);
        assert_eq!(effective_due_days(Some(7), 14), 7);
    }

    #[test]
    fn test_due_days_accepts_loose_input() {
        let copy = Uuid::new_v4();
        let borrower = Uuid::new_v4();

        let parse = |due_days: serde_json::Value| -> Option<i64> {
            let body = serde_json::json!({
                "copy_id": copy,
                "borrower_id": borrower,
                "due_days": due_days,
            });
            serde_json::from_value::<CreateCheckout>(body).unwrap().due_days
        };

        assert_eq!(parse(serde_json::json!(21)), Some(21));
        assert_eq!(parse(serde_json::json!("21")), Some(21));
        assert_eq!(parse(serde_json::json!("")), None);
        assert_eq!(parse(serde_json::json!("soon")), None);
        assert_eq!(parse(serde_json::Value::Null), None);
    }

    #[test]
    fn test_due_days_may_be_omitted() {
        let body = serde_json::json!({
            "copy_id": Uuid::new_v4(),
            "borrower_id": Uuid::new_v4(),
        });
        let request: CreateCheckout = serde_json::from_value(body).unwrap();
        assert_eq!(request.due_days, None);
        assert_eq!(request.notes, None);
    }

    #[test]
    fn test_whole_days_round_down() {
        let start = at(2024, 3, 1, 18);
        assert_eq!(whole_days_between(start, at(2024, 3, 2, 17)), 0);
        assert_eq!(whole_days_between(start, at(2024, 3, 2, 18)), 1);
        assert_eq!(whole_days_between(start, at(2024, 3, 11, 9)), 9);
        assert_eq!(whole_days_between(start, at(2024, 2, 1, 0)), 0);
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern(None), None);
        assert_eq!(like_pattern(Some("   ")), None);
        assert_eq!(like_pattern(Some(" Dune ")).as_deref(), Some("%dune%"));
        assert_eq!(like_pattern(Some("100%_")).as_deref(), Some("%100\\%\\_%"));
    }
}
