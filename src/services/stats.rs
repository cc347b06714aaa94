//! Dashboard statistics service

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, repository::Repository};

/// Collection-wide counters for the dashboard
#[derive(Debug, Clone, Default, Serialize, FromRow, ToSchema)]
pub struct DashboardStats {
    pub total_books: i64,
    pub total_copies: i64,
    pub available_copies: i64,
    pub active_checkouts: i64,
    /// Active checkouts whose due date has passed
    pub overdue_checkouts: i64,
    pub total_borrowers: i64,
    /// Wishlist entries still in `Requested`
    pub wishlist_items: i64,
    /// Follow-ups still `Pending` or `Contacted`.
    ///
    /// Counts follow-ups whose checkout was hard-deleted. The follow-up
    /// list cannot show those (nothing to join), so after such a delete
    /// this count can exceed the number of listed follow-ups.
    pub pending_follow_ups: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self, owner: Uuid) -> AppResult<DashboardStats> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM books WHERE user_id = $1) AS total_books,
                (SELECT COUNT(*) FROM book_copies WHERE user_id = $1) AS total_copies,
                (SELECT COUNT(*) FROM book_copies
                  WHERE user_id = $1 AND status = 'Available') AS available_copies,
                (SELECT COUNT(*) FROM checkouts
                  WHERE user_id = $1 AND status = 'Checked Out') AS active_checkouts,
                (SELECT COUNT(*) FROM checkouts
                  WHERE user_id = $1 AND status = 'Checked Out'
                    AND due_date < CURRENT_DATE) AS overdue_checkouts,
                (SELECT COUNT(*) FROM borrowers WHERE user_id = $1) AS total_borrowers,
                (SELECT COUNT(*) FROM book_wishlist
                  WHERE user_id = $1 AND status = 'Requested') AS wishlist_items,
                (SELECT COUNT(*) FROM follow_ups
                  WHERE user_id = $1 AND status IN ('Pending', 'Contacted')) AS pending_follow_ups
            "#,
        )
        .bind(owner)
        .fetch_one(&self.repository.pool)
        .await?;

        Ok(stats)
    }
}
