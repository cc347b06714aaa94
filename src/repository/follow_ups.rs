//! Follow-ups repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::{
        checkout::whole_days_between,
        enums::FollowUpStatus,
        follow_up::{sort_for_display, FollowUp, FollowUpDetails, UpdateFollowUp},
    },
};

/// Unique index allowing one follow-up per checkout
const ONE_PER_CHECKOUT: &str = "follow_ups_one_per_checkout";

#[derive(Clone)]
pub struct FollowUpsRepository {
    pool: Pool<Postgres>,
}

impl FollowUpsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Follow-ups joined for display, oldest checkout first.
    ///
    /// Follow-ups whose checkout was deleted have nothing to join to and
    /// are not listed.
    pub async fn list(&self, owner: Uuid) -> AppResult<Vec<FollowUpDetails>> {
        let mut rows = sqlx::query_as::<_, FollowUpDetails>(
            r#"
            SELECT fu.*,
                   co.checkout_date, co.due_date,
                   b.title, b.author,
                   bc.copy_number,
                   br.first_name, br.last_name, br.email, br.phone
            FROM follow_ups fu
            JOIN checkouts co ON fu.checkout_id = co.id
            JOIN book_copies bc ON co.copy_id = bc.id
            JOIN books b ON bc.book_id = b.id
            JOIN borrowers br ON co.borrower_id = br.id
            WHERE fu.user_id = $1
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        for row in &mut rows {
            row.days_checked_out = whole_days_between(row.checkout_date, now);
        }
        // Sorted here rather than in SQL so the status tie-break follows the
        // label byte order regardless of the database collation.
        sort_for_display(&mut rows);

        Ok(rows)
    }

    /// Attach a follow-up to an owned checkout.
    ///
    /// At most one per checkout: checked first, and backed by a unique index
    /// for the case where two requests pass the check together.
    pub async fn create(
        &self,
        owner: Uuid,
        checkout_id: Uuid,
        reason: Option<&str>,
    ) -> AppResult<FollowUp> {
        let mut tx = self.pool.begin().await?;

        let checkout: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM checkouts WHERE id = $1 AND user_id = $2")
                .bind(checkout_id)
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;
        if checkout.is_none() {
            return Err(AppError::NotFound("Checkout not found".to_string()));
        }

        let existing: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follow_ups WHERE checkout_id = $1 AND user_id = $2)",
        )
        .bind(checkout_id)
        .bind(owner)
        .fetch_one(&mut *tx)
        .await?;
        if existing {
            return Err(AppError::FollowUpAlreadyExists);
        }

        let follow_up = sqlx::query_as::<_, FollowUp>(
            r#"
            INSERT INTO follow_ups (checkout_id, user_id, reason, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(checkout_id)
        .bind(owner)
        .bind(reason)
        .bind(FollowUpStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, ONE_PER_CHECKOUT) {
                AppError::FollowUpAlreadyExists
            } else {
                AppError::Database(e)
            }
        })?;

        tx.commit().await?;

        tracing::info!(follow_up_id = %follow_up.id, checkout_id = %checkout_id, "Follow-up opened");
        Ok(follow_up)
    }

    /// Partial update; absent fields keep their value.
    pub async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        update: &UpdateFollowUp,
    ) -> AppResult<FollowUp> {
        sqlx::query_as::<_, FollowUp>(
            r#"
            UPDATE follow_ups
            SET status = COALESCE($3, status),
                contacted_date = COALESCE($4, contacted_date),
                resolution_notes = COALESCE($5, resolution_notes)
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(update.status.as_ref().map(|s| s.as_str()))
        .bind(update.contacted_date)
        .bind(&update.resolution_notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::FollowUpNotFound)
    }

    pub async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM follow_ups WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::FollowUpNotFound);
        }
        Ok(())
    }
}
