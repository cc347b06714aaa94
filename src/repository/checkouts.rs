//! Checkouts repository for database operations.
//!
//! Create and return are single transactions spanning the checkout row and
//! the copy status (through [`CopyLedger`]). Either both change or neither
//! does; a failure anywhere drops the transaction, which rolls it back.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::ledger::CopyLedger;
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::{
        checkout::{whole_days_between, ActiveCheckout, Checkout, CheckoutHistoryEntry},
        enums::CheckoutStatus,
    },
};

/// Partial unique index allowing one open checkout per copy
const ONE_ACTIVE_PER_COPY: &str = "checkouts_one_active_per_copy";

/// Fully resolved checkout to insert
#[derive(Debug, Clone)]
pub struct NewCheckout {
    pub copy_id: Uuid,
    pub borrower_id: Uuid,
    pub checkout_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

/// What else a hard delete touches
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    /// Put the copy back to Available when the deleted checkout was active
    pub release_copy: bool,
    /// Remove the follow-up attached to the checkout
    pub purge_follow_ups: bool,
}

#[derive(Clone)]
pub struct CheckoutsRepository {
    pool: Pool<Postgres>,
}

impl CheckoutsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Lend a copy.
    ///
    /// Steps, all in one transaction: lock the owned copy and require it
    /// available, check the borrower belongs to the owner, insert the
    /// checkout, flip the copy to Checked Out.
    pub async fn create(&self, owner: Uuid, new: &NewCheckout) -> AppResult<Checkout> {
        let mut tx = self.pool.begin().await?;

        CopyLedger::lock_available(&mut *tx, new.copy_id, owner).await?;

        let borrower: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM borrowers WHERE id = $1 AND user_id = $2")
                .bind(new.borrower_id)
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;
        if borrower.is_none() {
            return Err(AppError::NotFound("Borrower not found".to_string()));
        }

        let checkout = sqlx::query_as::<_, Checkout>(
            r#"
            INSERT INTO checkouts (copy_id, borrower_id, user_id, checkout_date, due_date, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.copy_id)
        .bind(new.borrower_id)
        .bind(owner)
        .bind(new.checkout_date)
        .bind(new.due_date)
        .bind(CheckoutStatus::CheckedOut.as_str())
        .bind(&new.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, ONE_ACTIVE_PER_COPY) {
                AppError::CopyUnavailable
            } else {
                AppError::Database(e)
            }
        })?;

        CopyLedger::mark_checked_out(&mut *tx, new.copy_id, owner).await?;

        tx.commit().await?;

        tracing::info!(
            checkout_id = %checkout.id,
            copy_id = %checkout.copy_id,
            borrower_id = %checkout.borrower_id,
            due_date = %checkout.due_date,
            "Copy checked out"
        );

        Ok(checkout)
    }

    /// Close an active checkout and make its copy available again.
    ///
    /// An already returned checkout is reported as not found: only active
    /// checkouts can be returned.
    pub async fn return_checkout(&self, id: Uuid, owner: Uuid) -> AppResult<Checkout> {
        let mut tx = self.pool.begin().await?;

        let active = sqlx::query_as::<_, Checkout>(
            r#"
            SELECT * FROM checkouts
            WHERE id = $1 AND user_id = $2 AND status = $3
            FOR UPDATE
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(CheckoutStatus::CheckedOut.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::CheckoutNotFound)?;

        let returned = sqlx::query_as::<_, Checkout>(
            r#"
            UPDATE checkouts
            SET status = $2, return_date = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(CheckoutStatus::Returned.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        CopyLedger::mark_available(&mut *tx, active.copy_id).await?;

        tx.commit().await?;

        tracing::info!(checkout_id = %id, copy_id = %active.copy_id, "Copy returned");

        Ok(returned)
    }

    /// Hard delete, whatever the status.
    ///
    /// By default the copy status and the follow-up are left as they are,
    /// so deleting an active checkout leaves its copy Checked Out.
    pub async fn delete(&self, id: Uuid, owner: Uuid, options: DeleteOptions) -> AppResult<Checkout> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, Checkout>(
            "DELETE FROM checkouts WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Checkout not found".to_string()))?;

        if deleted.is_active() {
            if options.release_copy {
                CopyLedger::mark_available(&mut *tx, deleted.copy_id).await?;
            } else {
                tracing::warn!(
                    checkout_id = %id,
                    copy_id = %deleted.copy_id,
                    "Deleted an active checkout; copy stays Checked Out"
                );
            }
        }

        if options.purge_follow_ups {
            sqlx::query("DELETE FROM follow_ups WHERE checkout_id = $1 AND user_id = $2")
                .bind(id)
                .bind(owner)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }

    /// Active checkouts, oldest first, optionally filtered by a lowercase
    /// `LIKE` pattern over book title and borrower names.
    pub async fn list_active(
        &self,
        owner: Uuid,
        pattern: Option<&str>,
    ) -> AppResult<Vec<ActiveCheckout>> {
        let mut rows = sqlx::query_as::<_, ActiveCheckout>(
            r#"
            SELECT co.*,
                   b.title, b.author,
                   bc.copy_number,
                   br.first_name, br.last_name, br.email, br.phone
            FROM checkouts co
            JOIN book_copies bc ON co.copy_id = bc.id
            JOIN books b ON bc.book_id = b.id
            JOIN borrowers br ON co.borrower_id = br.id
            WHERE co.user_id = $1 AND co.status = 'Checked Out'
              AND ($2::text IS NULL
                   OR LOWER(b.title) LIKE $2
                   OR LOWER(br.first_name) LIKE $2
                   OR LOWER(br.last_name) LIKE $2)
            ORDER BY co.checkout_date ASC
            "#,
        )
        .bind(owner)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        for row in &mut rows {
            row.days_checked_out = whole_days_between(row.checkout.checkout_date, now);
        }

        Ok(rows)
    }

    /// All checkouts, newest first, with optional book, borrower and text
    /// filters (the text filter also covers the author).
    pub async fn history(
        &self,
        owner: Uuid,
        book_id: Option<Uuid>,
        borrower_id: Option<Uuid>,
        pattern: Option<&str>,
    ) -> AppResult<Vec<CheckoutHistoryEntry>> {
        let mut rows = sqlx::query_as::<_, CheckoutHistoryEntry>(
            r#"
            SELECT co.*,
                   b.title, b.author, b.isbn,
                   bc.copy_number,
                   br.first_name, br.last_name, br.email
            FROM checkouts co
            JOIN book_copies bc ON co.copy_id = bc.id
            JOIN books b ON bc.book_id = b.id
            JOIN borrowers br ON co.borrower_id = br.id
            WHERE co.user_id = $1
              AND ($2::uuid IS NULL OR b.id = $2)
              AND ($3::uuid IS NULL OR br.id = $3)
              AND ($4::text IS NULL
                   OR LOWER(b.title) LIKE $4
                   OR LOWER(b.author) LIKE $4
                   OR LOWER(br.first_name) LIKE $4
                   OR LOWER(br.last_name) LIKE $4)
            ORDER BY co.checkout_date DESC
            "#,
        )
        .bind(owner)
        .bind(book_id)
        .bind(borrower_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        for row in &mut rows {
            let end = row.checkout.return_date.unwrap_or(now);
            row.duration_days = whole_days_between(row.checkout.checkout_date, end);
        }

        Ok(rows)
    }
}
