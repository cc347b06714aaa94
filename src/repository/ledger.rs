//! Copy availability ledger.
//!
//! There is no ledger table: the ledger is the `book_copies.status` column
//! plus the rules for moving it. Every transition runs on a connection
//! borrowed from the caller's transaction, so the copy status and the
//! checkout row it mirrors commit or roll back together.
//!
//! Invariant: a copy is `Checked Out` iff exactly one checkout with status
//! `Checked Out` references it. Hard-deleting an active checkout breaks this
//! unless `checkouts.release_copy_on_delete` is set.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::enums::CopyStatus,
};

pub struct CopyLedger;

impl CopyLedger {
    /// Current status of an owned copy (no lock).
    pub async fn get_status(
        conn: &mut PgConnection,
        copy_id: Uuid,
        owner: Uuid,
    ) -> AppResult<CopyStatus> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM book_copies WHERE id = $1 AND user_id = $2")
                .bind(copy_id)
                .bind(owner)
                .fetch_optional(conn)
                .await?;

        status.map(CopyStatus::from).ok_or(AppError::CopyNotFound)
    }

    /// Lock an owned copy row for the rest of the transaction and return
    /// its status. Concurrent checkouts of the same copy queue up here.
    pub async fn lock(
        conn: &mut PgConnection,
        copy_id: Uuid,
        owner: Uuid,
    ) -> AppResult<CopyStatus> {
        let status: Option<String> = sqlx::query_scalar(
            "SELECT status FROM book_copies WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(copy_id)
        .bind(owner)
        .fetch_optional(conn)
        .await?;

        status.map(CopyStatus::from).ok_or(AppError::CopyNotFound)
    }

    /// Lock the copy and require it to be available.
    pub async fn lock_available(
        conn: &mut PgConnection,
        copy_id: Uuid,
        owner: Uuid,
    ) -> AppResult<()> {
        match Self::lock(conn, copy_id, owner).await? {
            CopyStatus::Available => Ok(()),
            _ => Err(AppError::CopyUnavailable),
        }
    }

    /// Available -> Checked Out.
    ///
    /// Conditional on the current status, so it can never double-book even
    /// without the preceding lock.
    pub async fn mark_checked_out(
        conn: &mut PgConnection,
        copy_id: Uuid,
        owner: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE book_copies
            SET status = $3
            WHERE id = $1 AND user_id = $2 AND status = $4
            "#,
        )
        .bind(copy_id)
        .bind(owner)
        .bind(CopyStatus::CheckedOut.as_str())
        .bind(CopyStatus::Available.as_str())
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Tell "gone" apart from "taken"
        Self::get_status(conn, copy_id, owner).await?;
        Err(AppError::CopyUnavailable)
    }

    /// Back to Available. Only called for a confirmed return (or an
    /// explicitly configured release on delete).
    pub async fn mark_available(conn: &mut PgConnection, copy_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE book_copies SET status = $2 WHERE id = $1")
            .bind(copy_id)
            .bind(CopyStatus::Available.as_str())
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Whether any active checkout references the copy.
    pub async fn has_active_checkout(conn: &mut PgConnection, copy_id: Uuid) -> AppResult<bool> {
        let active: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM checkouts WHERE copy_id = $1 AND status = 'Checked Out')",
        )
        .bind(copy_id)
        .fetch_one(conn)
        .await?;
        Ok(active)
    }
}
