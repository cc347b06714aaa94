//! Book copies repository.
//!
//! Status transitions driven by checkouts go through [`CopyLedger`]; this
//! repository only handles the manual side (create, edit, delete).

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::ledger::CopyLedger;
use crate::{
    error::{AppError, AppResult},
    models::{
        copy::{BookCopy, CopyDetails, CopyDetailsRow, CreateCopy, UpdateCopy},
        enums::CopyStatus,
    },
};

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Postgres>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Copies of an owned book, each with its active checkout (if any)
    pub async fn list_for_book(&self, book_id: Uuid, owner: Uuid) -> AppResult<Vec<CopyDetails>> {
        let rows = sqlx::query_as::<_, CopyDetailsRow>(
            r#"
            SELECT bc.*, b.title, b.author,
                   co.id AS checkout_id,
                   br.first_name AS borrower_first_name,
                   br.last_name AS borrower_last_name,
                   br.email AS borrower_email,
                   co.checkout_date, co.due_date
            FROM book_copies bc
            JOIN books b ON bc.book_id = b.id
            LEFT JOIN checkouts co ON bc.id = co.copy_id AND co.status = 'Checked Out'
            LEFT JOIN borrowers br ON co.borrower_id = br.id
            WHERE bc.book_id = $1 AND bc.user_id = $2
            ORDER BY bc.copy_number ASC
            "#,
        )
        .bind(book_id)
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CopyDetails::from).collect())
    }

    /// Create a copy with the next free copy number of its book.
    ///
    /// The parent book row is locked so two concurrent creations cannot
    /// pick the same number.
    pub async fn create(&self, owner: Uuid, copy: &CreateCopy) -> AppResult<BookCopy> {
        let status = copy.status.clone().unwrap_or_default();
        if status == CopyStatus::CheckedOut {
            return Err(AppError::BadRequest(
                "A copy can only be checked out through a checkout".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let book_exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM books WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(copy.book_id)
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;
        if book_exists.is_none() {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        let next_number: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(copy_number), 0) + 1 FROM book_copies WHERE book_id = $1",
        )
        .bind(copy.book_id)
        .fetch_one(&mut *tx)
        .await?;

        let created = sqlx::query_as::<_, BookCopy>(
            r#"
            INSERT INTO book_copies (book_id, user_id, copy_number, condition, location, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(copy.book_id)
        .bind(owner)
        .bind(next_number)
        .bind(copy.condition.as_deref().unwrap_or("Good"))
        .bind(&copy.location)
        .bind(status.as_str())
        .bind(&copy.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Manual edit of a copy.
    ///
    /// Absent fields are left unchanged; an empty `location` or `notes`
    /// clears it. The status field is free text here, with two exceptions
    /// that keep the ledger honest: nobody sets `Checked Out` by hand, and
    /// the status of a copy that is out on loan cannot be changed.
    pub async fn update(&self, id: Uuid, owner: Uuid, copy: &UpdateCopy) -> AppResult<BookCopy> {
        let mut tx = self.pool.begin().await?;

        let current = CopyLedger::lock(&mut *tx, id, owner).await?;

        if let Some(ref requested) = copy.status {
            if *requested != current {
                if *requested == CopyStatus::CheckedOut {
                    return Err(AppError::BadRequest(
                        "A copy can only be checked out through a checkout".to_string(),
                    ));
                }
                if CopyLedger::has_active_checkout(&mut *tx, id).await? {
                    return Err(AppError::Conflict(
                        "Cannot change the status of a copy that is currently checked out"
                            .to_string(),
                    ));
                }
            }
        }

        let updated = sqlx::query_as::<_, BookCopy>(
            r#"
            UPDATE book_copies
            SET condition = COALESCE(NULLIF($3::text, ''), condition),
                location = CASE WHEN $4::text IS NULL THEN location ELSE NULLIF($4::text, '') END,
                status = COALESCE($5, status),
                notes = CASE WHEN $6::text IS NULL THEN notes ELSE NULLIF($6::text, '') END
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&copy.condition)
        .bind(&copy.location)
        .bind(copy.status.as_ref().map(|s| s.as_str()))
        .bind(&copy.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a copy. Forbidden while it is checked out.
    pub async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        CopyLedger::lock(&mut *tx, id, owner).await?;

        if CopyLedger::has_active_checkout(&mut *tx, id).await? {
            return Err(AppError::Conflict(
                "Cannot delete a copy that is currently checked out".to_string(),
            ));
        }

        sqlx::query("DELETE FROM book_copies WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
