//! Borrowers repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::borrower::{Borrower, BorrowerDetails, BorrowerInput, BorrowerSuggestion, BorrowerSummary},
};

/// Maximum number of autocomplete suggestions
const AUTOCOMPLETE_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct BorrowersRepository {
    pool: Pool<Postgres>,
}

impl BorrowersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrowers with their active checkout count, by name
    pub async fn search(&self, owner: Uuid, pattern: Option<&str>) -> AppResult<Vec<BorrowerSummary>> {
        let borrowers = sqlx::query_as::<_, BorrowerSummary>(
            r#"
            SELECT b.*,
                   COUNT(DISTINCT CASE WHEN co.status = 'Checked Out' THEN co.id END) AS active_checkouts
            FROM borrowers b
            LEFT JOIN checkouts co ON b.id = co.borrower_id
            WHERE b.user_id = $1
              AND ($2::text IS NULL
                   OR LOWER(b.first_name) LIKE $2
                   OR LOWER(b.last_name) LIKE $2
                   OR LOWER(b.email) LIKE $2)
            GROUP BY b.id
            ORDER BY b.last_name ASC, b.first_name ASC
            "#,
        )
        .bind(owner)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(borrowers)
    }

    /// Quick name lookup for the checkout form
    pub async fn autocomplete(
        &self,
        owner: Uuid,
        pattern: Option<&str>,
    ) -> AppResult<Vec<BorrowerSuggestion>> {
        let suggestions = sqlx::query_as::<_, BorrowerSuggestion>(
            r#"
            SELECT id, first_name, last_name, email, phone
            FROM borrowers
            WHERE user_id = $1
              AND ($2::text IS NULL
                   OR LOWER(first_name) LIKE $2
                   OR LOWER(last_name) LIKE $2)
            ORDER BY last_name ASC, first_name ASC
            LIMIT $3
            "#,
        )
        .bind(owner)
        .bind(pattern)
        .bind(AUTOCOMPLETE_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(suggestions)
    }

    pub async fn get_by_id(&self, id: Uuid, owner: Uuid) -> AppResult<BorrowerDetails> {
        sqlx::query_as::<_, BorrowerDetails>(
            r#"
            SELECT b.*,
                   COUNT(DISTINCT CASE WHEN co.status = 'Checked Out' THEN co.id END) AS active_checkouts,
                   COUNT(DISTINCT CASE WHEN co.status = 'Returned' THEN co.id END) AS total_checkouts
            FROM borrowers b
            LEFT JOIN checkouts co ON b.id = co.borrower_id
            WHERE b.id = $1 AND b.user_id = $2
            GROUP BY b.id
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Borrower not found".to_string()))
    }

    pub async fn create(
        &self,
        owner: Uuid,
        (first_name, last_name): (&str, &str),
        input: &BorrowerInput,
    ) -> AppResult<Borrower> {
        let borrower = sqlx::query_as::<_, Borrower>(
            r#"
            INSERT INTO borrowers (user_id, first_name, last_name, email, phone, alt_phone, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(first_name)
        .bind(last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.alt_phone)
        .bind(&input.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(borrower)
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        (first_name, last_name): (&str, &str),
        input: &BorrowerInput,
    ) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>(
            r#"
            UPDATE borrowers
            SET first_name = $3, last_name = $4, email = $5,
                phone = $6, alt_phone = $7, address = $8
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(first_name)
        .bind(last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.alt_phone)
        .bind(&input.address)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Borrower not found".to_string()))
    }

    /// Delete a borrower. Refused while they hold an active checkout.
    pub async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM borrowers WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Borrower not found".to_string()));
        }

        let active: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM checkouts WHERE borrower_id = $1 AND status = 'Checked Out')",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if active {
            return Err(AppError::Conflict(
                "Cannot delete borrower with active checkouts".to_string(),
            ));
        }

        sqlx::query("DELETE FROM borrowers WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
