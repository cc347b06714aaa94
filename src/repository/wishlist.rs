//! Wishlist repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{WishlistPriority, WishlistStatus},
        wishlist::{sort_for_display, WishlistInput, WishlistItem},
    },
};

#[derive(Clone)]
pub struct WishlistRepository {
    pool: Pool<Postgres>,
}

impl WishlistRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Wishlist, most urgent first
    pub async fn list(&self, owner: Uuid) -> AppResult<Vec<WishlistItem>> {
        let mut items =
            sqlx::query_as::<_, WishlistItem>("SELECT * FROM book_wishlist WHERE user_id = $1")
                .bind(owner)
                .fetch_all(&self.pool)
                .await?;

        sort_for_display(&mut items);
        Ok(items)
    }

    pub async fn create(&self, owner: Uuid, title: &str, input: &WishlistInput) -> AppResult<WishlistItem> {
        let priority = input.priority.clone().unwrap_or(WishlistPriority::Medium);
        let status = input.status.clone().unwrap_or(WishlistStatus::Requested);

        let item = sqlx::query_as::<_, WishlistItem>(
            r#"
            INSERT INTO book_wishlist (user_id, title, author, isbn, requested_by, request_notes, priority, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(title)
        .bind(&input.author)
        .bind(&input.isbn)
        .bind(&input.requested_by)
        .bind(&input.request_notes)
        .bind(priority.as_str())
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        title: &str,
        input: &WishlistInput,
    ) -> AppResult<WishlistItem> {
        sqlx::query_as::<_, WishlistItem>(
            r#"
            UPDATE book_wishlist
            SET title = $3, author = $4, isbn = $5, requested_by = $6,
                request_notes = $7,
                priority = COALESCE($8, priority),
                status = COALESCE($9, status)
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(title)
        .bind(&input.author)
        .bind(&input.isbn)
        .bind(&input.requested_by)
        .bind(&input.request_notes)
        .bind(input.priority.as_ref().map(|p| p.as_str()))
        .bind(input.status.as_ref().map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Wishlist item not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_wishlist WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Wishlist item not found".to_string()));
        }
        Ok(())
    }
}
