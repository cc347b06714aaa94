//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFields, BookWithCounts},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Books with copy counts, by title, optionally filtered by a lowercase
    /// `LIKE` pattern over title, author and ISBN.
    pub async fn search(&self, owner: Uuid, pattern: Option<&str>) -> AppResult<Vec<BookWithCounts>> {
        let books = sqlx::query_as::<_, BookWithCounts>(
            r#"
            SELECT b.*,
                   COUNT(DISTINCT bc.id) AS total_copies,
                   COUNT(DISTINCT CASE WHEN bc.status = 'Available' THEN bc.id END) AS available_copies
            FROM books b
            LEFT JOIN book_copies bc ON b.id = bc.book_id
            WHERE b.user_id = $1
              AND ($2::text IS NULL
                   OR LOWER(b.title) LIKE $2
                   OR LOWER(b.author) LIKE $2
                   OR LOWER(b.isbn) LIKE $2)
            GROUP BY b.id
            ORDER BY b.title ASC
            "#,
        )
        .bind(owner)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get an owned book with copy counts
    pub async fn get_by_id(&self, id: Uuid, owner: Uuid) -> AppResult<BookWithCounts> {
        sqlx::query_as::<_, BookWithCounts>(
            r#"
            SELECT b.*,
                   COUNT(DISTINCT bc.id) AS total_copies,
                   COUNT(DISTINCT CASE WHEN bc.status = 'Available' THEN bc.id END) AS available_copies
            FROM books b
            LEFT JOIN book_copies bc ON b.id = bc.book_id
            WHERE b.id = $1 AND b.user_id = $2
            GROUP BY b.id
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    pub async fn create(&self, owner: Uuid, book: &BookFields) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (user_id, title, author, isbn, publisher, publication_year,
                               genre, description, language, pages)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.publisher)
        .bind(book.publication_year)
        .bind(&book.genre)
        .bind(&book.description)
        .bind(&book.language)
        .bind(book.pages)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: Uuid, owner: Uuid, book: &BookFields) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $3, author = $4, isbn = $5, publisher = $6,
                publication_year = $7, genre = $8, description = $9,
                language = $10, pages = $11
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.publisher)
        .bind(book.publication_year)
        .bind(&book.genre)
        .bind(&book.description)
        .bind(&book.language)
        .bind(book.pages)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Delete a book; its copies and their checkouts go with it.
    pub async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        Ok(())
    }
}
