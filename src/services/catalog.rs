//! Catalog service: books and their physical copies

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookFields, BookInput, BookWithCounts},
        checkout::like_pattern,
        copy::{BookCopy, CopyDetails, CopyStatusResponse, CreateCopy, UpdateCopy},
    },
    repository::{ledger::CopyLedger, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    pub async fn search_books(&self, owner: Uuid, search: Option<&str>) -> AppResult<Vec<BookWithCounts>> {
        let pattern = like_pattern(search);
        self.repository.books.search(owner, pattern.as_deref()).await
    }

    pub async fn get_book(&self, id: Uuid, owner: Uuid) -> AppResult<BookWithCounts> {
        self.repository.books.get_by_id(id, owner).await
    }

    pub async fn create_book(&self, owner: Uuid, input: BookInput) -> AppResult<Book> {
        let fields = BookFields::try_from(input).map_err(AppError::Validation)?;
        self.repository.books.create(owner, &fields).await
    }

    pub async fn update_book(&self, id: Uuid, owner: Uuid, input: BookInput) -> AppResult<Book> {
        let fields = BookFields::try_from(input).map_err(AppError::Validation)?;
        self.repository.books.update(id, owner, &fields).await
    }

    pub async fn delete_book(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        self.repository.books.delete(id, owner).await
    }

    // =========================================================================
    // COPIES
    // =========================================================================

    pub async fn list_copies(&self, book_id: Uuid, owner: Uuid) -> AppResult<Vec<CopyDetails>> {
        self.repository.copies.list_for_book(book_id, owner).await
    }

    pub async fn create_copy(&self, owner: Uuid, copy: &CreateCopy) -> AppResult<BookCopy> {
        self.repository.copies.create(owner, copy).await
    }

    pub async fn update_copy(&self, id: Uuid, owner: Uuid, copy: &UpdateCopy) -> AppResult<BookCopy> {
        self.repository.copies.update(id, owner, copy).await
    }

    pub async fn delete_copy(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        self.repository.copies.delete(id, owner).await
    }

    /// Ledger status of a copy
    pub async fn copy_status(&self, id: Uuid, owner: Uuid) -> AppResult<CopyStatusResponse> {
        let mut conn = self.repository.pool.acquire().await?;
        let status = CopyLedger::get_status(&mut *conn, id, owner).await?;
        Ok(CopyStatusResponse { copy_id: id, status })
    }
}
