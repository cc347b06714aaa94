//! Borrowers service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrower::{Borrower, BorrowerDetails, BorrowerInput, BorrowerSuggestion, BorrowerSummary},
        checkout::like_pattern,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search(&self, owner: Uuid, search: Option<&str>) -> AppResult<Vec<BorrowerSummary>> {
        let pattern = like_pattern(search);
        self.repository.borrowers.search(owner, pattern.as_deref()).await
    }

    pub async fn autocomplete(&self, owner: Uuid, q: Option<&str>) -> AppResult<Vec<BorrowerSuggestion>> {
        let pattern = like_pattern(q);
        self.repository.borrowers.autocomplete(owner, pattern.as_deref()).await
    }

    pub async fn get(&self, id: Uuid, owner: Uuid) -> AppResult<BorrowerDetails> {
        self.repository.borrowers.get_by_id(id, owner).await
    }

    pub async fn create(&self, owner: Uuid, input: &BorrowerInput) -> AppResult<Borrower> {
        let (first, last) = input.names().map_err(AppError::Validation)?;
        self.repository.borrowers.create(owner, (&first, &last), input).await
    }

    pub async fn update(&self, id: Uuid, owner: Uuid, input: &BorrowerInput) -> AppResult<Borrower> {
        let (first, last) = input.names().map_err(AppError::Validation)?;
        self.repository.borrowers.update(id, owner, (&first, &last), input).await
    }

    pub async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        self.repository.borrowers.delete(id, owner).await
    }
}
