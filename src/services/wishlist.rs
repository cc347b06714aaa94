//! Wishlist service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::wishlist::{WishlistInput, WishlistItem},
    repository::Repository,
};

#[derive(Clone)]
pub struct WishlistService {
    repository: Repository,
}

impl WishlistService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, owner: Uuid) -> AppResult<Vec<WishlistItem>> {
        self.repository.wishlist.list(owner).await
    }

    pub async fn create(&self, owner: Uuid, input: &WishlistInput) -> AppResult<WishlistItem> {
        let title = required_title(input)?;
        self.repository.wishlist.create(owner, title, input).await
    }

    pub async fn update(&self, id: Uuid, owner: Uuid, input: &WishlistInput) -> AppResult<WishlistItem> {
        let title = required_title(input)?;
        self.repository.wishlist.update(id, owner, title, input).await
    }

    pub async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        self.repository.wishlist.delete(id, owner).await
    }
}

fn required_title(input: &WishlistInput) -> AppResult<&str> {
    input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("title is required".to_string()))
}
