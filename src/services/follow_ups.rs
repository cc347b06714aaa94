//! Follow-up tracking service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::follow_up::{CreateFollowUp, FollowUp, FollowUpDetails, UpdateFollowUp},
    repository::Repository,
};

#[derive(Clone)]
pub struct FollowUpsService {
    repository: Repository,
}

impl FollowUpsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, owner: Uuid) -> AppResult<Vec<FollowUpDetails>> {
        self.repository.follow_ups.list(owner).await
    }

    pub async fn create(&self, owner: Uuid, request: &CreateFollowUp) -> AppResult<FollowUp> {
        self.repository
            .follow_ups
            .create(owner, request.checkout_id, request.reason.as_deref())
            .await
    }

    pub async fn update(&self, id: Uuid, owner: Uuid, update: &UpdateFollowUp) -> AppResult<FollowUp> {
        self.repository.follow_ups.update(id, owner, update).await
    }

    pub async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        self.repository.follow_ups.delete(id, owner).await
    }
}
