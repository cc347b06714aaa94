//! Business logic services

pub mod borrowers;
pub mod catalog;
pub mod checkouts;
pub mod follow_ups;
pub mod identity;
pub mod stats;
pub mod wishlist;

use std::sync::Arc;

use crate::{config::CheckoutConfig, repository::Repository};

use identity::IdentityResolver;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub identity: Arc<dyn IdentityResolver>,
    pub catalog: catalog::CatalogService,
    pub borrowers: borrowers::BorrowersService,
    pub checkouts: checkouts::CheckoutsService,
    pub follow_ups: follow_ups::FollowUpsService,
    pub wishlist: wishlist::WishlistService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        checkout_config: CheckoutConfig,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            identity,
            catalog: catalog::CatalogService::new(repository.clone()),
            borrowers: borrowers::BorrowersService::new(repository.clone()),
            checkouts: checkouts::CheckoutsService::new(repository.clone(), checkout_config),
            follow_ups: follow_ups::FollowUpsService::new(repository.clone()),
            wishlist: wishlist::WishlistService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    /// Round-trip to the store
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await
            .is_ok()
    }
}
