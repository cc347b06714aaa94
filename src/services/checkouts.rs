//! Checkout lifecycle service
//!
//! State machine per checkout: created `Checked Out`, moved to `Returned`
//! exactly once, or hard-deleted from either state.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::CheckoutConfig,
    error::{AppError, AppResult},
    models::checkout::{
        due_date_for, effective_due_days, like_pattern, ActiveCheckout, Checkout,
        CheckoutHistoryEntry, CreateCheckout, HistoryQuery,
    },
    repository::{
        checkouts::{DeleteOptions, NewCheckout},
        Repository,
    },
};

#[derive(Clone)]
pub struct CheckoutsService {
    repository: Repository,
    config: CheckoutConfig,
}

impl CheckoutsService {
    pub fn new(repository: Repository, config: CheckoutConfig) -> Self {
        Self { repository, config }
    }

    /// Resolve the request into the row to insert, stamping the checkout
    /// date now and deriving the due date from it.
    ///
    /// A requested loan length too large for the calendar falls back to the
    /// configured default, like any other unusable `due_days`.
    pub fn prepare(&self, request: CreateCheckout) -> AppResult<NewCheckout> {
        let checkout_date = Utc::now();
        let default_days = self.config.default_due_days;
        let days = effective_due_days(request.due_days, default_days);

        let due_date = due_date_for(checkout_date, days)
            .or_else(|| {
                tracing::warn!(due_days = days, "Loan length out of range, using default");
                due_date_for(checkout_date, default_days)
            })
            .ok_or_else(|| {
                AppError::Validation(format!("default_due_days {} is out of range", default_days))
            })?;

        Ok(NewCheckout {
            copy_id: request.copy_id,
            borrower_id: request.borrower_id,
            checkout_date,
            due_date,
            notes: request.notes,
        })
    }

    /// Lend a copy to a borrower
    pub async fn create_checkout(&self, owner: Uuid, request: CreateCheckout) -> AppResult<Checkout> {
        let new = self.prepare(request)?;
        self.repository.checkouts.create(owner, &new).await
    }

    /// Return an active checkout
    pub async fn return_checkout(&self, id: Uuid, owner: Uuid) -> AppResult<Checkout> {
        self.repository.checkouts.return_checkout(id, owner).await
    }

    /// Hard-delete a checkout record
    pub async fn delete_checkout(&self, id: Uuid, owner: Uuid) -> AppResult<()> {
        let options = DeleteOptions {
            release_copy: self.config.release_copy_on_delete,
            purge_follow_ups: self.config.purge_follow_ups_on_delete,
        };
        self.repository.checkouts.delete(id, owner, options).await?;
        Ok(())
    }

    pub async fn list_active(&self, owner: Uuid, search: Option<&str>) -> AppResult<Vec<ActiveCheckout>> {
        let pattern = like_pattern(search);
        self.repository.checkouts.list_active(owner, pattern.as_deref()).await
    }

    pub async fn history(&self, owner: Uuid, query: &HistoryQuery) -> AppResult<Vec<CheckoutHistoryEntry>> {
        let pattern = like_pattern(query.search.as_deref());
        self.repository
            .checkouts
            .history(owner, query.book_id, query.borrower_id, pattern.as_deref())
            .await
    }
}
