//! Caller identity resolution.
//!
//! The rest of the service only needs a stable owner id per request; how
//! that id is obtained sits behind [`IdentityResolver`].

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::user::CurrentUser,
    repository::users::UsersRepository,
};

/// Maps a caller-supplied identity string to an owner account
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, identity: &str) -> AppResult<CurrentUser>;
}

/// Treats the identity as an email address and provisions the account on
/// first sight.
#[derive(Clone)]
pub struct EmailIdentityResolver {
    users: UsersRepository,
}

impl EmailIdentityResolver {
    pub fn new(users: UsersRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl IdentityResolver for EmailIdentityResolver {
    async fn resolve(&self, identity: &str) -> AppResult<CurrentUser> {
        let email = identity.trim();
        if email.is_empty() {
            return Err(AppError::Authentication("Authentication required".to_string()));
        }

        let user = self.users.get_or_create(email).await.map_err(|e| {
            tracing::error!(error = %e, "Identity resolution failed");
            AppError::Authentication("Authentication failed".to_string())
        })?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
        })
    }
}
