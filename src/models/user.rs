//! Library owner accounts

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Owner account, provisioned on first request
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Resolved caller identity, passed to every owner-scoped operation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

/// Username assigned to a new account: the local part of the email.
pub fn default_username(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_username() {
        assert_eq!(default_username("ada@example.org"), "ada");
        assert_eq!(default_username("no-at-sign"), "no-at-sign");
        assert_eq!(default_username("@example.org"), "");
    }
}
