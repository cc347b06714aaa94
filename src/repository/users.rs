//! Users repository: owner accounts keyed by email

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::user::{default_username, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by email
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Fetch the user for `email`, creating it on first sight.
    ///
    /// Two first requests racing on the same email both end up with the
    /// same row: the insert is an upsert on the unique email.
    pub async fn get_or_create(&self, email: &str) -> AppResult<User> {
        if let Some(user) = self.get_by_email(email).await? {
            return Ok(user);
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(default_username(email))
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(user_id = %user.id, "Provisioned new user");
        Ok(user)
    }
}
