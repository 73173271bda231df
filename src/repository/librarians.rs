//! Librarian accounts repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::is_unique_violation;
use crate::{
    error::{AppError, AppResult},
    models::librarian::Librarian,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibrariansRepository: Send + Sync {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Librarian>>;
    /// Fails with `Conflict` if the username is taken
    async fn create(&self, username: &str, password_hash: &str) -> AppResult<Librarian>;
}

#[derive(Clone)]
pub struct PgLibrariansRepository {
    pool: Pool<Postgres>,
}

impl PgLibrariansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibrariansRepository for PgLibrariansRepository {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Librarian>> {
        let librarian = sqlx::query_as::<_, Librarian>(
            "SELECT id, username, password, created_at FROM librarians WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(librarian)
    }

    async fn create(&self, username: &str, password_hash: &str) -> AppResult<Librarian> {
        sqlx::query_as::<_, Librarian>(
            r#"
            INSERT INTO librarians (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Username already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })
    }
}
