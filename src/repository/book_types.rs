//! Book types repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::is_foreign_key_violation;
use crate::{
    error::{AppError, AppResult},
    models::book_type::{BookType, BookTypeInput},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookTypesRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<BookType>>;
    async fn get_by_id(&self, id: i32) -> AppResult<BookType>;
    async fn create(&self, data: &BookTypeInput) -> AppResult<BookType>;
    async fn update(&self, id: i32, data: &BookTypeInput) -> AppResult<BookType>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgBookTypesRepository {
    pool: Pool<Postgres>,
}

impl PgBookTypesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookTypesRepository for PgBookTypesRepository {
    async fn list(&self) -> AppResult<Vec<BookType>> {
        let rows = sqlx::query_as::<_, BookType>(
            "SELECT id, type, fine, day_count FROM book_types ORDER BY type",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<BookType> {
        sqlx::query_as::<_, BookType>("SELECT id, type, fine, day_count FROM book_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book type {} not found", id)))
    }

    async fn create(&self, data: &BookTypeInput) -> AppResult<BookType> {
        let row = sqlx::query_as::<_, BookType>(
            r#"
            INSERT INTO book_types (type, fine, day_count)
            VALUES ($1, $2, $3)
            RETURNING id, type, fine, day_count
            "#,
        )
        .bind(&data.type_name)
        .bind(data.fine)
        .bind(data.day_count)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &BookTypeInput) -> AppResult<BookType> {
        sqlx::query_as::<_, BookType>(
            r#"
            UPDATE book_types SET type = $1, fine = $2, day_count = $3
            WHERE id = $4
            RETURNING id, type, fine, day_count
            "#,
        )
        .bind(&data.type_name)
        .bind(data.fine)
        .bind(data.day_count)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book type {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!("Book type {} is used by books", id))
                } else {
                    AppError::Database(e)
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book type {} not found", id)));
        }
        Ok(())
    }
}
