//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::is_foreign_key_violation;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookShort, CreateBook, UpdateBook},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Book>>;
    async fn list_short(&self) -> AppResult<Vec<BookShort>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Book>;
    async fn create(&self, book: &CreateBook) -> AppResult<Book>;
    async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn unknown_type(err: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&err) {
        AppError::Validation("Book type does not exist".to_string())
    } else {
        AppError::Database(err)
    }
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT id, name, cnt, type_id FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn list_short(&self) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>("SELECT id, name, type_id FROM books ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT id, name, cnt, type_id FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, cnt, type_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, cnt, type_id
            "#,
        )
        .bind(&book.name)
        .bind(book.cnt)
        .bind(book.type_id)
        .fetch_one(&self.pool)
        .await
        .map_err(unknown_type)
    }

    async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET name = $1, type_id = $2
            WHERE id = $3
            RETURNING id, name, cnt, type_id
            "#,
        )
        .bind(&book.name)
        .bind(book.type_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unknown_type)?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!("Book {} has journal entries", id))
                } else {
                    AppError::Database(e)
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
