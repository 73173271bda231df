//! Read-only aggregates over the journal

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::report::{ClientFine, TopBook},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsRepository: Send + Sync {
    /// Most borrowed books, descending by loan count. Order among equal
    /// counts is whatever the store returns.
    async fn top_books(&self, limit: i64) -> AppResult<Vec<TopBook>>;

    /// Clients whose fines sum above zero, descending by total
    async fn clients_with_fines(&self) -> AppResult<Vec<ClientFine>>;
}

#[derive(Clone)]
pub struct PgReportsRepository {
    pool: Pool<Postgres>,
}

impl PgReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportsRepository for PgReportsRepository {
    async fn top_books(&self, limit: i64) -> AppResult<Vec<TopBook>> {
        let rows = sqlx::query_as::<_, TopBook>(
            r#"
            SELECT b.id AS book_id, b.name, COUNT(j.id) AS borrow_count
            FROM journal j
            JOIN books b ON j.book_id = b.id
            GROUP BY b.id, b.name
            ORDER BY borrow_count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn clients_with_fines(&self) -> AppResult<Vec<ClientFine>> {
        let rows = sqlx::query_as::<_, ClientFine>(
            r#"
            SELECT c.id AS client_id,
                   c.last_name || ' ' || c.first_name AS client_name,
                   SUM(j.fine) AS total_fine
            FROM journal j
            JOIN clients c ON j.client_id = c.id
            GROUP BY c.id, c.last_name, c.first_name
            HAVING SUM(j.fine) > 0
            ORDER BY total_fine DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
