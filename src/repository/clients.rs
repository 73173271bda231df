//! Clients repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::is_foreign_key_violation;
use crate::{
    error::{AppError, AppResult},
    models::client::{Client, ClientInput, ClientShort},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientsRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Client>>;
    async fn list_short(&self) -> AppResult<Vec<ClientShort>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Client>;
    async fn create(&self, data: &ClientInput) -> AppResult<Client>;
    async fn update(&self, id: i32, data: &ClientInput) -> AppResult<Client>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgClientsRepository {
    pool: Pool<Postgres>,
}

impl PgClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

const CLIENT_COLUMNS: &str =
    "id, first_name, last_name, father_name, passport_seria, passport_number";

#[async_trait]
impl ClientsRepository for PgClientsRepository {
    async fn list(&self) -> AppResult<Vec<Client>> {
        let query = format!("SELECT {} FROM clients ORDER BY last_name, first_name", CLIENT_COLUMNS);
        let rows = sqlx::query_as::<_, Client>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_short(&self) -> AppResult<Vec<ClientShort>> {
        let rows = sqlx::query_as::<_, ClientShort>(
            "SELECT id, first_name, last_name, father_name FROM clients ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        let query = format!("SELECT {} FROM clients WHERE id = $1", CLIENT_COLUMNS);
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    async fn create(&self, data: &ClientInput) -> AppResult<Client> {
        let query = format!(
            r#"
            INSERT INTO clients (first_name, last_name, father_name, passport_seria, passport_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            CLIENT_COLUMNS
        );
        let row = sqlx::query_as::<_, Client>(&query)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.father_name)
            .bind(&data.passport_seria)
            .bind(&data.passport_number)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &ClientInput) -> AppResult<Client> {
        let query = format!(
            r#"
            UPDATE clients
            SET first_name = $1, last_name = $2, father_name = $3,
                passport_seria = $4, passport_number = $5
            WHERE id = $6
            RETURNING {}
            "#,
            CLIENT_COLUMNS
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.father_name)
            .bind(&data.passport_seria)
            .bind(&data.passport_number)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!("Client {} has journal entries", id))
                } else {
                    AppError::Database(e)
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Client {} not found", id)));
        }
        Ok(())
    }
}
