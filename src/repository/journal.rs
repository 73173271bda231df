//! Lending journal repository
//!
//! Issue and return each run in one transaction. The stock decrement is a
//! guarded update so concurrent issues can never take `cnt` below zero.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::journal::{overdue_fine, IssueLoan, JournalEntry, JournalEntryDetails, ReturnedLoan},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// All entries with the per-day fine of their book type, newest first
    async fn list(&self) -> AppResult<Vec<JournalEntryDetails>>;

    async fn get_by_id(&self, id: i32) -> AppResult<JournalEntry>;

    /// Take one copy off the shelf and open a journal entry.
    ///
    /// Fails with `NotFound` for an unknown book or client and with
    /// `Unavailable` when no copy is left; nothing is written in either case.
    async fn issue(&self, loan: &IssueLoan, issued_at: DateTime<Utc>) -> AppResult<JournalEntry>;

    /// Close an open entry, store its fine and put the copy back.
    ///
    /// Fails with `NotFound` for an unknown entry and with `Conflict` if it
    /// was already returned.
    async fn return_loan(&self, id: i32, returned_at: DateTime<Utc>) -> AppResult<ReturnedLoan>;

    /// Number of open entries for a client
    async fn count_on_hand(&self, client_id: i32) -> AppResult<i64>;

    /// Sum of fines over all of a client's entries
    async fn client_fine_total(&self, client_id: i32) -> AppResult<Decimal>;
}

#[derive(Clone)]
pub struct PgJournalRepository {
    pool: Pool<Postgres>,
}

impl PgJournalRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

const ENTRY_COLUMNS: &str = "id, book_id, client_id, date_beg, date_end, date_ret, fine";

/// Open loan locked for return
#[derive(FromRow)]
struct LoanToClose {
    book_id: i32,
    date_end: NaiveDate,
    date_ret: Option<DateTime<Utc>>,
    fine_per_day: Decimal,
}

#[async_trait]
impl JournalRepository for PgJournalRepository {
    async fn list(&self) -> AppResult<Vec<JournalEntryDetails>> {
        let rows = sqlx::query_as::<_, JournalEntryDetails>(
            r#"
            SELECT j.id, j.book_id, j.client_id, j.date_beg, j.date_end, j.date_ret, j.fine,
                   bt.fine AS fine_per_day
            FROM journal j
            JOIN books b ON j.book_id = b.id
            JOIN book_types bt ON b.type_id = bt.id
            ORDER BY j.date_beg DESC, j.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<JournalEntry> {
        let query = format!("SELECT {} FROM journal WHERE id = $1", ENTRY_COLUMNS);
        sqlx::query_as::<_, JournalEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Journal entry {} not found", id)))
    }

    async fn issue(&self, loan: &IssueLoan, issued_at: DateTime<Utc>) -> AppResult<JournalEntry> {
        let mut tx = self.pool.begin().await?;

        let client_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
                .bind(loan.client_id)
                .fetch_one(&mut *tx)
                .await?;
        if !client_exists {
            return Err(AppError::NotFound(format!("Client {} not found", loan.client_id)));
        }

        let reserved = sqlx::query("UPDATE books SET cnt = cnt - 1 WHERE id = $1 AND cnt > 0")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        if reserved.rows_affected() == 0 {
            let book_exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                    .bind(loan.book_id)
                    .fetch_one(&mut *tx)
                    .await?;
            return Err(if book_exists {
                AppError::Unavailable("No books available for issuing".to_string())
            } else {
                AppError::NotFound(format!("Book {} not found", loan.book_id))
            });
        }

        let query = format!(
            r#"
            INSERT INTO journal (book_id, client_id, date_beg, date_end, fine)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING {}
            "#,
            ENTRY_COLUMNS
        );
        let entry = sqlx::query_as::<_, JournalEntry>(&query)
            .bind(loan.book_id)
            .bind(loan.client_id)
            .bind(issued_at)
            .bind(loan.due_date)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    async fn return_loan(&self, id: i32, returned_at: DateTime<Utc>) -> AppResult<ReturnedLoan> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, LoanToClose>(
            r#"
            SELECT j.book_id, j.date_end, j.date_ret, bt.fine AS fine_per_day
            FROM journal j
            JOIN books b ON j.book_id = b.id
            JOIN book_types bt ON b.type_id = bt.id
            WHERE j.id = $1
            FOR UPDATE OF j
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Journal entry {} not found", id)))?;

        if loan.date_ret.is_some() {
            return Err(AppError::Conflict(format!("Journal entry {} already returned", id)));
        }

        let fine = overdue_fine(loan.date_end, returned_at, loan.fine_per_day);

        let closed = sqlx::query(
            "UPDATE journal SET date_ret = $1, fine = $2 WHERE id = $3 AND date_ret IS NULL",
        )
        .bind(returned_at)
        .bind(fine)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if closed.rows_affected() == 0 {
            return Err(AppError::Conflict(format!("Journal entry {} already returned", id)));
        }

        sqlx::query("UPDATE books SET cnt = cnt + 1 WHERE id = $1")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(ReturnedLoan {
            journal_id: id,
            book_id: loan.book_id,
            returned_at,
            fine,
        })
    }

    async fn count_on_hand(&self, client_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM journal WHERE client_id = $1 AND date_ret IS NULL",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn client_fine_total(&self, client_id: i32) -> AppResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(fine), 0)::numeric FROM journal WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
