//! Lending journal model and overdue fine arithmetic

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Due dates are written and parsed in this format
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Journal entry (one loan) from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JournalEntry {
    pub id: i32,
    pub book_id: i32,
    pub client_id: i32,
    /// Loan start
    pub date_beg: DateTime<Utc>,
    /// Due date
    pub date_end: NaiveDate,
    /// Return timestamp, `None` while the book is on loan
    pub date_ret: Option<DateTime<Utc>>,
    /// Fine assessed at return
    pub fine: Decimal,
}

impl JournalEntry {
    pub fn is_open(&self) -> bool {
        self.date_ret.is_none()
    }
}

/// Journal entry joined with the per-day fine of its book type
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JournalEntryDetails {
    pub id: i32,
    pub book_id: i32,
    pub client_id: i32,
    pub date_beg: DateTime<Utc>,
    pub date_end: NaiveDate,
    pub date_ret: Option<DateTime<Utc>>,
    pub fine: Decimal,
    pub fine_per_day: Decimal,
}

/// Validated issue command
#[derive(Debug, Clone, PartialEq)]
pub struct IssueLoan {
    pub book_id: i32,
    pub client_id: i32,
    pub due_date: NaiveDate,
}

/// Outcome of closing a loan
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReturnedLoan {
    pub journal_id: i32,
    pub book_id: i32,
    pub returned_at: DateTime<Utc>,
    pub fine: Decimal,
}

/// Parse a `YYYY-MM-DD` due date
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    // chrono skips whitespace before numeric fields
    if !value.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT).ok()
}

/// Whole days elapsed past the start of the due date.
///
/// Partial days are truncated, so the first 24 hours after the due instant
/// count as zero days late.
pub fn days_late(due: NaiveDate, returned_at: DateTime<Utc>) -> i64 {
    let due_at = due.and_time(NaiveTime::MIN).and_utc();
    if returned_at <= due_at {
        return 0;
    }
    (returned_at - due_at).num_days()
}

/// Fine owed for a return at `returned_at`
pub fn overdue_fine(due: NaiveDate, returned_at: DateTime<Utc>, fine_per_day: Decimal) -> Decimal {
    fine_per_day * Decimal::from(days_late(due, returned_at))
}
