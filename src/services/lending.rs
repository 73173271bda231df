//! Lending: issuing and returning books, fines and holdings

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{
        journal::{parse_due_date, IssueLoan, JournalEntry, JournalEntryDetails, ReturnedLoan},
        librarian::Actor,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
}

impl LendingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend one copy of a book to a client until `due_date` (`YYYY-MM-DD`)
    pub async fn issue_book(
        &self,
        actor: &Actor,
        book_id: i32,
        client_id: i32,
        due_date: &str,
    ) -> AppResult<JournalEntry> {
        let due_date = parse_due_date(due_date)
            .ok_or_else(|| AppError::Validation("Invalid date format. Use YYYY-MM-DD".to_string()))?;

        let loan = IssueLoan {
            book_id,
            client_id,
            due_date,
        };

        match self.repository.journal.issue(&loan, Utc::now()).await {
            Ok(entry) => {
                tracing::info!(
                    librarian = %actor.username,
                    journal_id = entry.id,
                    book_id,
                    client_id,
                    due = %due_date,
                    "Book issued"
                );
                Ok(entry)
            }
            Err(AppError::Unavailable(msg)) => {
                tracing::warn!(librarian = %actor.username, book_id, "No copies left to issue");
                Err(AppError::Unavailable(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// Close a loan and return the fine charged for it
    pub async fn return_book(&self, actor: &Actor, journal_id: i32) -> AppResult<ReturnedLoan> {
        let returned = self
            .repository
            .journal
            .return_loan(journal_id, Utc::now())
            .await?;

        tracing::info!(
            librarian = %actor.username,
            journal_id,
            book_id = returned.book_id,
            fine = %returned.fine,
            "Book returned"
        );
        Ok(returned)
    }

    pub async fn get_entry(&self, _actor: &Actor, journal_id: i32) -> AppResult<JournalEntry> {
        self.repository.journal.get_by_id(journal_id).await
    }

    pub async fn list_entries(&self, _actor: &Actor) -> AppResult<Vec<JournalEntryDetails>> {
        self.repository.journal.list().await
    }

    /// Fine stored on a journal entry (zero until it is returned)
    pub async fn get_fine(&self, _actor: &Actor, journal_id: i32) -> AppResult<Decimal> {
        let entry = self.repository.journal.get_by_id(journal_id).await?;
        Ok(entry.fine)
    }

    /// Number of books a client currently holds
    pub async fn books_on_hand(&self, _actor: &Actor, client_id: i32) -> AppResult<i64> {
        self.repository.journal.count_on_hand(client_id).await
    }

    /// Total of all fines charged to a client
    pub async fn client_fine(&self, _actor: &Actor, client_id: i32) -> AppResult<Decimal> {
        self.repository.journal.client_fine_total(client_id).await
    }
}
