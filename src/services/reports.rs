//! Reporting service

use crate::{
    error::AppResult,
    models::{
        librarian::Actor,
        report::{ClientFine, TopBook},
    },
    repository::Repository,
};

/// Number of books in the most-borrowed report
pub const TOP_BOOKS_LIMIT: i64 = 3;

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn top_books(&self, _actor: &Actor) -> AppResult<Vec<TopBook>> {
        self.repository.reports.top_books(TOP_BOOKS_LIMIT).await
    }

    pub async fn clients_with_fines(&self, _actor: &Actor) -> AppResult<Vec<ClientFine>> {
        self.repository.reports.clients_with_fines().await
    }
}
