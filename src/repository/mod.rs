//! Repository layer for database operations
//!
//! Each concern is a trait so services can run against Postgres in
//! production and against mocks or in-memory stores in tests.

pub mod book_types;
pub mod books;
pub mod clients;
pub mod journal;
pub mod librarians;
pub mod reports;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use book_types::BookTypesRepository;
pub use books::BooksRepository;
pub use clients::ClientsRepository;
pub use journal::JournalRepository;
pub use librarians::LibrariansRepository;
pub use reports::ReportsRepository;

/// Storage handles injected into the services
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BooksRepository>,
    pub book_types: Arc<dyn BookTypesRepository>,
    pub clients: Arc<dyn ClientsRepository>,
    pub journal: Arc<dyn JournalRepository>,
    pub librarians: Arc<dyn LibrariansRepository>,
    pub reports: Arc<dyn ReportsRepository>,
}

impl Repository {
    /// Create Postgres-backed repositories sharing the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::PgBooksRepository::new(pool.clone())),
            book_types: Arc::new(book_types::PgBookTypesRepository::new(pool.clone())),
            clients: Arc::new(clients::PgClientsRepository::new(pool.clone())),
            journal: Arc::new(journal::PgJournalRepository::new(pool.clone())),
            librarians: Arc::new(librarians::PgLibrariansRepository::new(pool.clone())),
            reports: Arc::new(reports::PgReportsRepository::new(pool)),
        }
    }
}

/// True when the statement failed on a foreign key constraint
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// True when the statement failed on a unique constraint
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
