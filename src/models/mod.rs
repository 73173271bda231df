//! Data models for the library server

pub mod book;
pub mod book_type;
pub mod client;
pub mod journal;
pub mod librarian;
pub mod report;

// Re-export commonly used types
pub use book::{Book, BookShort};
pub use book_type::BookType;
pub use client::{Client, ClientShort};
pub use journal::{JournalEntry, JournalEntryDetails, ReturnedLoan};
pub use librarian::{Actor, Librarian, LibrarianClaims};
pub use report::{ClientFine, TopBook};
