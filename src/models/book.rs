//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    /// Copies currently on the shelf
    pub cnt: i32,
    pub type_id: i32,
}

/// Abbreviated book projection (no stock count)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub name: String,
    pub type_id: i32,
}

impl From<Book> for BookShort {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            type_id: book.type_id,
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Book name is required"))]
    pub name: String,
    /// Number of copies acquired
    #[validate(range(min = 0, message = "Count must not be negative"))]
    pub cnt: i32,
    pub type_id: i32,
}

/// Update book request.
///
/// Only descriptive fields are editable; the stock count belongs to the
/// lending journal once the book exists.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Book name is required"))]
    pub name: String,
    pub type_id: i32,
}
