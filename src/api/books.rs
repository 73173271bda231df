//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookShort, CreateBook, UpdateBook},
    AppState,
};

use super::AuthenticatedLibrarian;

/// List all books with their available count
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books(&actor).await?;
    Ok(Json(books))
}

/// List books without stock counts
#[utoipa::path(
    get,
    path = "/books/all",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Abbreviated list of books", body = Vec<BookShort>)
    )
)]
pub async fn list_books_short(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
) -> AppResult<Json<Vec<BookShort>>> {
    let books = state.services.catalog.list_books_short(&actor).await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(&actor, id).await?;
    Ok(Json(book))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or unknown book type")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Json(book), _): WithRejection<Json<CreateBook>, AppError>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(&actor, book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book's name and type
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(book), _): WithRejection<Json<UpdateBook>, AppError>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update_book(&actor, id, book).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has journal entries")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
