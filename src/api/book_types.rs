//! Book type endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::book_type::{BookType, BookTypeInput},
    AppState,
};

use super::AuthenticatedLibrarian;

/// List book types
#[utoipa::path(
    get,
    path = "/book-types",
    tag = "book-types",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Book types", body = Vec<BookType>)
    )
)]
pub async fn list_book_types(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
) -> AppResult<Json<Vec<BookType>>> {
    let types = state.services.catalog.list_book_types(&actor).await?;
    Ok(Json(types))
}

/// Get book type by ID
#[utoipa::path(
    get,
    path = "/book-types/{id}",
    tag = "book-types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book type ID")),
    responses(
        (status = 200, description = "Book type", body = BookType),
        (status = 404, description = "Book type not found")
    )
)]
pub async fn get_book_type(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<BookType>> {
    let book_type = state.services.catalog.get_book_type(&actor, id).await?;
    Ok(Json(book_type))
}

/// Create a book type
#[utoipa::path(
    post,
    path = "/book-types",
    tag = "book-types",
    security(("bearer_auth" = [])),
    request_body = BookTypeInput,
    responses(
        (status = 201, description = "Book type created", body = BookType),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book_type(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Json(data), _): WithRejection<Json<BookTypeInput>, AppError>,
) -> AppResult<(StatusCode, Json<BookType>)> {
    let created = state.services.catalog.create_book_type(&actor, data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book type
#[utoipa::path(
    put,
    path = "/book-types/{id}",
    tag = "book-types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book type ID")),
    request_body = BookTypeInput,
    responses(
        (status = 200, description = "Book type updated", body = BookType),
        (status = 404, description = "Book type not found")
    )
)]
pub async fn update_book_type(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(data), _): WithRejection<Json<BookTypeInput>, AppError>,
) -> AppResult<Json<BookType>> {
    let updated = state.services.catalog.update_book_type(&actor, id, data).await?;
    Ok(Json(updated))
}

/// Delete a book type
#[utoipa::path(
    delete,
    path = "/book-types/{id}",
    tag = "book-types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book type ID")),
    responses(
        (status = 204, description = "Book type deleted"),
        (status = 404, description = "Book type not found"),
        (status = 409, description = "Book type still used by books")
    )
)]
pub async fn delete_book_type(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book_type(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
