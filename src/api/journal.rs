//! Lending journal endpoints: issue, return, fines and holdings

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::journal::{JournalEntry, JournalEntryDetails, ReturnedLoan},
    AppState,
};

use super::AuthenticatedLibrarian;

/// Issue book request
#[derive(Deserialize, ToSchema)]
pub struct IssueBookRequest {
    pub book_id: i32,
    pub client_id: i32,
    /// Due date, `YYYY-MM-DD`
    pub date_end: String,
}

/// Fine stored on one journal entry
#[derive(Serialize, ToSchema)]
pub struct FineResponse {
    pub journal_id: i32,
    pub fine: Decimal,
}

#[derive(Serialize, ToSchema)]
pub struct BooksOnHandResponse {
    pub client_id: i32,
    pub books_on_hand: i64,
}

#[derive(Serialize, ToSchema)]
pub struct ClientFineResponse {
    pub client_id: i32,
    pub total_fine: Decimal,
}

/// List journal entries
#[utoipa::path(
    get,
    path = "/journal",
    tag = "journal",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Journal entries, newest first", body = Vec<JournalEntryDetails>)
    )
)]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
) -> AppResult<Json<Vec<JournalEntryDetails>>> {
    let entries = state.services.lending.list_entries(&actor).await?;
    Ok(Json(entries))
}

/// Get a journal entry
#[utoipa::path(
    get,
    path = "/journal/{id}",
    tag = "journal",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Journal entry ID")),
    responses(
        (status = 200, description = "Journal entry", body = JournalEntry),
        (status = 404, description = "Journal entry not found")
    )
)]
pub async fn get_entry(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<JournalEntry>> {
    let entry = state.services.lending.get_entry(&actor, id).await?;
    Ok(Json(entry))
}

/// Issue a book to a client
#[utoipa::path(
    post,
    path = "/journal/issue",
    tag = "journal",
    security(("bearer_auth" = [])),
    request_body = IssueBookRequest,
    responses(
        (status = 201, description = "Book issued", body = JournalEntry),
        (status = 400, description = "Invalid date or no copies available"),
        (status = 404, description = "Book or client not found")
    )
)]
pub async fn issue_book(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Json(request), _): WithRejection<Json<IssueBookRequest>, AppError>,
) -> AppResult<(StatusCode, Json<JournalEntry>)> {
    let entry = state
        .services
        .lending
        .issue_book(&actor, request.book_id, request.client_id, &request.date_end)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Accept a returned book and charge any overdue fine
#[utoipa::path(
    post,
    path = "/journal/{id}/return",
    tag = "journal",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Journal entry ID")),
    responses(
        (status = 200, description = "Book returned", body = ReturnedLoan),
        (status = 404, description = "Journal entry not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ReturnedLoan>> {
    let returned = state.services.lending.return_book(&actor, id).await?;
    Ok(Json(returned))
}

/// Fine stored on a journal entry
#[utoipa::path(
    get,
    path = "/journal/{id}/fine",
    tag = "journal",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Journal entry ID")),
    responses(
        (status = 200, description = "Stored fine", body = FineResponse),
        (status = 404, description = "Journal entry not found")
    )
)]
pub async fn get_fine(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<FineResponse>> {
    let fine = state.services.lending.get_fine(&actor, id).await?;
    Ok(Json(FineResponse { journal_id: id, fine }))
}

/// Number of books a client has not returned yet
#[utoipa::path(
    get,
    path = "/clients/{id}/books-on-hand",
    tag = "journal",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Open loans count", body = BooksOnHandResponse)
    )
)]
pub async fn books_on_hand(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(client_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<BooksOnHandResponse>> {
    let books_on_hand = state.services.lending.books_on_hand(&actor, client_id).await?;
    Ok(Json(BooksOnHandResponse {
        client_id,
        books_on_hand,
    }))
}

/// Total fine charged to a client
#[utoipa::path(
    get,
    path = "/clients/{id}/fine",
    tag = "journal",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Sum of fines", body = ClientFineResponse)
    )
)]
pub async fn client_fine(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(client_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ClientFineResponse>> {
    let total_fine = state.services.lending.client_fine(&actor, client_id).await?;
    Ok(Json(ClientFineResponse {
        client_id,
        total_fine,
    }))
}
