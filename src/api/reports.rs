//! Reporting endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::report::{ClientFine, TopBook},
    AppState,
};

use super::AuthenticatedLibrarian;

/// Three most borrowed books
#[utoipa::path(
    get,
    path = "/reports/top-books",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Up to three books, most borrowed first; ties in any order", body = Vec<TopBook>)
    )
)]
pub async fn top_books(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
) -> AppResult<Json<Vec<TopBook>>> {
    let books = state.services.reports.top_books(&actor).await?;
    Ok(Json(books))
}

/// Clients owing fines
#[utoipa::path(
    get,
    path = "/reports/clients-with-fines",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Clients with a positive total fine, highest first", body = Vec<ClientFine>)
    )
)]
pub async fn clients_with_fines(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
) -> AppResult<Json<Vec<ClientFine>>> {
    let clients = state.services.reports.clients_with_fines(&actor).await?;
    Ok(Json(clients))
}
