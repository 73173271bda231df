//! Client (patron) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, ClientInput, ClientShort},
    AppState,
};

use super::AuthenticatedLibrarian;

/// List clients with identity documents
#[utoipa::path(
    get,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of clients", body = Vec<Client>)
    )
)]
pub async fn list_clients(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
) -> AppResult<Json<Vec<Client>>> {
    let clients = state.services.patrons.list(&actor).await?;
    Ok(Json(clients))
}

/// List clients by name only
#[utoipa::path(
    get,
    path = "/clients/all",
    tag = "clients",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Abbreviated list of clients", body = Vec<ClientShort>)
    )
)]
pub async fn list_clients_short(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
) -> AppResult<Json<Vec<ClientShort>>> {
    let clients = state.services.patrons.list_short(&actor).await?;
    Ok(Json(clients))
}

/// Get client by ID
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client details", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Client>> {
    let client = state.services.patrons.get_by_id(&actor, id).await?;
    Ok(Json(client))
}

/// Register a client
#[utoipa::path(
    post,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    request_body = ClientInput,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_client(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Json(data), _): WithRejection<Json<ClientInput>, AppError>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = state.services.patrons.create(&actor, data).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Update a client
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Client ID")),
    request_body = ClientInput,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(data), _): WithRejection<Json<ClientInput>, AppError>,
) -> AppResult<Json<Client>> {
    let client = state.services.patrons.update(&actor, id, data).await?;
    Ok(Json(client))
}

/// Delete a client
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Client has journal entries")
    )
)]
pub async fn delete_client(
    State(state): State<AppState>,
    AuthenticatedLibrarian(actor): AuthenticatedLibrarian,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    state.services.patrons.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
