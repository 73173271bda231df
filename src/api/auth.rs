//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::librarian::{Actor, Credentials},
    AppState,
};

use super::AuthenticatedLibrarian;

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub librarian: Actor,
}

/// Register a librarian account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "Librarian registered", body = Actor),
        (status = 400, description = "Invalid username or password"),
        (status = 403, description = "Registration is disabled"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(credentials), _): WithRejection<Json<Credentials>, AppError>,
) -> AppResult<(StatusCode, Json<Actor>)> {
    let librarian = state.services.auth.register(credentials).await?;
    Ok((StatusCode::CREATED, Json(librarian)))
}

/// Log in and obtain a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(credentials), _): WithRejection<Json<Credentials>, AppError>,
) -> AppResult<Json<LoginResponse>> {
    let (token, librarian) = state.services.auth.login(&credentials).await?;
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        librarian,
    }))
}

/// Current librarian
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated librarian", body = Actor),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedLibrarian(actor): AuthenticatedLibrarian) -> Json<Actor> {
    Json(actor)
}
