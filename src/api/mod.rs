//! API handlers for the library REST endpoints

pub mod auth;
pub mod book_types;
pub mod books;
pub mod clients;
pub mod health;
pub mod journal;
pub mod openapi;
pub mod reports;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderValue},
    routing::{get, post},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::librarian::Actor, AppState};

/// Extractor for the librarian authenticated by the bearer token
pub struct AuthenticatedLibrarian(pub Actor);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedLibrarian {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Authentication("Missing or malformed bearer token".to_string()))?;

        let actor = state.services.auth.validate_jwt(bearer.token())?;
        Ok(AuthenticatedLibrarian(actor))
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authentication
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/all", get(books::list_books_short))
        .route(
            "/books/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        // Book types
        .route(
            "/book-types",
            get(book_types::list_book_types).post(book_types::create_book_type),
        )
        .route(
            "/book-types/:id",
            get(book_types::get_book_type)
                .put(book_types::update_book_type)
                .delete(book_types::delete_book_type),
        )
        // Clients
        .route("/clients", get(clients::list_clients).post(clients::create_client))
        .route("/clients/all", get(clients::list_clients_short))
        .route(
            "/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/clients/:id/books-on-hand", get(journal::books_on_hand))
        .route("/clients/:id/fine", get(journal::client_fine))
        // Journal
        .route("/journal", get(journal::list_entries))
        .route("/journal/issue", post(journal::issue_book))
        .route("/journal/:id", get(journal::get_entry))
        .route("/journal/:id/return", post(journal::return_book))
        .route("/journal/:id/fine", get(journal::get_fine))
        // Reports
        .route("/reports/top-books", get(reports::top_books))
        .route("/reports/clients-with-fines", get(reports::clients_with_fines))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
