//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, book_types, books, clients, health, journal, reports};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "1.0.0",
        description = "Library Management REST API: catalog, patrons and lending journal"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::list_books_short,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Book types
        book_types::list_book_types,
        book_types::get_book_type,
        book_types::create_book_type,
        book_types::update_book_type,
        book_types::delete_book_type,
        // Clients
        clients::list_clients,
        clients::list_clients_short,
        clients::get_client,
        clients::create_client,
        clients::update_client,
        clients::delete_client,
        // Journal
        journal::list_entries,
        journal::get_entry,
        journal::issue_book,
        journal::return_book,
        journal::get_fine,
        journal::books_on_hand,
        journal::client_fine,
        // Reports
        reports::top_books,
        reports::clients_with_fines,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            crate::models::librarian::Credentials,
            crate::models::librarian::Actor,
            // Catalog
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book_type::BookType,
            crate::models::book_type::BookTypeInput,
            // Clients
            crate::models::client::Client,
            crate::models::client::ClientShort,
            crate::models::client::ClientInput,
            // Journal
            journal::IssueBookRequest,
            journal::FineResponse,
            journal::BooksOnHandResponse,
            journal::ClientFineResponse,
            crate::models::journal::JournalEntry,
            crate::models::journal::JournalEntryDetails,
            crate::models::journal::ReturnedLoan,
            // Reports
            crate::models::report::TopBook,
            crate::models::report::ClientFine,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Librarian authentication"),
        (name = "books", description = "Book catalog"),
        (name = "book-types", description = "Book types and fine rules"),
        (name = "clients", description = "Client management"),
        (name = "journal", description = "Lending journal"),
        (name = "reports", description = "Reports")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
