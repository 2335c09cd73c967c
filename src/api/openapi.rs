//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Library API",
        version = "1.0.0",
        description = "Catalog of books and their authors",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "Book Library API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::author::AuthorResponse,
            crate::models::author::CreateAuthorRequest,
            crate::models::author::UpdateAuthorRequest,
            crate::models::book::BookResponse,
            crate::models::book::CreateBookRequest,
            crate::models::book::UpdateBookRequest,
            health::HealthResponse,
            crate::error::ProblemDetails,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
