//! API handlers for the Book Library REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{error::AppError, AppState};

/// JSON body extractor that runs `validator` rules and reports failures as
/// a 400 problem document instead of axum's plain-text rejection
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path extractor whose rejection (e.g. a non-numeric or out-of-range id)
/// is a 400 problem document like every other error
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;
        Ok(ValidatedPath(value))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authors
        .route(
            "/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
