//! Book endpoints

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    error::{AppError, AppResult, ProblemDetails},
    models::book::{BookResponse, CreateBookRequest, UpdateBookRequest},
};

use super::{ValidatedJson, ValidatedPath};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list", body = Vec<BookResponse>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found", body = ProblemDetails)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<BookResponse>> {
    // The service reports a missing book as None; the 404 is decided here
    let book = state
        .services
        .books
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No book found with ID '{}'.", id)))?;
    Ok(Json(book.into()))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input or title already taken", body = ProblemDetails),
        (status = 404, description = "Author not found", body = ProblemDetails)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateBookRequest>,
) -> AppResult<impl IntoResponse> {
    let book = state.services.books.create(data.into()).await?;
    let location = format!("/api/books/{}", book.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookResponse::from(book)),
    ))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid input or title already taken", body = ProblemDetails),
        (status = 404, description = "Book or author not found", body = ProblemDetails)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(data): ValidatedJson<UpdateBookRequest>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(id, data.into()).await?;
    Ok(Json(book.into()))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid ID", body = ProblemDetails),
        (status = 404, description = "Book not found", body = ProblemDetails)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
