//! Author endpoints

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    error::{AppResult, ProblemDetails},
    models::author::{AuthorResponse, CreateAuthorRequest, UpdateAuthorRequest},
};

use super::{ValidatedJson, ValidatedPath};

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list", body = Vec<AuthorResponse>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<AuthorResponse>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors.into_iter().map(AuthorResponse::from).collect()))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorResponse),
        (status = 404, description = "Author not found", body = ProblemDetails)
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author.into()))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Invalid input or name already taken", body = ProblemDetails)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateAuthorRequest>,
) -> AppResult<impl IntoResponse> {
    let author = state.services.authors.create(data.into()).await?;
    let location = format!("/api/authors/{}", author.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AuthorResponse::from(author)),
    ))
}

/// Update an author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 400, description = "Invalid input or name already taken", body = ProblemDetails),
        (status = 404, description = "Author not found", body = ProblemDetails)
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(data): ValidatedJson<UpdateAuthorRequest>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors.update(id, data.into()).await?;
    Ok(Json(author.into()))
}

/// Delete an author and its books
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 400, description = "Invalid ID", body = ProblemDetails),
        (status = 404, description = "Author not found", body = ProblemDetails)
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
