//! Book model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;

/// Book row. `author` is only populated after the association is reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub published_date: NaiveDate,
    pub author_id: i32,
    #[sqlx(skip)]
    #[serde(default)]
    pub author: Option<Author>,
}

/// Book fields accepted by the service layer
#[derive(Debug, Clone, PartialEq)]
pub struct BookInput {
    pub title: String,
    pub published_date: NaiveDate,
    pub author_id: i32,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"))]
    pub title: String,
    #[schema(value_type = String, format = Date, example = "1965-01-01")]
    pub published_date: NaiveDate,
    pub author_id: i32,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"))]
    pub title: String,
    #[schema(value_type = String, format = Date, example = "1965-01-01")]
    pub published_date: NaiveDate,
    pub author_id: i32,
}

/// Book as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i32,
    pub title: String,
    #[schema(value_type = String, format = Date)]
    pub published_date: NaiveDate,
    pub author_id: i32,
    pub author_name: Option<String>,
}

impl From<CreateBookRequest> for BookInput {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            title: req.title,
            published_date: req.published_date,
            author_id: req.author_id,
        }
    }
}

impl From<UpdateBookRequest> for BookInput {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            title: req.title,
            published_date: req.published_date,
            author_id: req.author_id,
        }
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            published_date: book.published_date,
            author_id: book.author_id,
            author_name: book.author.map(|a| a.name),
        }
    }
}
