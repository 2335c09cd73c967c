//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// Author row, with its owned books once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[sqlx(skip)]
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Author fields accepted by the service layer
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorInput {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[schema(value_type = Option<String>, format = Date, example = "1970-01-01")]
    pub birth_date: Option<NaiveDate>,
}

/// Update author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[schema(value_type = Option<String>, format = Date, example = "1970-01-01")]
    pub birth_date: Option<NaiveDate>,
}

/// Author as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: i32,
    pub name: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    /// Titles of the author's books, in id order
    pub book_titles: Vec<String>,
}

impl From<CreateAuthorRequest> for AuthorInput {
    fn from(req: CreateAuthorRequest) -> Self {
        Self {
            name: req.name,
            birth_date: req.birth_date,
        }
    }
}

impl From<UpdateAuthorRequest> for AuthorInput {
    fn from(req: UpdateAuthorRequest) -> Self {
        Self {
            name: req.name,
            birth_date: req.birth_date,
        }
    }
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            birth_date: author.birth_date,
            book_titles: author.books.into_iter().map(|b| b.title).collect(),
        }
    }
}
