//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, AuthorInput, Book, BookInput},
};

/// Persistence contract for authors. Lookups return `None` when the row is
/// missing; writes are committed before the call returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository {
    /// All authors with their books, ordered by id
    async fn list(&self) -> AppResult<Vec<Author>>;

    /// Author row only; `books` is left empty
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>>;

    /// Exact (case-sensitive) name lookup
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Author>>;

    async fn create(&self, data: &AuthorInput) -> AppResult<Author>;

    async fn update(&self, id: i32, data: &AuthorInput) -> AppResult<Author>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Populate `author.books`
    async fn load_books(&self, author: Author) -> AppResult<Author>;
}

/// Persistence contract for books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository {
    /// All books with their author loaded, ordered by id
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Book row only; `author` is left unset
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Case-insensitive title lookup
    async fn get_by_title(&self, title: &str) -> AppResult<Option<Book>>;

    async fn create(&self, data: &BookInput) -> AppResult<Book>;

    async fn update(&self, id: i32, data: &BookInput) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Populate `book.author`
    async fn load_author(&self, book: Book) -> AppResult<Book>;
}

pub type DynAuthorRepository = Arc<dyn AuthorRepository + Send + Sync>;
pub type DynBookRepository = Arc<dyn BookRepository + Send + Sync>;

/// Main repository struct holding the per-entity repositories
#[derive(Clone)]
pub struct Repository {
    pub authors: DynAuthorRepository,
    pub books: DynBookRepository,
    pool: Option<Pool<Postgres>>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::PgAuthorRepository::new(pool.clone())),
            books: Arc::new(books::PgBookRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = memory::InMemoryRepository::new();
        Self {
            authors: Arc::new(store.clone()),
            books: Arc::new(store),
            pool: None,
        }
    }

    /// Check that the storage backend answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}

/// Translate constraint violations raised on write into domain errors
pub(crate) fn map_write_error(err: sqlx::Error, what: &str) -> crate::error::AppError {
    use crate::error::AppError;

    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::Conflict(format!("{} already exists.", what));
        }
        if db.is_foreign_key_violation() {
            return AppError::NotFound("Referenced author not found.".to_string());
        }
    }
    AppError::Database(err)
}
