//! Books repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Postgres};

use super::{map_write_error, BookRepository};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookInput},
};

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

/// Book joined with its author
#[derive(FromRow)]
struct BookAuthorRow {
    id: i32,
    title: String,
    published_date: NaiveDate,
    author_id: i32,
    author_name: String,
    author_birth_date: Option<NaiveDate>,
}

impl From<BookAuthorRow> for Book {
    fn from(row: BookAuthorRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            published_date: row.published_date,
            author_id: row.author_id,
            author: Some(Author {
                id: row.author_id,
                name: row.author_name,
                birth_date: row.author_birth_date,
                books: Vec::new(),
            }),
        }
    }
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookAuthorRow>(
            r#"
            SELECT b.id, b.title, b.published_date, b.author_id,
                   a.name AS author_name, a.birth_date AS author_birth_date
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            "SELECT id, title, published_date, author_id FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, published_date, author_id
            FROM books
            WHERE lower(title) = lower($1)
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, data: &BookInput) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, published_date, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, published_date, author_id
            "#,
        )
        .bind(&data.title)
        .bind(data.published_date)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("A book with the title '{}'", data.title)))
    }

    async fn update(&self, id: i32, data: &BookInput) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $1, published_date = $2, author_id = $3
            WHERE id = $4
            RETURNING id, title, published_date, author_id
            "#,
        )
        .bind(&data.title)
        .bind(data.published_date)
        .bind(data.author_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("A book with the title '{}'", data.title)))?
        .ok_or_else(|| AppError::NotFound(format!("No book found with ID '{}'.", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No book found with ID '{}'.", id)));
        }
        Ok(())
    }

    async fn load_author(&self, mut book: Book) -> AppResult<Book> {
        book.author = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date FROM authors WHERE id = $1",
        )
        .bind(book.author_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }
}
