//! Authors repository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{map_write_error, AuthorRepository};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorInput, Book},
};

#[derive(Clone)]
pub struct PgAuthorRepository {
    pool: Pool<Postgres>,
}

impl PgAuthorRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let mut authors = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, published_date, author_id FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_author: HashMap<i32, Vec<Book>> = HashMap::new();
        for book in books {
            by_author.entry(book.author_id).or_default().push(book);
        }
        for author in &mut authors {
            author.books = by_author.remove(&author.id).unwrap_or_default();
        }

        Ok(authors)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date FROM authors WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, data: &AuthorInput) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, birth_date)
            VALUES ($1, $2)
            RETURNING id, name, birth_date
            "#,
        )
        .bind(&data.name)
        .bind(data.birth_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("Author with name '{}'", data.name)))
    }

    async fn update(&self, id: i32, data: &AuthorInput) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors SET name = $1, birth_date = $2
            WHERE id = $3
            RETURNING id, name, birth_date
            "#,
        )
        .bind(&data.name)
        .bind(data.birth_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("Author with name '{}'", data.name)))?
        .ok_or_else(|| AppError::NotFound(format!("Author with Id {} not found.", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with Id {} not found.", id)));
        }
        Ok(())
    }

    async fn load_books(&self, mut author: Author) -> AppResult<Author> {
        author.books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, published_date, author_id
            FROM books
            WHERE author_id = $1
            ORDER BY id
            "#,
        )
        .bind(author.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(author)
    }
}
