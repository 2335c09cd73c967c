//! In-memory repository, used by tests and the `memory` storage backend.
//!
//! Mirrors the database constraints: unique author names, unique
//! case-insensitive book titles, books referencing an existing author, and
//! cascading delete from author to books.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{AuthorRepository, BookRepository};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorInput, Book, BookInput},
};

#[derive(Debug, Clone)]
struct AuthorRow {
    name: String,
    birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
struct BookRow {
    title: String,
    published_date: NaiveDate,
    author_id: i32,
}

#[derive(Debug, Default)]
struct Store {
    authors: BTreeMap<i32, AuthorRow>,
    books: BTreeMap<i32, BookRow>,
    last_author_id: i32,
    last_book_id: i32,
}

impl Store {
    fn author(&self, id: i32) -> Option<Author> {
        self.authors.get(&id).map(|row| Author {
            id,
            name: row.name.clone(),
            birth_date: row.birth_date,
            books: Vec::new(),
        })
    }

    fn book(&self, id: i32) -> Option<Book> {
        self.books.get(&id).map(|row| Book {
            id,
            title: row.title.clone(),
            published_date: row.published_date,
            author_id: row.author_id,
            author: None,
        })
    }

    fn books_of(&self, author_id: i32) -> Vec<Book> {
        self.books
            .iter()
            .filter(|(_, row)| row.author_id == author_id)
            .filter_map(|(id, _)| self.book(*id))
            .collect()
    }

    fn name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.authors
            .iter()
            .any(|(id, row)| Some(*id) != except && row.name == name)
    }

    fn title_taken(&self, title: &str, except: Option<i32>) -> bool {
        let title = title.to_lowercase();
        self.books
            .iter()
            .any(|(id, row)| Some(*id) != except && row.title.to_lowercase() == title)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorRepository for InMemoryRepository {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let store = self.store.read().await;
        Ok(store
            .authors
            .keys()
            .filter_map(|id| {
                store.author(*id).map(|mut author| {
                    author.books = store.books_of(*id);
                    author
                })
            })
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        Ok(self.store.read().await.author(id))
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let store = self.store.read().await;
        Ok(store
            .authors
            .iter()
            .find(|(_, row)| row.name == name)
            .and_then(|(id, _)| store.author(*id)))
    }

    async fn create(&self, data: &AuthorInput) -> AppResult<Author> {
        let mut store = self.store.write().await;
        if store.name_taken(&data.name, None) {
            return Err(AppError::Conflict(format!(
                "Author with name '{}' already exists.",
                data.name
            )));
        }
        store.last_author_id += 1;
        let id = store.last_author_id;
        store.authors.insert(
            id,
            AuthorRow {
                name: data.name.clone(),
                birth_date: data.birth_date,
            },
        );
        store
            .author(id)
            .ok_or_else(|| AppError::Internal(format!("author {} vanished after insert", id)))
    }

    async fn update(&self, id: i32, data: &AuthorInput) -> AppResult<Author> {
        let mut store = self.store.write().await;
        if store.name_taken(&data.name, Some(id)) {
            return Err(AppError::Conflict(format!(
                "Author with name '{}' already exists.",
                data.name
            )));
        }
        let row = store
            .authors
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Author with Id {} not found.", id)))?;
        row.name = data.name.clone();
        row.birth_date = data.birth_date;
        store
            .author(id)
            .ok_or_else(|| AppError::Internal(format!("author {} vanished after update", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut store = self.store.write().await;
        if store.authors.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("Author with Id {} not found.", id)));
        }
        store.books.retain(|_, row| row.author_id != id);
        Ok(())
    }

    async fn load_books(&self, mut author: Author) -> AppResult<Author> {
        author.books = self.store.read().await.books_of(author.id);
        Ok(author)
    }
}

#[async_trait]
impl BookRepository for InMemoryRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let store = self.store.read().await;
        Ok(store
            .books
            .keys()
            .filter_map(|id| {
                store.book(*id).map(|mut book| {
                    book.author = store.author(book.author_id);
                    book
                })
            })
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.store.read().await.book(id))
    }

    async fn get_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let store = self.store.read().await;
        let wanted = title.to_lowercase();
        Ok(store
            .books
            .iter()
            .find(|(_, row)| row.title.to_lowercase() == wanted)
            .and_then(|(id, _)| store.book(*id)))
    }

    async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let mut store = self.store.write().await;
        if !store.authors.contains_key(&data.author_id) {
            return Err(AppError::NotFound("Referenced author not found.".to_string()));
        }
        if store.title_taken(&data.title, None) {
            return Err(AppError::Conflict(format!(
                "A book with the title '{}' already exists.",
                data.title
            )));
        }
        store.last_book_id += 1;
        let id = store.last_book_id;
        store.books.insert(
            id,
            BookRow {
                title: data.title.clone(),
                published_date: data.published_date,
                author_id: data.author_id,
            },
        );
        store
            .book(id)
            .ok_or_else(|| AppError::Internal(format!("book {} vanished after insert", id)))
    }

    async fn update(&self, id: i32, data: &BookInput) -> AppResult<Book> {
        let mut store = self.store.write().await;
        if !store.authors.contains_key(&data.author_id) {
            return Err(AppError::NotFound("Referenced author not found.".to_string()));
        }
        if store.title_taken(&data.title, Some(id)) {
            return Err(AppError::Conflict(format!(
                "A book with the title '{}' already exists.",
                data.title
            )));
        }
        let row = store
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("No book found with ID '{}'.", id)))?;
        row.title = data.title.clone();
        row.published_date = data.published_date;
        row.author_id = data.author_id;
        store
            .book(id)
            .ok_or_else(|| AppError::Internal(format!("book {} vanished after update", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut store = self.store.write().await;
        if store.books.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("No book found with ID '{}'.", id)));
        }
        Ok(())
    }

    async fn load_author(&self, mut book: Book) -> AppResult<Book> {
        book.author = self.store.read().await.author(book.author_id);
        Ok(book)
    }
}
