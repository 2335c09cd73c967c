//! Business logic services

pub mod authors;
pub mod books;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorService,
    pub books: books::BookService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorService::new(repository.authors.clone()),
            books: books::BookService::new(repository.books.clone(), repository.authors.clone()),
            repository,
        }
    }
}
