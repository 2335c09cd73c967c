//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInput},
    repository::{DynAuthorRepository, DynBookRepository},
};

#[derive(Clone)]
pub struct BookService {
    books: DynBookRepository,
    authors: DynAuthorRepository,
}

impl BookService {
    pub fn new(books: DynBookRepository, authors: DynAuthorRepository) -> Self {
        Self { books, authors }
    }

    /// List all books with their authors
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.books.list().await
    }

    /// Get a book by ID. A missing book is `Ok(None)`, unlike authors.
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        match self.books.get_by_id(id).await? {
            Some(book) => Ok(Some(self.books.load_author(book).await?)),
            None => Ok(None),
        }
    }

    /// Create a book for an existing author. Titles are unique ignoring case.
    pub async fn create(&self, item: BookInput) -> AppResult<Book> {
        let title = item.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidArgument("Title is required.".to_string()));
        }
        if item.author_id <= 0 {
            return Err(AppError::InvalidArgument(
                "AuthorId has to be a positive integer.".to_string(),
            ));
        }

        if self.authors.get_by_id(item.author_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Author with Id {} not found.",
                item.author_id
            )));
        }

        if self.books.get_by_title(title).await?.is_some() {
            tracing::debug!("Rejected duplicate book title '{}'", title);
            return Err(AppError::Conflict(format!(
                "A book with the title '{}' already exists.",
                title
            )));
        }

        let data = BookInput {
            title: title.to_string(),
            published_date: item.published_date,
            author_id: item.author_id,
        };
        let created = self.books.create(&data).await?;
        tracing::info!(
            "Created book id={} title='{}' author_id={}",
            created.id,
            created.title,
            created.author_id
        );
        self.books.load_author(created).await
    }

    /// Overwrite a book's title, publication date and author
    pub async fn update(&self, id: i32, item: BookInput) -> AppResult<Book> {
        let title = item.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidArgument("Title is required.".to_string()));
        }

        let current = self
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No book found with ID '{}'.", id)))?;

        if current.title.to_lowercase() != title.to_lowercase() {
            if let Some(other) = self.books.get_by_title(title).await? {
                if other.id != id {
                    return Err(AppError::Conflict(format!(
                        "A book with the title '{}' already exists.",
                        title
                    )));
                }
            }
        }

        if self.authors.get_by_id(item.author_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Author with Id {} not found.",
                item.author_id
            )));
        }

        let data = BookInput {
            title: title.to_string(),
            published_date: item.published_date,
            author_id: item.author_id,
        };
        let updated = self.books.update(id, &data).await?;
        tracing::info!("Updated book id={}", id);
        self.books.load_author(updated).await
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::InvalidArgument(
                "The book ID must be a positive integer.".to_string(),
            ));
        }
        if self.books.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("No book found with ID '{}'.", id)));
        }
        self.books.delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::{
        models::{Author, AuthorInput},
        repository::{
            memory::InMemoryRepository, AuthorRepository, MockAuthorRepository,
            MockBookRepository,
        },
    };

    fn published() -> NaiveDate {
        NaiveDate::from_ymd_opt(1965, 1, 1).unwrap()
    }

    fn input(title: &str, author_id: i32) -> BookInput {
        BookInput {
            title: title.to_string(),
            published_date: published(),
            author_id,
        }
    }

    fn book(id: i32, title: &str, author_id: i32) -> Book {
        Book {
            id,
            title: title.to_string(),
            published_date: published(),
            author_id,
            author: None,
        }
    }

    /// Service over a fresh store seeded with one author per name
    async fn seeded(names: &[&str]) -> (BookService, Vec<Author>) {
        let repo = InMemoryRepository::new();
        let mut authors = Vec::new();
        for name in names {
            let author = AuthorRepository::create(
                &repo,
                &AuthorInput {
                    name: name.to_string(),
                    birth_date: None,
                },
            )
            .await
            .unwrap();
            authors.push(author);
        }
        let service = BookService::new(Arc::new(repo.clone()), Arc::new(repo));
        (service, authors)
    }

    #[tokio::test]
    async fn create_rejects_whitespace_title() {
        let mut books = MockBookRepository::new();
        books.expect_create().never();
        let mut authors = MockAuthorRepository::new();
        authors.expect_get_by_id().never();
        let service = BookService::new(Arc::new(books), Arc::new(authors));

        let err = service.create(input(" \t ", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn update_rejects_whitespace_title_before_lookup() {
        let mut books = MockBookRepository::new();
        books.expect_get_by_id().never();
        books.expect_get_by_title().never();
        books.expect_update().never();
        let mut authors = MockAuthorRepository::new();
        authors.expect_get_by_id().never();
        let service = BookService::new(Arc::new(books), Arc::new(authors));

        let err = service.update(1, input("   ", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn create_rejects_non_positive_author_id() {
        let (service, _) = seeded(&[]).await;
        let err = service.create(input("Dune", 0)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn create_with_unknown_author_is_not_found() {
        let mut books = MockBookRepository::new();
        books.expect_get_by_title().never();
        books.expect_create().never();
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_get_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(None));
        let service = BookService::new(Arc::new(books), Arc::new(authors));

        let err = service.create(input("Dune", 7)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_trims_title_and_loads_author() {
        let (service, authors) = seeded(&["Frank Herbert"]).await;

        let created = service.create(input("  Dune  ", authors[0].id)).await.unwrap();
        assert_eq!(created.title, "Dune");
        assert_eq!(
            created.author.map(|a| a.name),
            Some("Frank Herbert".to_string())
        );
    }

    #[tokio::test]
    async fn create_duplicate_title_ignores_case() {
        let (service, authors) = seeded(&["Frank Herbert"]).await;
        service.create(input("Dune", authors[0].id)).await.unwrap();

        let err = service.create(input("dUNE", authors[0].id)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_to_title_of_other_book_conflicts() {
        let (service, authors) = seeded(&["Frank Herbert"]).await;
        service.create(input("Dune", authors[0].id)).await.unwrap();
        let messiah = service
            .create(input("Dune Messiah", authors[0].id))
            .await
            .unwrap();

        let err = service
            .update(messiah.id, input("DUNE", authors[0].id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_missing_book_is_not_found() {
        let (service, authors) = seeded(&["Frank Herbert"]).await;
        let err = service
            .update(41, input("Dune", authors[0].id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_with_unknown_author_is_not_found() {
        let (service, authors) = seeded(&["Frank Herbert"]).await;
        let dune = service.create(input("Dune", authors[0].id)).await.unwrap();

        let err = service.update(dune.id, input("Dune", 404)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_moves_book_to_other_author() {
        let (service, authors) = seeded(&["Frank Herbert", "Brian Herbert"]).await;
        let dune = service.create(input("Dune", authors[0].id)).await.unwrap();

        let mut changed = input("Dune", authors[1].id);
        changed.published_date = NaiveDate::from_ymd_opt(1966, 6, 1).unwrap();
        let updated = service.update(dune.id, changed).await.unwrap();

        assert_eq!(updated.author_id, authors[1].id);
        assert_eq!(updated.published_date, NaiveDate::from_ymd_opt(1966, 6, 1).unwrap());
        assert_eq!(
            updated.author.map(|a| a.name),
            Some("Brian Herbert".to_string())
        );
    }

    #[tokio::test]
    async fn update_same_title_different_case_skips_lookup() {
        let mut books = MockBookRepository::new();
        books
            .expect_get_by_id()
            .returning(|id| Ok(Some(book(id, "dune", 1))));
        books.expect_get_by_title().never();
        books
            .expect_update()
            .times(1)
            .returning(|id, data| Ok(book(id, &data.title, data.author_id)));
        books.expect_load_author().returning(Ok);
        let mut authors = MockAuthorRepository::new();
        authors.expect_get_by_id().returning(|id| {
            Ok(Some(Author {
                id,
                name: "Frank Herbert".into(),
                birth_date: None,
                books: vec![],
            }))
        });
        let service = BookService::new(Arc::new(books), Arc::new(authors));

        let updated = service.update(5, input("Dune", 1)).await.unwrap();
        assert_eq!(updated.title, "Dune");
    }

    #[tokio::test]
    async fn get_by_id_missing_is_none() {
        let (service, _) = seeded(&[]).await;
        assert!(service.get_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_validates_id_and_existence() {
        let (service, authors) = seeded(&["Frank Herbert"]).await;

        assert!(matches!(
            service.delete(0).await.unwrap_err(),
            AppError::InvalidArgument(_)
        ));
        assert!(matches!(
            service.delete(-1).await.unwrap_err(),
            AppError::InvalidArgument(_)
        ));
        assert!(matches!(
            service.delete(8).await.unwrap_err(),
            AppError::NotFound(_)
        ));

        let dune = service.create(input("Dune", authors[0].id)).await.unwrap();
        service.delete(dune.id).await.unwrap();
        assert!(service.get_by_id(dune.id).await.unwrap().is_none());
    }
}
