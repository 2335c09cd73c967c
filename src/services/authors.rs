//! Author management service

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorInput},
    repository::DynAuthorRepository,
};

#[derive(Clone)]
pub struct AuthorService {
    authors: DynAuthorRepository,
}

impl AuthorService {
    pub fn new(authors: DynAuthorRepository) -> Self {
        Self { authors }
    }

    /// List all authors with their books
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    /// Get an author with its books
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        let author = self
            .authors
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with Id {} not found.", id)))?;
        self.authors.load_books(author).await
    }

    /// Create an author. Names are unique (exact match).
    pub async fn create(&self, item: AuthorInput) -> AppResult<Author> {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidArgument("Name is required.".to_string()));
        }

        if self.authors.get_by_name(name).await?.is_some() {
            tracing::debug!("Rejected duplicate author name '{}'", name);
            return Err(AppError::Conflict(format!(
                "Author with name '{}' already exists.",
                name
            )));
        }

        let data = AuthorInput {
            name: name.to_string(),
            birth_date: item.birth_date,
        };
        let created = self.authors.create(&data).await?;
        tracing::info!("Created author id={} name='{}'", created.id, created.name);
        Ok(created)
    }

    /// Overwrite an author's name and birth date
    pub async fn update(&self, id: i32, item: AuthorInput) -> AppResult<Author> {
        if id <= 0 {
            return Err(AppError::InvalidArgument(
                "The author ID must be a positive integer.".to_string(),
            ));
        }
        let name = item.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidArgument("Name is required.".to_string()));
        }

        let current = self
            .authors
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with Id {} not found.", id)))?;

        if current.name.to_lowercase() != name.to_lowercase() {
            if let Some(other) = self.authors.get_by_name(name).await? {
                if other.id != id {
                    return Err(AppError::Conflict(format!(
                        "Author with name '{}' already exists.",
                        name
                    )));
                }
            }
        }

        let data = AuthorInput {
            name: name.to_string(),
            birth_date: item.birth_date,
        };
        let updated = self.authors.update(id, &data).await?;
        tracing::info!("Updated author id={}", id);
        self.authors.load_books(updated).await
    }

    /// Delete an author and, by cascade, its books
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::InvalidArgument(
                "The author ID must be a positive integer.".to_string(),
            ));
        }
        if self.authors.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Author with Id {} not found.", id)));
        }
        self.authors.delete(id).await?;
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::repository::{memory::InMemoryRepository, MockAuthorRepository};

    fn input(name: &str) -> AuthorInput {
        AuthorInput {
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 1),
        }
    }

    fn author(id: i32, name: &str) -> Author {
        Author {
            id,
            name: name.to_string(),
            birth_date: None,
            books: vec![],
        }
    }

    fn in_memory() -> AuthorService {
        AuthorService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn create_rejects_blank_name_without_touching_storage() {
        let mut repo = MockAuthorRepository::new();
        repo.expect_get_by_name().never();
        repo.expect_create().never();
        let service = AuthorService::new(Arc::new(repo));

        let err = service.create(input("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn create_trims_and_persists() {
        let mut repo = MockAuthorRepository::new();
        repo.expect_get_by_name()
            .withf(|name| name == "Jane Doe")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|data| data.name == "Jane Doe")
            .times(1)
            .returning(|data| Ok(author(1, &data.name)));
        let service = AuthorService::new(Arc::new(repo));

        let created = service.create(input("  Jane Doe ")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Jane Doe");
    }

    #[tokio::test]
    async fn create_duplicate_name_conflicts() {
        let service = in_memory();
        service.create(input("Jane Doe")).await.unwrap();

        let err = service.create(input("Jane Doe")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_name_match_is_case_sensitive() {
        let service = in_memory();
        service.create(input("Jane Doe")).await.unwrap();

        assert!(service.create(input("jane doe")).await.is_ok());
    }

    #[tokio::test]
    async fn update_to_name_of_other_author_conflicts() {
        let service = in_memory();
        service.create(input("Jane Doe")).await.unwrap();
        let john = service.create(input("John Roe")).await.unwrap();

        let err = service.update(john.id, input("Jane Doe")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_keeping_own_name_succeeds() {
        let service = in_memory();
        let jane = service.create(input("Jane Doe")).await.unwrap();

        let mut changed = input("Jane Doe");
        changed.birth_date = NaiveDate::from_ymd_opt(1971, 2, 3);
        let updated = service.update(jane.id, changed).await.unwrap();
        assert_eq!(updated.birth_date, NaiveDate::from_ymd_opt(1971, 2, 3));
    }

    #[tokio::test]
    async fn update_case_only_rename_skips_uniqueness_lookup() {
        let mut repo = MockAuthorRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(author(id, "jane doe"))));
        repo.expect_get_by_name().never();
        repo.expect_update()
            .times(1)
            .returning(|id, data| Ok(author(id, &data.name)));
        repo.expect_load_books().returning(Ok);
        let service = AuthorService::new(Arc::new(repo));

        let updated = service.update(3, input("Jane Doe")).await.unwrap();
        assert_eq!(updated.name, "Jane Doe");
    }

    #[tokio::test]
    async fn update_rejects_blank_name_before_lookup() {
        let mut repo = MockAuthorRepository::new();
        repo.expect_get_by_id().never();
        repo.expect_get_by_name().never();
        repo.expect_update().never();
        let service = AuthorService::new(Arc::new(repo));

        let err = service.update(1, input("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn update_rejects_non_positive_id() {
        let service = in_memory();
        let err = service.update(0, input("Jane Doe")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn update_missing_author_is_not_found() {
        let service = in_memory();
        let err = service.update(99, input("Jane Doe")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_validates_id_and_existence() {
        let service = in_memory();

        let err = service.delete(0).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
        let err = service.delete(-4).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
        let err = service.delete(12).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let jane = service.create(input("Jane Doe")).await.unwrap();
        service.delete(jane.id).await.unwrap();
        assert!(matches!(
            service.get_by_id(jane.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let mut repo = MockAuthorRepository::new();
        repo.expect_get_by_id().times(1).returning(|_| Ok(None));
        repo.expect_load_books().never();
        let service = AuthorService::new(Arc::new(repo));

        assert!(matches!(
            service.get_by_id(999).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
