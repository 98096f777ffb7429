//! Business logic services

pub mod books;
pub mod seed;
pub mod students;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub students: students::StudentsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            students: students::StudentsService::new(repository.clone()),
            repository,
        }
    }

    /// Readiness check for the backing store
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
