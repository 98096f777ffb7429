//! Repository layer: the record store contract and its backends
//!
//! Services only see the [`RecordStore`] / [`BookStore`] traits. Two backends
//! implement them: [`memory::MemoryTable`] and the PostgreSQL tables in
//! [`books`] and [`students`].

pub mod books;
pub mod memory;
pub mod students;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    config::StorageBackend,
    error::AppResult,
    models::{Book, BookDetails, IssueOutcome, Student, StudentDetails},
};

/// An entity with a store-assigned identifier
pub trait Record: Clone + Send + Sync + 'static {
    /// Fields supplied by the caller on create
    type Draft: Send + 'static;

    fn id(&self) -> i64;

    fn from_draft(id: i64, draft: Self::Draft) -> Self;
}

impl Record for Book {
    type Draft = BookDetails;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: BookDetails) -> Self {
        Book {
            id,
            title: draft.title,
            author: draft.author,
            description: draft.description,
            category: draft.category,
            issued: false,
        }
    }
}

impl Record for Student {
    type Draft = StudentDetails;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: StudentDetails) -> Self {
        Student {
            id,
            name: draft.name,
            branch: draft.branch,
        }
    }
}

/// Basic persistence contract shared by every table
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Insert a new record under a freshly assigned id
    async fn create(&self, draft: R::Draft) -> AppResult<R>;

    async fn read(&self, id: i64) -> AppResult<Option<R>>;

    /// All records, ascending by id
    async fn read_all(&self) -> AppResult<Vec<R>>;

    /// Upsert by id
    async fn update(&self, record: R) -> AppResult<R>;

    /// Remove a record; unknown ids are ignored
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Book table operations that must be atomic with respect to concurrent writers
#[async_trait]
pub trait BookStore: RecordStore<Book> {
    /// Set `issued` only if it currently holds the opposite value
    async fn set_issued(&self, id: i64, issued: bool) -> AppResult<IssueOutcome>;

    /// Replace the descriptive fields without touching `issued`
    async fn update_details(&self, id: i64, details: BookDetails) -> AppResult<Option<Book>>;
}

/// Student table operations that must not race a concurrent delete
#[async_trait]
pub trait StudentStore: RecordStore<Student> {
    /// Overwrite name and branch of an existing student in a single write.
    /// Returns `None` for an unknown id and never inserts.
    async fn update_details(&self, id: i64, details: StudentDetails) -> AppResult<Option<Student>>;
}

/// Main repository struct holding the table handles
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub students: Arc<dyn StudentStore>,
    pool: Option<Pool<Postgres>>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            students: Arc::new(students::StudentsRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository that keeps everything in process memory
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(memory::MemoryTable::<Book>::new()),
            students: Arc::new(memory::MemoryTable::<Student>::new()),
            pool: None,
        }
    }

    /// Assemble a repository from arbitrary store implementations
    pub fn with_stores(books: Arc<dyn BookStore>, students: Arc<dyn StudentStore>) -> Self {
        Self {
            books,
            students,
            pool: None,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        if self.pool.is_some() {
            StorageBackend::Postgres
        } else {
            StorageBackend::Memory
        }
    }

    /// Check that the backing store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
