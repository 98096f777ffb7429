//! In-process record store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, Record, RecordStore, StudentStore};
use crate::{
    error::AppResult,
    models::{Book, BookDetails, IssueOutcome, Student, StudentDetails},
};

struct Rows<R> {
    next_id: i64,
    by_id: BTreeMap<i64, R>,
}

/// A table held in a `BTreeMap`, so iteration is already in id order.
///
/// Ids start at 1 and are never reused, even after deletes.
pub struct MemoryTable<R> {
    inner: RwLock<Rows<R>>,
}

impl<R: Record> MemoryTable<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                next_id: 1,
                by_id: BTreeMap::new(),
            }),
        }
    }

    /// Run `f` on the stored record while holding the write lock
    async fn modify<T>(&self, id: i64, f: impl FnOnce(&mut R) -> T + Send) -> Option<T> {
        let mut rows = self.inner.write().await;
        rows.by_id.get_mut(&id).map(f)
    }
}

impl<R: Record> Default for MemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryTable<R> {
    async fn create(&self, draft: R::Draft) -> AppResult<R> {
        let mut rows = self.inner.write().await;
        let id = rows.next_id;
        rows.next_id += 1;
        let record = R::from_draft(id, draft);
        rows.by_id.insert(id, record.clone());
        Ok(record)
    }

    async fn read(&self, id: i64) -> AppResult<Option<R>> {
        let rows = self.inner.read().await;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn read_all(&self) -> AppResult<Vec<R>> {
        let rows = self.inner.read().await;
        Ok(rows.by_id.values().cloned().collect())
    }

    async fn update(&self, record: R) -> AppResult<R> {
        let mut rows = self.inner.write().await;
        let id = record.id();
        if id >= rows.next_id {
            rows.next_id = id + 1;
        }
        rows.by_id.insert(id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut rows = self.inner.write().await;
        rows.by_id.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryTable<Book> {
    async fn set_issued(&self, id: i64, issued: bool) -> AppResult<IssueOutcome> {
        let outcome = self
            .modify(id, |book| {
                if book.issued == issued {
                    IssueOutcome::Unchanged(book.clone())
                } else {
                    book.issued = issued;
                    IssueOutcome::Changed(book.clone())
                }
            })
            .await;
        Ok(outcome.unwrap_or(IssueOutcome::Missing))
    }

    async fn update_details(&self, id: i64, details: BookDetails) -> AppResult<Option<Book>> {
        Ok(self
            .modify(id, |book| {
                book.apply(details);
                book.clone()
            })
            .await)
    }
}

#[async_trait]
impl StudentStore for MemoryTable<Student> {
    async fn update_details(
        &self,
        id: i64,
        details: StudentDetails,
    ) -> AppResult<Option<Student>> {
        Ok(self
            .modify(id, |student| {
                student.apply(details);
                student.clone()
            })
            .await)
    }
}
