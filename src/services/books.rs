//! Book catalogue service: lifecycle transitions and filtered listings

use crate::{
    error::AppResult,
    models::{Book, BookDetails, IssueOutcome},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books, ascending by id
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.read_all().await
    }

    /// Books currently on the shelf
    pub async fn list_available(&self) -> AppResult<Vec<Book>> {
        self.list_where(false).await
    }

    /// Books currently lent out
    pub async fn list_issued(&self) -> AppResult<Vec<Book>> {
        self.list_where(true).await
    }

    async fn list_where(&self, issued: bool) -> AppResult<Vec<Book>> {
        let mut books = self.list_all().await?;
        books.retain(|book| book.issued == issued);
        Ok(books)
    }

    /// Add a book to the catalogue; it always starts out available
    pub async fn add(&self, details: BookDetails) -> AppResult<Book> {
        let book = self.repository.books.create(details).await?;
        tracing::info!(book_id = book.id, "book added");
        Ok(book)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        self.repository.books.read(id).await
    }

    /// Replace title, author, description and category of an existing book
    pub async fn update(&self, id: i64, details: BookDetails) -> AppResult<Option<Book>> {
        let updated = self.repository.books.update_details(id, details).await?;
        if updated.is_some() {
            tracing::info!(book_id = id, "book details updated");
        }
        Ok(updated)
    }

    /// Mark a book as lent out
    pub async fn issue(&self, id: i64) -> AppResult<IssueOutcome> {
        let outcome = self.repository.books.set_issued(id, true).await?;
        log_transition("issue", id, &outcome);
        Ok(outcome)
    }

    /// Mark a book as back on the shelf
    pub async fn return_book(&self, id: i64) -> AppResult<IssueOutcome> {
        let outcome = self.repository.books.set_issued(id, false).await?;
        log_transition("return", id, &outcome);
        Ok(outcome)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}

fn log_transition(action: &'static str, id: i64, outcome: &IssueOutcome) {
    match outcome {
        IssueOutcome::Changed(_) => tracing::info!(book_id = id, action, "book state changed"),
        IssueOutcome::Unchanged(book) => tracing::warn!(
            book_id = id,
            action,
            issued = book.issued,
            "book already in requested state"
        ),
        IssueOutcome::Missing => tracing::warn!(book_id = id, action, "no such book"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::{
        error::AppError,
        models::Student,
        repository::{memory::MemoryTable, BookStore, RecordStore},
    };

    mock! {
        pub Books {}

        #[async_trait]
        impl RecordStore<Book> for Books {
            async fn create(&self, draft: BookDetails) -> AppResult<Book>;
            async fn read(&self, id: i64) -> AppResult<Option<Book>>;
            async fn read_all(&self) -> AppResult<Vec<Book>>;
            async fn update(&self, record: Book) -> AppResult<Book>;
            async fn delete(&self, id: i64) -> AppResult<()>;
        }

        #[async_trait]
        impl BookStore for Books {
            async fn set_issued(&self, id: i64, issued: bool) -> AppResult<IssueOutcome>;
            async fn update_details(&self, id: i64, details: BookDetails) -> AppResult<Option<Book>>;
        }
    }

    fn service() -> BooksService {
        BooksService::new(Repository::in_memory())
    }

    fn with_mock(books: MockBooks) -> BooksService {
        BooksService::new(Repository::with_stores(
            Arc::new(books),
            Arc::new(MemoryTable::<Student>::new()),
        ))
    }

    fn java_basics() -> BookDetails {
        BookDetails::new("Java Basics", "Kumar", "desc", "Programming")
    }

    async fn assert_partition(service: &BooksService) {
        let all = service.list_all().await.unwrap();
        let available = service.list_available().await.unwrap();
        let issued = service.list_issued().await.unwrap();

        assert_eq!(available.len() + issued.len(), all.len());
        assert!(available.iter().all(|b| !issued.contains(b)));
        assert!(all.iter().all(|b| available.contains(b) || issued.contains(b)));
    }

    #[tokio::test]
    async fn test_added_book_is_available() {
        let service = service();
        for i in 0..5 {
            let book = service
                .add(BookDetails::new(format!("t{i}"), "a", "d", "c"))
                .await
                .unwrap();
            assert!(!book.issued);
        }
        assert_eq!(service.list_available().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_issue_and_return_scenario() {
        let service = service();
        let book = service.add(java_basics()).await.unwrap();

        let all = service.list_all().await.unwrap();
        assert_eq!(all, vec![book.clone()]);
        assert!(!all[0].issued);

        let issued = match service.issue(book.id).await.unwrap() {
            IssueOutcome::Changed(b) => b,
            other => panic!("expected Changed, got {:?}", other),
        };
        assert!(issued.issued);
        assert!(service.list_issued().await.unwrap().contains(&issued));
        assert!(service.list_available().await.unwrap().is_empty());
        assert_partition(&service).await;

        let returned = match service.return_book(book.id).await.unwrap() {
            IssueOutcome::Changed(b) => b,
            other => panic!("expected Changed, got {:?}", other),
        };
        assert_eq!(returned, book);
        assert_eq!(service.list_available().await.unwrap(), vec![book]);
        assert_partition(&service).await;
    }

    #[tokio::test]
    async fn test_issue_twice_is_distinct_from_missing() {
        let service = service();
        let book = service.add(java_basics()).await.unwrap();
        service.issue(book.id).await.unwrap();

        let before = service.list_all().await.unwrap();
        let again = service.issue(book.id).await.unwrap();
        assert!(matches!(again, IssueOutcome::Unchanged(ref b) if b.issued));
        assert_eq!(service.list_all().await.unwrap(), before);

        assert_eq!(service.issue(9999).await.unwrap(), IssueOutcome::Missing);
    }

    #[tokio::test]
    async fn test_return_of_available_book_is_noop() {
        let service = service();
        let book = service.add(java_basics()).await.unwrap();

        let outcome = service.return_book(book.id).await.unwrap();
        assert_eq!(outcome, IssueOutcome::Unchanged(book));
        assert_eq!(service.return_book(9999).await.unwrap(), IssueOutcome::Missing);
    }

    #[tokio::test]
    async fn test_issue_unknown_leaves_store_unchanged() {
        let service = service();
        service.add(java_basics()).await.unwrap();
        let before = service.list_all().await.unwrap();

        assert_eq!(service.issue(9999).await.unwrap(), IssueOutcome::Missing);
        assert_eq!(service.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_absent() {
        let service = service();
        let book = service.add(java_basics()).await.unwrap();

        service.delete(book.id).await.unwrap();
        assert!(service.get_by_id(book.id).await.unwrap().is_none());

        // never existed
        service.delete(4242).await.unwrap();
        assert!(service.get_by_id(4242).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_does_not_touch_issued() {
        let service = service();
        let book = service.add(java_basics()).await.unwrap();
        service.issue(book.id).await.unwrap();

        let details = BookDetails {
            title: Some("Java Advanced".to_string()),
            ..Default::default()
        };
        let updated = service.update(book.id, details).await.unwrap().unwrap();
        assert_eq!(updated.title.as_deref(), Some("Java Advanced"));
        assert_eq!(updated.author, None);
        assert!(updated.issued);

        assert!(service.update(9999, java_basics()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partition_holds_across_mixed_operations() {
        let service = service();
        let mut ids = Vec::new();
        for i in 0..6 {
            let book = service
                .add(BookDetails::new(format!("b{i}"), "a", "d", "c"))
                .await
                .unwrap();
            ids.push(book.id);
        }
        for id in ids.iter().step_by(2) {
            service.issue(*id).await.unwrap();
        }
        assert_partition(&service).await;

        service.return_book(ids[0]).await.unwrap();
        service.delete(ids[1]).await.unwrap();
        service.issue(ids[3]).await.unwrap();
        assert_partition(&service).await;

        let issued: Vec<i64> = service.list_issued().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(issued, vec![ids[2], ids[3], ids[4]]);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut books = MockBooks::new();
        books
            .expect_read_all()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        books
            .expect_set_issued()
            .returning(|_, _| Err(AppError::Internal("store offline".to_string())));

        let service = with_mock(books);
        assert!(matches!(
            service.list_available().await,
            Err(AppError::Database(_))
        ));
        assert!(matches!(service.issue(1).await, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_issue_and_return_pass_target_state_to_store() {
        let mut books = MockBooks::new();
        books
            .expect_set_issued()
            .withf(|id, issued| *id == 7 && *issued)
            .times(1)
            .returning(|_, _| Ok(IssueOutcome::Missing));
        books
            .expect_set_issued()
            .withf(|id, issued| *id == 7 && !*issued)
            .times(1)
            .returning(|_, _| Ok(IssueOutcome::Missing));

        let service = with_mock(books);
        assert_eq!(service.issue(7).await.unwrap(), IssueOutcome::Missing);
        assert_eq!(service.return_book(7).await.unwrap(), IssueOutcome::Missing);
    }
}
