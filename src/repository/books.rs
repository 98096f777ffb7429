//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{BookStore, RecordStore};
use crate::{
    error::AppResult,
    models::{Book, BookDetails, IssueOutcome},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Book> for BooksRepository {
    async fn create(&self, draft: BookDetails) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, description, category, issued)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.description)
        .bind(&draft.category)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn read(&self, id: i64) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn read_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, book: Book) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author, description, category, issued)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                author = EXCLUDED.author,
                description = EXCLUDED.description,
                category = EXCLUDED.category,
                issued = EXCLUDED.issued
            RETURNING *
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.category)
        .bind(book.issued)
        .fetch_one(&mut *tx)
        .await?;

        // An explicit id does not advance the identity sequence; keep it past MAX(id).
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('books', 'id'), GREATEST(MAX(id), 1)) FROM books",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn set_issued(&self, id: i64, issued: bool) -> AppResult<IssueOutcome> {
        // The row lock taken by UPDATE makes the flag flip a compare-and-set.
        let changed = sqlx::query_as::<_, Book>(
            "UPDATE books SET issued = $2 WHERE id = $1 AND issued <> $2 RETURNING *",
        )
        .bind(id)
        .bind(issued)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(book) = changed {
            return Ok(IssueOutcome::Changed(book));
        }

        Ok(match self.read(id).await? {
            Some(book) => IssueOutcome::Unchanged(book),
            None => IssueOutcome::Missing,
        })
    }

    async fn update_details(&self, id: i64, details: BookDetails) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author = $3, description = $4, category = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&details.title)
        .bind(&details.author)
        .bind(&details.description)
        .bind(&details.category)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
