//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Whether the book is currently lent out
    pub issued: bool,
}

/// Book fields accepted on create and update.
///
/// `issued` is not part of it; the flag only moves through issue/return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl BookDetails {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            description: Some(description.into()),
            category: Some(category.into()),
        }
    }
}

impl Book {
    /// Overwrite the descriptive fields, leaving `id` and `issued` alone
    pub fn apply(&mut self, details: BookDetails) {
        self.title = details.title;
        self.author = details.author;
        self.description = details.description;
        self.category = details.category;
    }
}

/// Result of an issue or return attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The flag was flipped; carries the stored record
    Changed(Book),
    /// The book was already in the requested state; nothing was written
    Unchanged(Book),
    /// No book with that id
    Missing,
}
