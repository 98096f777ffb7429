//! Data models for the library backend

pub mod book;
pub mod student;

// Re-export commonly used types
pub use book::{Book, BookDetails, IssueOutcome};
pub use student::{Student, StudentDetails, StudentUpdate};
