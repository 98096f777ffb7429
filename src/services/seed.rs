//! Demo catalogue loaded into empty tables at startup

use crate::{
    error::AppResult,
    models::{BookDetails, StudentDetails},
};

use super::Services;

const BOOKS: &[(&str, &str, &str, &str)] = &[
    (
        "Java Basics",
        "Kumar",
        "A foundational book on core Java programming principles.",
        "Programming",
    ),
    (
        "Database Systems",
        "Anita",
        "Comprehensive guide to SQL and relational databases for beginners.",
        "Database",
    ),
    (
        "Algorithms and Data Structures",
        "Sharma",
        "Essential guide for technical interviews, focusing on efficiency.",
        "Computer Science",
    ),
];

const STUDENTS: &[(&str, &str)] = &[("Rahul", "CSE"), ("Meera", "ECE"), ("Priya", "IT")];

/// Number of rows inserted per table
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub books: usize,
    pub students: usize,
}

/// Insert the demo books and students; a table that already has rows is left alone
pub async fn load_defaults(services: &Services) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    if services.books.list_all().await?.is_empty() {
        for &(title, author, description, category) in BOOKS {
            services
                .books
                .add(BookDetails::new(title, author, description, category))
                .await?;
            report.books += 1;
        }
    }

    if services.students.list_all().await?.is_empty() {
        for &(name, branch) in STUDENTS {
            services.students.add(StudentDetails::new(name, branch)).await?;
            report.students += 1;
        }
    }

    tracing::info!(
        books = report.books,
        students = report.students,
        "seed data loaded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;

    #[tokio::test]
    async fn test_seeds_empty_tables() {
        let services = Services::new(Repository::in_memory());
        let report = load_defaults(&services).await.unwrap();
        assert_eq!(report, SeedReport { books: 3, students: 3 });

        let books = services.books.list_all().await.unwrap();
        assert_eq!(books[0].title.as_deref(), Some("Java Basics"));
        assert!(books.iter().all(|b| !b.issued));
    }

    #[tokio::test]
    async fn test_second_run_inserts_nothing() {
        let services = Services::new(Repository::in_memory());
        load_defaults(&services).await.unwrap();
        let report = load_defaults(&services).await.unwrap();
        assert_eq!(report, SeedReport::default());
        assert_eq!(services.students.list_all().await.unwrap().len(), 3);
    }
}
