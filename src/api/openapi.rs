//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Backend API",
        version = "1.0.0",
        description = "Books and students REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::list_available_books,
        books::list_issued_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::issue_book,
        books::return_book,
        books::delete_book,
        // Students
        students::list_students,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::student::Student,
            crate::models::student::StudentDetails,
            health::HealthResponse,
            health::ReadinessResponse,
            crate::config::StorageBackend,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalogue and issue/return"),
        (name = "students", description = "Student management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/books",
            "/books/available",
            "/books/issued",
            "/books/{id}",
            "/books/issue/{id}",
            "/books/return/{id}",
            "/students",
            "/students/{id}",
            "/health",
            "/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
