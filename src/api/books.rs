//! Book catalogue endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::{ApiJson, ApiPath};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDetails, IssueOutcome},
};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, ascending by id", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list_all().await?;
    Ok(Json(books))
}

/// List books that are on the shelf
#[utoipa::path(
    get,
    path = "/books/available",
    tag = "books",
    responses(
        (status = 200, description = "Books not currently issued", body = Vec<Book>)
    )
)]
pub async fn list_available_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list_available().await?;
    Ok(Json(books))
}

/// List books that are lent out
#[utoipa::path(
    get,
    path = "/books/issued",
    tag = "books",
    responses(
        (status = 200, description = "Books currently issued", body = Vec<Book>)
    )
)]
pub async fn list_issued_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list_issued().await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .books
        .get_by_id(id)
        .await?
        .ok_or(AppError::BookNotFound(id))?;
    Ok(Json(book))
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookDetails,
    responses(
        (status = 200, description = "Book created, not issued", body = Book)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ApiJson(details): ApiJson<BookDetails>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.add(details).await?;
    Ok(Json(book))
}

/// Update a book's descriptive fields
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookDetails,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(details): ApiJson<BookDetails>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .books
        .update(id, details)
        .await?
        .ok_or(AppError::BookNotFound(id))?;
    Ok(Json(book))
}

/// Issue a book
#[utoipa::path(
    post,
    path = "/books/issue/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book issued", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already issued", body = crate::error::ErrorResponse)
    )
)]
pub async fn issue_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Book>> {
    match state.services.books.issue(id).await? {
        IssueOutcome::Changed(book) => Ok(Json(book)),
        IssueOutcome::Unchanged(_) => Err(AppError::AlreadyIssued(id)),
        IssueOutcome::Missing => Err(AppError::BookNotFound(id)),
    }
}

/// Return a book
#[utoipa::path(
    post,
    path = "/books/return/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book returned", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book was not issued", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Book>> {
    match state.services.books.return_book(id).await? {
        IssueOutcome::Changed(book) => Ok(Json(book)),
        IssueOutcome::Unchanged(_) => Err(AppError::NotIssued(id)),
        IssueOutcome::Missing => Err(AppError::BookNotFound(id)),
    }
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted, or did not exist")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
