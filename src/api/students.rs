//! Student endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::{ApiJson, ApiPath};
use crate::{
    error::{AppError, AppResult},
    models::{Student, StudentDetails},
};

/// List all students
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "All students, ascending by id", body = Vec<Student>)
    )
)]
pub async fn list_students(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Student>>> {
    let students = state.services.students.list_all().await?;
    Ok(Json(students))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_student(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Student>> {
    let student = state
        .services
        .students
        .get_by_id(id)
        .await?
        .ok_or(AppError::StudentNotFound(id))?;
    Ok(Json(student))
}

/// Add a student
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = StudentDetails,
    responses(
        (status = 200, description = "Student created", body = Student)
    )
)]
pub async fn create_student(
    State(state): State<crate::AppState>,
    ApiJson(details): ApiJson<StudentDetails>,
) -> AppResult<Json<Student>> {
    let student = state.services.students.add(details).await?;
    Ok(Json(student))
}

/// Update a student; an unknown ID creates a new student under a fresh ID
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = StudentDetails,
    responses(
        (status = 200, description = "Student updated, or created when the ID was unknown", body = Student)
    )
)]
pub async fn update_student(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(details): ApiJson<StudentDetails>,
) -> AppResult<Json<Student>> {
    let outcome = state.services.students.update(id, details).await?;
    Ok(Json(outcome.into_student()))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted, or did not exist")
    )
)]
pub async fn delete_student(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.services.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
