//! Student service

use crate::{
    error::AppResult,
    models::{Student, StudentDetails, StudentUpdate},
    repository::Repository,
};

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
}

impl StudentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Student>> {
        self.repository.students.read_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        self.repository.students.read(id).await
    }

    pub async fn add(&self, details: StudentDetails) -> AppResult<Student> {
        let student = self.repository.students.create(details).await?;
        tracing::info!(student_id = student.id, "student added");
        Ok(student)
    }

    /// Update a student's name and branch.
    ///
    /// An unknown id does not fail: the details are stored as a brand new
    /// student under a store-assigned id, reported as [`StudentUpdate::Created`].
    pub async fn update(&self, id: i64, details: StudentDetails) -> AppResult<StudentUpdate> {
        // Single conditional write, so a concurrent delete is never undone.
        if let Some(student) = self
            .repository
            .students
            .update_details(id, details.clone())
            .await?
        {
            tracing::info!(student_id = id, "student updated");
            return Ok(StudentUpdate::Updated(student));
        }

        let student = self.repository.students.create(details).await?;
        tracing::info!(
            requested_id = id,
            student_id = student.id,
            "unknown student id on update, created new student"
        );
        Ok(StudentUpdate::Created(student))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.students.delete(id).await?;
        tracing::info!(student_id = id, "student deleted");
        Ok(())
    }
}
