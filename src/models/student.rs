//! Student model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: Option<String>,
    pub branch: Option<String>,
}

impl Student {
    /// Overwrite name and branch; the id stays
    pub fn apply(&mut self, details: StudentDetails) {
        self.name = details.name;
        self.branch = details.branch;
    }
}

/// Create / update student request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentDetails {
    pub name: Option<String>,
    pub branch: Option<String>,
}

impl StudentDetails {
    pub fn new(name: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            branch: Some(branch.into()),
        }
    }
}

/// What `update` did for a given id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentUpdate {
    Updated(Student),
    /// The id was unknown, so a fresh record was created under a new id
    Created(Student),
}

impl StudentUpdate {
    pub fn into_student(self) -> Student {
        match self {
            StudentUpdate::Updated(student) | StudentUpdate::Created(student) => student,
        }
    }
}
