//! Students repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{RecordStore, StudentStore};
use crate::{
    error::AppResult,
    models::{Student, StudentDetails},
};

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Student> for StudentsRepository {
    async fn create(&self, draft: StudentDetails) -> AppResult<Student> {
        let row = sqlx::query_as::<_, Student>(
            "INSERT INTO students (name, branch) VALUES ($1, $2) RETURNING *",
        )
        .bind(&draft.name)
        .bind(&draft.branch)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn read(&self, id: i64) -> AppResult<Option<Student>> {
        let row = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn read_all(&self) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, student: Student) -> AppResult<Student> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, name, branch)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                branch = EXCLUDED.branch
            RETURNING *
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.branch)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('students', 'id'), GREATEST(MAX(id), 1)) FROM students",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl StudentStore for StudentsRepository {
    async fn update_details(
        &self,
        id: i64,
        details: StudentDetails,
    ) -> AppResult<Option<Student>> {
        let row = sqlx::query_as::<_, Student>(
            "UPDATE students SET name = $2, branch = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&details.name)
        .bind(&details.branch)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
