//! PostgreSQL implementation of StudentRepository.
//!
//! History lines are written in the same transaction as the change they
//! describe.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, GroupId, HistoryEntryId, StoredFileName, StudentDocumentId,
    StudentId, Timestamp,
};
use crate::domain::school::{Curp, HistoryEntry, Student, StudentDocument, StudentStatus};
use crate::ports::StudentRepository;

use super::errors::{corrupt_row, is_foreign_key_violation, map_db_error};

pub struct PostgresStudentRepository {
    pool: PgPool,
}

impl PostgresStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'_, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| map_db_error("Failed to begin transaction", e))
    }
}

async fn insert_history(
    tx: &mut Transaction<'_, Postgres>,
    entry: &HistoryEntry,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO student_history (id, student_id, description, actor, recorded_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(entry.id().as_uuid())
    .bind(entry.student_id().as_uuid())
    .bind(entry.description())
    .bind(entry.actor())
    .bind(entry.recorded_at().as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| map_db_error("Failed to record student history", e))?;

    Ok(())
}

fn student_not_found(id: StudentId) -> DomainError {
    DomainError::new(ErrorCode::StudentNotFound, format!("Student not found: {}", id))
}

#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    group_id: Uuid,
    full_name: String,
    curp: String,
    status: String,
    enrolled_on: NaiveDate,
}

impl TryFrom<StudentRow> for Student {
    type Error = DomainError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Student::reconstitute(
            StudentId::from_uuid(row.id),
            GroupId::from_uuid(row.group_id),
            row.full_name,
            Curp::new(&row.curp).map_err(|e| corrupt_row("curp", e))?,
            row.status
                .parse::<StudentStatus>()
                .map_err(|e| corrupt_row("status", e))?,
            row.enrolled_on,
        ))
    }
}

const SELECT_STUDENT: &str =
    "SELECT id, group_id, full_name, curp, status, enrolled_on FROM students";

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn save(&self, student: &Student, entry: &HistoryEntry) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO students (id, group_id, full_name, curp, status, enrolled_on)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(student.id().as_uuid())
        .bind(student.group_id().as_uuid())
        .bind(student.full_name())
        .bind(student.curp().as_str())
        .bind(student.status().as_str())
        .bind(student.enrolled_on())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return DomainError::new(
                    ErrorCode::GroupNotFound,
                    format!("Group not found: {}", student.group_id()),
                );
            }
            map_db_error("Failed to save student", e)
        })?;

        insert_history(&mut tx, entry).await?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Failed to commit student", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, DomainError> {
        let row: Option<StudentRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_STUDENT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to fetch student", e))?;

        row.map(Student::try_from).transpose()
    }

    async fn list_by_group(&self, group: &GroupId) -> Result<Vec<Student>, DomainError> {
        let rows: Vec<StudentRow> = sqlx::query_as(&format!(
            "{} WHERE group_id = $1 ORDER BY full_name",
            SELECT_STUDENT
        ))
        .bind(group.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list students", e))?;

        rows.into_iter().map(Student::try_from).collect()
    }

    async fn update_status(
        &self,
        student: &Student,
        entry: &HistoryEntry,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        let result = sqlx::query("UPDATE students SET status = $2 WHERE id = $1")
            .bind(student.id().as_uuid())
            .bind(student.status().as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("Failed to update student status", e))?;

        if result.rows_affected() == 0 {
            return Err(student_not_found(student.id()));
        }

        insert_history(&mut tx, entry).await?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Failed to commit status change", e))?;

        Ok(())
    }

    async fn add_document(
        &self,
        document: &StudentDocument,
        entry: &HistoryEntry,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO student_documents (id, student_id, original_name, stored_name, uploaded_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.student_id().as_uuid())
        .bind(document.file().original())
        .bind(document.file().stored())
        .bind(document.uploaded_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return student_not_found(document.student_id());
            }
            map_db_error("Failed to save student document", e)
        })?;

        insert_history(&mut tx, entry).await?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Failed to commit student document", e))?;

        Ok(())
    }

    async fn list_documents(
        &self,
        student: &StudentId,
    ) -> Result<Vec<StudentDocument>, DomainError> {
        let rows: Vec<(Uuid, Uuid, String, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, student_id, original_name, stored_name, uploaded_at
            FROM student_documents
            WHERE student_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(student.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list student documents", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, student_id, original, stored, uploaded_at)| {
                StudentDocument::reconstitute(
                    StudentDocumentId::from_uuid(id),
                    StudentId::from_uuid(student_id),
                    StoredFileName::reconstitute(original, stored),
                    Timestamp::from_datetime(uploaded_at),
                )
            })
            .collect())
    }

    async fn list_history(&self, student: &StudentId) -> Result<Vec<HistoryEntry>, DomainError> {
        let rows: Vec<(Uuid, Uuid, String, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, student_id, description, actor, recorded_at
            FROM student_history
            WHERE student_id = $1
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(student.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list student history", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, student_id, description, actor, recorded_at)| {
                HistoryEntry::reconstitute(
                    HistoryEntryId::from_uuid(id),
                    StudentId::from_uuid(student_id),
                    description,
                    actor,
                    Timestamp::from_datetime(recorded_at),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_student() {
        let row = StudentRow {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            full_name: "Luis Pérez".to_string(),
            curp: "PELU100101HDFRRSA1".to_string(),
            status: "BAJA".to_string(),
            enrolled_on: NaiveDate::from_ymd_opt(2024, 8, 26).unwrap(),
        };
        let student = Student::try_from(row).unwrap();
        assert_eq!(student.status(), StudentStatus::Baja);
        assert_eq!(student.curp().as_str(), "PELU100101HDFRRSA1");
    }

    #[test]
    fn bad_status_row_is_corrupt() {
        let row = StudentRow {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            full_name: "Luis Pérez".to_string(),
            curp: "PELU100101HDFRRSA1".to_string(),
            status: "EXPULSADO".to_string(),
            enrolled_on: NaiveDate::from_ymd_opt(2024, 8, 26).unwrap(),
        };
        assert!(Student::try_from(row).is_err());
    }
}
