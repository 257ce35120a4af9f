//! PostgreSQL implementation of PlanningRepository and PlanningReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::academic_cycle::CycleName;
use crate::domain::foundation::{
    AccountId, DomainError, ErrorCode, PlanningDocumentId, StoredFileName, Timestamp,
};
use crate::domain::planning::{PeriodLabel, PlanningDocument, ReviewStatus, TeacherRef};
use crate::ports::{PlanningReader, PlanningRepository, RecentDocument, TeacherFolder};

use super::errors::{corrupt_row, map_db_error};

pub struct PostgresPlanningRepository {
    pool: PgPool,
}

impl PostgresPlanningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlanningRow {
    id: Uuid,
    teacher_id: Uuid,
    cycle_name: String,
    period: String,
    original_name: String,
    stored_name: String,
    comment: String,
    status: String,
    feedback: Option<String>,
    uploaded_at: DateTime<Utc>,
}

impl TryFrom<PlanningRow> for PlanningDocument {
    type Error = DomainError;

    fn try_from(row: PlanningRow) -> Result<Self, Self::Error> {
        Ok(PlanningDocument::reconstitute(
            PlanningDocumentId::from_uuid(row.id),
            AccountId::from_uuid(row.teacher_id),
            CycleName::new(&row.cycle_name).map_err(|e| corrupt_row("cycle_name", e))?,
            PeriodLabel::new(&row.period).map_err(|e| corrupt_row("period", e))?,
            StoredFileName::reconstitute(row.original_name, row.stored_name),
            row.comment,
            str_to_status(&row.status)?,
            row.feedback,
            Timestamp::from_datetime(row.uploaded_at),
        ))
    }
}

fn status_to_str(status: ReviewStatus) -> &'static str {
    status.as_str()
}

fn str_to_status(s: &str) -> Result<ReviewStatus, DomainError> {
    s.parse::<ReviewStatus>().map_err(|e| corrupt_row("status", e))
}

const SELECT_DOCUMENT: &str = r#"
    SELECT id, teacher_id, cycle_name, period, original_name, stored_name,
           comment, status, feedback, uploaded_at
    FROM planning_documents
"#;

#[async_trait]
impl PlanningRepository for PostgresPlanningRepository {
    async fn save(&self, document: &PlanningDocument) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO planning_documents (
                id, teacher_id, cycle_name, period, original_name, stored_name,
                comment, status, feedback, uploaded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.teacher_id().as_uuid())
        .bind(document.cycle().as_str())
        .bind(document.period().as_str())
        .bind(document.file().original())
        .bind(document.file().stored())
        .bind(document.comment())
        .bind(status_to_str(document.status()))
        .bind(document.feedback())
        .bind(document.uploaded_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to save planning document", e))?;

        Ok(())
    }

    async fn update_review(&self, document: &PlanningDocument) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE planning_documents SET status = $2, feedback = $3
            WHERE id = $1
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(status_to_str(document.status()))
        .bind(document.feedback())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to update planning review", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Planning document not found: {}", document.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &PlanningDocumentId,
    ) -> Result<Option<PlanningDocument>, DomainError> {
        let row: Option<PlanningRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_DOCUMENT))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error("Failed to fetch planning document", e))?;

        row.map(PlanningDocument::try_from).transpose()
    }
}

/// Read-side queries over `planning_documents` joined with `accounts`.
pub struct PostgresPlanningReader {
    pool: PgPool,
}

impl PostgresPlanningReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FolderRow {
    id: Uuid,
    full_name: String,
    document_count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct RecentRow {
    #[sqlx(flatten)]
    document: PlanningRow,
    teacher_name: String,
}

#[async_trait]
impl PlanningReader for PostgresPlanningReader {
    async fn list_for_cycle_period(
        &self,
        cycle: &CycleName,
        period: &PeriodLabel,
    ) -> Result<Vec<PlanningDocument>, DomainError> {
        let rows: Vec<PlanningRow> = sqlx::query_as(&format!(
            "{} WHERE cycle_name = $1 AND period = $2 ORDER BY uploaded_at DESC",
            SELECT_DOCUMENT
        ))
        .bind(cycle.as_str())
        .bind(period.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list planning documents", e))?;

        rows.into_iter().map(PlanningDocument::try_from).collect()
    }

    async fn list_for_teacher(
        &self,
        teacher: &AccountId,
        cycle: &CycleName,
        period: Option<&PeriodLabel>,
        limit: usize,
    ) -> Result<Vec<PlanningDocument>, DomainError> {
        let rows: Vec<PlanningRow> = match period {
            Some(period) => sqlx::query_as(&format!(
                "{} WHERE teacher_id = $1 AND cycle_name = $2 AND period = $3 \
                 ORDER BY uploaded_at DESC",
                SELECT_DOCUMENT
            ))
            .bind(teacher.as_uuid())
            .bind(cycle.as_str())
            .bind(period.as_str())
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as(&format!(
                "{} WHERE teacher_id = $1 AND cycle_name = $2 \
                 ORDER BY uploaded_at DESC LIMIT $3",
                SELECT_DOCUMENT
            ))
            .bind(teacher.as_uuid())
            .bind(cycle.as_str())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| map_db_error("Failed to list teacher documents", e))?;

        rows.into_iter().map(PlanningDocument::try_from).collect()
    }

    async fn teacher_folders(&self, cycle: &CycleName) -> Result<Vec<TeacherFolder>, DomainError> {
        let rows: Vec<FolderRow> = sqlx::query_as(
            r#"
            SELECT a.id, a.full_name, COUNT(p.id) AS document_count
            FROM accounts a
            LEFT JOIN planning_documents p
                   ON p.teacher_id = a.id AND p.cycle_name = $1
            WHERE a.role = 'MAESTRO'
            GROUP BY a.id, a.full_name
            ORDER BY a.full_name
            "#,
        )
        .bind(cycle.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list teacher folders", e))?;

        Ok(rows
            .into_iter()
            .map(|row| TeacherFolder {
                teacher: TeacherRef {
                    id: AccountId::from_uuid(row.id),
                    full_name: row.full_name,
                },
                document_count: row.document_count,
            })
            .collect())
    }

    async fn recent_for_cycle(
        &self,
        cycle: &CycleName,
        limit: usize,
    ) -> Result<Vec<RecentDocument>, DomainError> {
        let rows: Vec<RecentRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.teacher_id, p.cycle_name, p.period, p.original_name,
                   p.stored_name, p.comment, p.status, p.feedback, p.uploaded_at,
                   a.full_name AS teacher_name
            FROM planning_documents p
            JOIN accounts a ON a.id = p.teacher_id
            WHERE p.cycle_name = $1
            ORDER BY p.uploaded_at DESC
            LIMIT $2
            "#,
        )
        .bind(cycle.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list recent documents", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(RecentDocument {
                    document: PlanningDocument::try_from(row.document)?,
                    teacher_name: row.teacher_name,
                })
            })
            .collect()
    }
}
