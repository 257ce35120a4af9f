//! PostgreSQL implementation of CycleRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::academic_cycle::{AcademicCycle, CycleName};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, Timestamp};
use crate::ports::CycleRepository;

use super::errors::{corrupt_row, map_db_error};

pub struct PostgresCycleRepository {
    pool: PgPool,
}

impl PostgresCycleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CycleRow {
    id: Uuid,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<CycleRow> for AcademicCycle {
    type Error = DomainError;

    fn try_from(row: CycleRow) -> Result<Self, Self::Error> {
        let name = CycleName::new(&row.name).map_err(|e| corrupt_row("name", e))?;
        Ok(AcademicCycle::reconstitute(
            CycleId::from_uuid(row.id),
            name,
            row.is_active,
            Timestamp::from_datetime(row.created_at),
        ))
    }
}

const SELECT_CYCLE: &str = "SELECT id, name, is_active, created_at FROM academic_cycles";

#[async_trait]
impl CycleRepository for PostgresCycleRepository {
    async fn save(&self, cycle: &AcademicCycle) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO academic_cycles (id, name, is_active, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.name().as_str())
        .bind(cycle.is_active())
        .bind(cycle.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to save cycle", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<AcademicCycle>, DomainError> {
        let row: Option<CycleRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_CYCLE))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to fetch cycle", e))?;

        row.map(AcademicCycle::try_from).transpose()
    }

    async fn find_by_name(&self, name: &CycleName) -> Result<Option<AcademicCycle>, DomainError> {
        let row: Option<CycleRow> = sqlx::query_as(&format!("{} WHERE name = $1", SELECT_CYCLE))
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to fetch cycle by name", e))?;

        row.map(AcademicCycle::try_from).transpose()
    }

    async fn find_active(&self) -> Result<Option<AcademicCycle>, DomainError> {
        let row: Option<CycleRow> =
            sqlx::query_as(&format!("{} WHERE is_active LIMIT 1", SELECT_CYCLE))
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error("Failed to fetch active cycle", e))?;

        row.map(AcademicCycle::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<AcademicCycle>, DomainError> {
        let rows: Vec<CycleRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at DESC, name DESC", SELECT_CYCLE))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_db_error("Failed to list cycles", e))?;

        rows.into_iter().map(AcademicCycle::try_from).collect()
    }

    async fn activate(&self, id: &CycleId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| activation_error("Failed to begin transaction", e))?;

        // Self-conflicting lock mode: concurrent activations run one at a time
        sqlx::query(LOCK_CYCLES)
            .execute(&mut *tx)
            .await
            .map_err(|e| activation_error("Failed to lock cycles", e))?;

        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM academic_cycles WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| activation_error("Failed to load cycle", e))?;

        if exists.is_none() {
            return Err(DomainError::new(
                ErrorCode::CycleNotFound,
                format!("Cycle not found: {}", id),
            ));
        }

        sqlx::query("UPDATE academic_cycles SET is_active = FALSE WHERE is_active")
            .execute(&mut *tx)
            .await
            .map_err(|e| activation_error("Failed to deactivate cycles", e))?;

        sqlx::query("UPDATE academic_cycles SET is_active = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| activation_error("Failed to activate cycle", e))?;

        tx.commit()
            .await
            .map_err(|e| activation_error("Failed to commit cycle activation", e))?;

        Ok(())
    }
}

const LOCK_CYCLES: &str = "LOCK TABLE academic_cycles IN SHARE ROW EXCLUSIVE MODE";

fn activation_error(context: &str, err: sqlx::Error) -> DomainError {
    not_a_duplicate(map_db_error(context, err))
}

/// Activation creates no row, so a unique violation there is the single-active
/// index rejecting a lost race. It must not read as a duplicate name.
fn not_a_duplicate(err: DomainError) -> DomainError {
    if err.is_duplicate() {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Cycle activation conflicted with another activation: {}", err.message),
        )
    } else {
        err
    }
}
