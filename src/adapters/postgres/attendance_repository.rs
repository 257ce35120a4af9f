//! PostgreSQL implementation of AttendanceRepository.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::attendance::{
    AttendanceRecord, AttendanceStatistics, AttendanceStatus, DailyAttendanceRow, GroupAbsences,
    StatusCount, StudentCount,
};
use crate::domain::foundation::{
    AttendanceRecordId, DomainError, ErrorCode, GroupId, StudentId,
};
use crate::domain::school::{group_label, Grade};
use crate::ports::AttendanceRepository;

use super::errors::{corrupt_row, is_foreign_key_violation, map_db_error};

pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: Uuid,
    student_id: Uuid,
    date: NaiveDate,
    check_in: NaiveTime,
    status: String,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = DomainError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        Ok(AttendanceRecord::reconstitute(
            AttendanceRecordId::from_uuid(row.id),
            StudentId::from_uuid(row.student_id),
            row.date,
            row.check_in,
            parse_status(&row.status)?,
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DailyRow {
    student_id: Uuid,
    full_name: String,
    grade: i16,
    letter: String,
    check_in: NaiveTime,
    status: String,
}

#[derive(Debug, sqlx::FromRow)]
struct StudentCountRow {
    student_id: Uuid,
    full_name: String,
    grade: i16,
    letter: String,
    total: i64,
}

fn parse_status(s: &str) -> Result<AttendanceStatus, DomainError> {
    s.parse().map_err(|e| corrupt_row("status", e))
}

fn label(grade: i16, letter: &str) -> Result<String, DomainError> {
    let grade = Grade::new(grade as i32).map_err(|e| corrupt_row("grade", e))?;
    Ok(group_label(grade, letter))
}

impl PostgresAttendanceRepository {
    async fn top_students(
        &self,
        status: AttendanceStatus,
        top: usize,
    ) -> Result<Vec<StudentCount>, DomainError> {
        let rows: Vec<StudentCountRow> = sqlx::query_as(
            r#"
            SELECT s.id AS student_id, s.full_name, g.grade, g.letter, COUNT(*) AS total
            FROM attendance a
            JOIN students s ON s.id = a.student_id
            JOIN groups g ON g.id = s.group_id
            WHERE a.status = $1
            GROUP BY s.id, s.full_name, g.grade, g.letter
            ORDER BY total DESC, s.full_name
            LIMIT $2
            "#,
        )
        .bind(status.as_str())
        .bind(top as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to rank students", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(StudentCount {
                    student_id: StudentId::from_uuid(row.student_id),
                    group_label: label(row.grade, &row.letter)?,
                    student_name: row.full_name,
                    total: row.total,
                })
            })
            .collect()
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn justify(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError> {
        let row: AttendanceRow = sqlx::query_as(
            r#"
            INSERT INTO attendance (id, student_id, date, check_in, status)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (student_id, date)
            DO UPDATE SET status = EXCLUDED.status
            RETURNING id, student_id, date, check_in, status
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.student_id().as_uuid())
        .bind(record.date())
        .bind(record.check_in())
        .bind(AttendanceStatus::Justificado.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return DomainError::new(
                    ErrorCode::StudentNotFound,
                    format!("Student not found: {}", record.student_id()),
                );
            }
            map_db_error("Failed to justify attendance", e)
        })?;

        AttendanceRecord::try_from(row)
    }

    async fn daily_report(&self, date: NaiveDate) -> Result<Vec<DailyAttendanceRow>, DomainError> {
        let rows: Vec<DailyRow> = sqlx::query_as(
            r#"
            SELECT a.student_id, s.full_name, g.grade, g.letter, a.check_in, a.status
            FROM attendance a
            JOIN students s ON s.id = a.student_id
            JOIN groups g ON g.id = s.group_id
            WHERE a.date = $1
            ORDER BY a.check_in DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to load daily attendance", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(DailyAttendanceRow {
                    student_id: StudentId::from_uuid(row.student_id),
                    group_label: label(row.grade, &row.letter)?,
                    student_name: row.full_name,
                    check_in: row.check_in,
                    status: parse_status(&row.status)?,
                })
            })
            .collect()
    }

    async fn statistics(&self, top: usize) -> Result<AttendanceStatistics, DomainError> {
        let by_status: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM attendance GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to count attendance by status", e))?;

        let by_group: Vec<(Uuid, i16, String, i64)> = sqlx::query_as(
            r#"
            SELECT g.id, g.grade, g.letter, COUNT(*) AS total
            FROM attendance a
            JOIN students s ON s.id = a.student_id
            JOIN groups g ON g.id = s.group_id
            WHERE a.status = 'FALTA'
            GROUP BY g.id, g.grade, g.letter
            ORDER BY total DESC, g.grade, g.letter
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to count absences by group", e))?;

        let by_status = by_status
            .into_iter()
            .map(|(status, total)| {
                Ok(StatusCount {
                    status: parse_status(&status)?,
                    total,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let absences_by_group = by_group
            .into_iter()
            .map(|(id, grade, letter, total)| {
                Ok(GroupAbsences {
                    group_id: GroupId::from_uuid(id),
                    group_label: label(grade, &letter)?,
                    total,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(AttendanceStatistics {
            by_status,
            absences_by_group,
            top_absences: self.top_students(AttendanceStatus::Falta, top).await?,
            top_tardies: self.top_students(AttendanceStatus::Retardo, top).await?,
        })
    }

    async fn find(
        &self,
        student: &StudentId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, DomainError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, student_id, date, check_in, status
            FROM attendance WHERE student_id = $1 AND date = $2
            "#,
        )
        .bind(student.as_uuid())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to fetch attendance", e))?;

        row.map(AttendanceRecord::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_formats_group() {
        assert_eq!(label(3, "A").unwrap(), "3° A");
        assert!(label(7, "A").is_err());
    }

    #[test]
    fn row_with_short_code_parses() {
        let row = AttendanceRow {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            check_in: NaiveTime::from_hms_opt(7, 55, 0).unwrap(),
            status: "A".to_string(),
        };
        let record = AttendanceRecord::try_from(row).unwrap();
        assert_eq!(record.status(), AttendanceStatus::Asistencia);
    }
}
