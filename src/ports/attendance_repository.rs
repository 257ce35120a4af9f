//! Attendance repository port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::attendance::{AttendanceRecord, AttendanceStatistics, DailyAttendanceRow};
use crate::domain::foundation::{DomainError, StudentId};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Upsert on `(student, date)`: an existing record becomes
    /// `JUSTIFICADO` keeping its check-in time, otherwise `record` is
    /// inserted as given. Returns the stored row.
    ///
    /// # Errors
    ///
    /// - `StudentNotFound` if the student doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn justify(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError>;

    /// Records of one day, latest check-in first.
    async fn daily_report(&self, date: NaiveDate) -> Result<Vec<DailyAttendanceRow>, DomainError>;

    /// Aggregates over every record; top lists hold at most `top` students.
    async fn statistics(&self, top: usize) -> Result<AttendanceStatistics, DomainError>;

    async fn find(
        &self,
        student: &StudentId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, DomainError>;
}
