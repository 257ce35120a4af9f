//! JustifyAttendanceHandler - marks a student's day as justified.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::attendance::{AttendanceError, AttendanceRecord};
use crate::domain::foundation::StudentId;
use crate::ports::AttendanceRepository;

#[derive(Debug, Clone)]
pub struct JustifyAttendanceCommand {
    pub student_id: StudentId,
    pub date: NaiveDate,
}

/// Upserts on `(student, date)`: an existing record keeps its check-in time
/// and becomes `JUSTIFICADO`; a missing one is created with the sentinel time.
/// Repeating the call leaves a single record.
pub struct JustifyAttendanceHandler {
    repository: Arc<dyn AttendanceRepository>,
}

impl JustifyAttendanceHandler {
    pub fn new(repository: Arc<dyn AttendanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: JustifyAttendanceCommand,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let record = self
            .repository
            .justify(&AttendanceRecord::justified(cmd.student_id, cmd.date))
            .await?;

        info!(student_id = %cmd.student_id, date = %cmd.date, "Attendance justified");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::application::handlers::school::test_support::enrolled_student;
    use crate::domain::attendance::{AttendanceStatus, JUSTIFIED_CHECK_IN};
    use crate::domain::foundation::AttendanceRecordId;
    use chrono::NaiveTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 7).unwrap()
    }

    #[tokio::test]
    async fn justifying_twice_leaves_one_justified_record() {
        let db = Arc::new(InMemoryDatabase::new());
        let student = enrolled_student(&db, "Luis Pérez", "PELL100101HDFRSSA1").await;
        let handler = JustifyAttendanceHandler::new(db.clone());
        let cmd = JustifyAttendanceCommand {
            student_id: student.id(),
            date: day(),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let record = handler.handle(cmd).await.unwrap();

        assert_eq!(db.attendance_count(), 1);
        assert_eq!(record.status(), AttendanceStatus::Justificado);
        assert_eq!(record.check_in(), JUSTIFIED_CHECK_IN);
    }

    #[tokio::test]
    async fn existing_absence_keeps_check_in() {
        let db = Arc::new(InMemoryDatabase::new());
        let student = enrolled_student(&db, "Luis Pérez", "PELL100101HDFRSSA1").await;
        let check_in = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
        db.insert_attendance(AttendanceRecord::reconstitute(
            AttendanceRecordId::new(),
            student.id(),
            day(),
            check_in,
            AttendanceStatus::Falta,
        ));
        let handler = JustifyAttendanceHandler::new(db.clone());

        let record = handler
            .handle(JustifyAttendanceCommand {
                student_id: student.id(),
                date: day(),
            })
            .await
            .unwrap();

        assert_eq!(db.attendance_count(), 1);
        assert_eq!(record.status(), AttendanceStatus::Justificado);
        assert_eq!(record.check_in(), check_in);
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let handler = JustifyAttendanceHandler::new(Arc::new(InMemoryDatabase::new()));

        let err = handler
            .handle(JustifyAttendanceCommand {
                student_id: StudentId::new(),
                date: day(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AttendanceError::StudentNotFound(_)));
    }
}
