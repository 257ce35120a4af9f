//! Attendance record entity.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::domain::foundation::{AttendanceRecordId, StudentId};

use super::AttendanceStatus;

/// Check-in time stored when a justification creates the row.
pub const JUSTIFIED_CHECK_IN: NaiveTime = NaiveTime::MIN;

/// One student's attendance for one day. Unique per `(student, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    id: AttendanceRecordId,
    student_id: StudentId,
    date: NaiveDate,
    check_in: NaiveTime,
    status: AttendanceStatus,
}

impl AttendanceRecord {
    /// A record created by the Director's justification, with the sentinel
    /// check-in time.
    pub fn justified(student_id: StudentId, date: NaiveDate) -> Self {
        Self {
            id: AttendanceRecordId::new(),
            student_id,
            date,
            check_in: JUSTIFIED_CHECK_IN,
            status: AttendanceStatus::Justificado,
        }
    }

    pub fn reconstitute(
        id: AttendanceRecordId,
        student_id: StudentId,
        date: NaiveDate,
        check_in: NaiveTime,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id,
            student_id,
            date,
            check_in,
            status,
        }
    }

    pub fn id(&self) -> AttendanceRecordId {
        self.id
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn check_in(&self) -> NaiveTime {
        self.check_in
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    /// Marks an existing record as justified; the check-in time is kept.
    pub fn justify(&mut self) {
        self.status = AttendanceStatus::Justificado;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn justified_record_uses_midnight() {
        let record = AttendanceRecord::justified(StudentId::new(), day());
        assert_eq!(record.check_in(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(record.status(), AttendanceStatus::Justificado);
    }

    #[test]
    fn justify_keeps_check_in() {
        let check_in = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
        let mut record = AttendanceRecord::reconstitute(
            AttendanceRecordId::new(),
            StudentId::new(),
            day(),
            check_in,
            AttendanceStatus::Falta,
        );
        record.justify();
        assert_eq!(record.status(), AttendanceStatus::Justificado);
        assert_eq!(record.check_in(), check_in);
    }
}
