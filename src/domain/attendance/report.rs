//! Read models for the daily report and the statistics page.

use chrono::NaiveTime;
use serde::Serialize;

use crate::domain::foundation::{GroupId, StudentId};

use super::AttendanceStatus;

/// How many students each top list holds.
pub const TOP_STUDENTS_LIMIT: usize = 5;

/// One line of the daily attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAttendanceRow {
    pub student_id: StudentId,
    pub student_name: String,
    pub group_label: String,
    pub check_in: NaiveTime,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: AttendanceStatus,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupAbsences {
    pub group_id: GroupId,
    pub group_label: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentCount {
    pub student_id: StudentId,
    pub student_name: String,
    pub group_label: String,
    pub total: i64,
}

/// Aggregates behind the Director's statistics page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceStatistics {
    /// Count per status across all records.
    pub by_status: Vec<StatusCount>,
    /// `FALTA` count per group, highest first.
    pub absences_by_group: Vec<GroupAbsences>,
    /// Students with most `FALTA` records.
    pub top_absences: Vec<StudentCount>,
    /// Students with most `RETARDO` records.
    pub top_tardies: Vec<StudentCount>,
}

impl AttendanceStatistics {
    pub fn total_for(&self, status: AttendanceStatus) -> i64 {
        self.by_status
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.total)
            .unwrap_or(0)
    }
}
