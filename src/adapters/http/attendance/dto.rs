//! HTTP DTOs for attendance endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::attendance::{AttendanceRecord, AttendanceStatus, DailyAttendanceRow};

/// Dates travel as `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyReportParams {
    pub fecha: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct JustifyForm {
    pub id_alumno: String,
    pub fecha: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecordResponse {
    pub id: String,
    pub student_id: String,
    pub date: String,
    pub check_in: String,
    pub status: AttendanceStatus,
}

impl From<&AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id().to_string(),
            student_id: record.student_id().to_string(),
            date: record.date().format(DATE_FORMAT).to_string(),
            check_in: record.check_in().format("%H:%M:%S").to_string(),
            status: record.status(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRowResponse {
    pub student_id: String,
    pub student_name: String,
    pub group: String,
    pub check_in: String,
    pub status: AttendanceStatus,
}

impl From<&DailyAttendanceRow> for DailyRowResponse {
    fn from(row: &DailyAttendanceRow) -> Self {
        Self {
            student_id: row.student_id.to_string(),
            student_name: row.student_name.clone(),
            group: row.group_label.clone(),
            check_in: row.check_in.format("%H:%M:%S").to_string(),
            status: row.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReportResponse {
    pub date: String,
    pub rows: Vec<DailyRowResponse>,
}
