//! Attendance domain module.
//!
//! Daily check-in records, the Director's justification action and the
//! aggregates shown on the statistics page.

mod errors;
mod record;
mod report;
mod status;

pub use errors::AttendanceError;
pub use record::{AttendanceRecord, JUSTIFIED_CHECK_IN};
pub use report::{
    AttendanceStatistics, DailyAttendanceRow, GroupAbsences, StatusCount, StudentCount,
    TOP_STUDENTS_LIMIT,
};
pub use status::AttendanceStatus;
