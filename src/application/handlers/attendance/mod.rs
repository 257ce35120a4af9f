//! Attendance handlers: justification, daily report and statistics.

mod attendance_statistics;
mod daily_report;
mod justify_attendance;

pub use attendance_statistics::AttendanceStatisticsHandler;
pub use daily_report::{DailyReport, DailyReportHandler, DailyReportQuery};
pub use justify_attendance::{JustifyAttendanceCommand, JustifyAttendanceHandler};
