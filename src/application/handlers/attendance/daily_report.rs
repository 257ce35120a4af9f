//! DailyReportHandler - attendance of one day.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::attendance::{AttendanceError, DailyAttendanceRow};
use crate::domain::foundation::Timestamp;
use crate::ports::AttendanceRepository;

#[derive(Debug, Clone, Default)]
pub struct DailyReportQuery {
    /// Defaults to today (school-local date).
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub rows: Vec<DailyAttendanceRow>,
}

pub struct DailyReportHandler {
    repository: Arc<dyn AttendanceRepository>,
}

impl DailyReportHandler {
    pub fn new(repository: Arc<dyn AttendanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: DailyReportQuery) -> Result<DailyReport, AttendanceError> {
        let date = query
            .date
            .unwrap_or_else(|| Timestamp::now().local_date());
        let rows = self.repository.daily_report(date).await?;
        Ok(DailyReport { date, rows })
    }
}
