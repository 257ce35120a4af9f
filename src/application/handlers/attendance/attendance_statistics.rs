//! AttendanceStatisticsHandler - global attendance statistics.

use std::sync::Arc;

use crate::domain::attendance::{AttendanceError, AttendanceStatistics, TOP_STUDENTS_LIMIT};
use crate::ports::AttendanceRepository;

pub struct AttendanceStatisticsHandler {
    repository: Arc<dyn AttendanceRepository>,
}

impl AttendanceStatisticsHandler {
    pub fn new(repository: Arc<dyn AttendanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<AttendanceStatistics, AttendanceError> {
        Ok(self.repository.statistics(TOP_STUDENTS_LIMIT).await?)
    }
}
