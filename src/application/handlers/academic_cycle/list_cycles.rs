//! ListCyclesHandler - Query handler for the cycle selector.

use std::sync::Arc;

use crate::domain::academic_cycle::{AcademicCycle, CycleError};
use crate::ports::CycleRepository;

/// Lists every cycle, newest first.
pub struct ListCyclesHandler {
    repository: Arc<dyn CycleRepository>,
}

impl ListCyclesHandler {
    pub fn new(repository: Arc<dyn CycleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<AcademicCycle>, CycleError> {
        Ok(self.repository.list().await?)
    }
}
