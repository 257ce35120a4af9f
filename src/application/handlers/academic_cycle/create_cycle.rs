//! CreateCycleHandler - Command handler for creating academic cycles.

use std::sync::Arc;

use tracing::info;

use crate::domain::academic_cycle::{AcademicCycle, CycleError, CycleName};
use crate::ports::CycleRepository;

#[derive(Debug, Clone)]
pub struct CreateCycleCommand {
    pub name: String,
}

/// Creates a cycle in the inactive state.
///
/// A duplicate name surfaces as `CycleError::AlreadyExists`; callers treat it
/// as a soft outcome.
pub struct CreateCycleHandler {
    repository: Arc<dyn CycleRepository>,
}

impl CreateCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateCycleCommand) -> Result<AcademicCycle, CycleError> {
        let name = CycleName::new(&cmd.name)?;
        let cycle = AcademicCycle::new(name);

        self.repository.save(&cycle).await?;

        info!(cycle_id = %cycle.id(), name = %cycle.name(), "Academic cycle created");
        Ok(cycle)
    }
}
