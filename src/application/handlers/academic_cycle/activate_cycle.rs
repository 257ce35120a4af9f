//! ActivateCycleHandler - Command handler for switching the active cycle.

use std::sync::Arc;

use tracing::info;

use crate::domain::academic_cycle::{AcademicCycle, CycleError};
use crate::domain::foundation::CycleId;
use crate::ports::CycleRepository;

#[derive(Debug, Clone)]
pub struct ActivateCycleCommand {
    pub cycle_id: CycleId,
}

/// Makes one cycle the active one.
///
/// The repository deactivates every other cycle in the same transaction, so
/// at most one cycle is ever active. Unknown ids change nothing.
pub struct ActivateCycleHandler {
    repository: Arc<dyn CycleRepository>,
}

impl ActivateCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ActivateCycleCommand) -> Result<AcademicCycle, CycleError> {
        let mut cycle = self
            .repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or_else(|| CycleError::not_found(cmd.cycle_id.to_string()))?;

        self.repository.activate(&cmd.cycle_id).await?;
        cycle.set_active(true);

        info!(cycle_id = %cycle.id(), name = %cycle.name(), "Academic cycle activated");
        Ok(cycle)
    }
}
