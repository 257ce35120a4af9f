//! DirectorOverviewHandler - most recent uploads for the Director dashboard.

use std::sync::Arc;

use crate::application::handlers::academic_cycle::CycleResolver;
use crate::domain::academic_cycle::ResolvedCycle;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::planning::PlanningError;
use crate::ports::{PlanningReader, RecentDocument};

#[derive(Debug, Clone)]
pub struct DirectorOverview {
    pub cycle: ResolvedCycle,
    pub recent: Vec<RecentDocument>,
}

pub struct DirectorOverviewHandler {
    reader: Arc<dyn PlanningReader>,
    resolver: Arc<CycleResolver>,
    limit: usize,
}

impl DirectorOverviewHandler {
    pub fn new(reader: Arc<dyn PlanningReader>, resolver: Arc<CycleResolver>, limit: usize) -> Self {
        Self {
            reader,
            resolver,
            limit,
        }
    }

    pub async fn handle(&self, user: &AuthenticatedUser) -> Result<DirectorOverview, PlanningError> {
        let cycle = self.resolver.selected_cycle(user).await?;
        let recent = self.reader.recent_for_cycle(&cycle.name, self.limit).await?;
        Ok(DirectorOverview { cycle, recent })
    }
}
