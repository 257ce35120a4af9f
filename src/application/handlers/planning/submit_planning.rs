//! SubmitPlanningHandler - Command handler for teacher uploads.
//!
//! Writing the file and inserting the record form one logical operation:
//! when the insert fails the freshly written file is removed again.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::handlers::academic_cycle::CycleResolver;
use crate::domain::academic_cycle::ResolvedCycle;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Role, StoredFileName, Timestamp};
use crate::domain::planning::{PeriodLabel, PlanningDocument, PlanningError};
use crate::ports::{AccountRepository, PlanningRepository, UploadArea, UploadStorage};

#[derive(Debug, Clone)]
pub struct SubmitPlanningCommand {
    pub user: AuthenticatedUser,
    pub period: String,
    pub comment: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct SubmitPlanningResult {
    pub document: PlanningDocument,
    /// Cycle the document was filed under.
    pub cycle: ResolvedCycle,
    /// URL path the file is served from.
    pub public_path: String,
}

/// Files a new planning document under the system cycle, in review.
///
/// Only teachers submit; the Director's account never owns a document.
pub struct SubmitPlanningHandler {
    accounts: Arc<dyn AccountRepository>,
    repository: Arc<dyn PlanningRepository>,
    storage: Arc<dyn UploadStorage>,
    resolver: Arc<CycleResolver>,
}

impl SubmitPlanningHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        repository: Arc<dyn PlanningRepository>,
        storage: Arc<dyn UploadStorage>,
        resolver: Arc<CycleResolver>,
    ) -> Self {
        Self {
            accounts,
            repository,
            storage,
            resolver,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitPlanningCommand,
    ) -> Result<SubmitPlanningResult, PlanningError> {
        if cmd.user.role != Role::Maestro {
            return Err(PlanningError::Forbidden);
        }
        let period = PeriodLabel::new(&cmd.period)?;
        if cmd.bytes.is_empty() {
            return Err(PlanningError::validation("archivo", "No file was uploaded"));
        }

        // 1. Resolve the uploading teacher
        let teacher = self
            .accounts
            .find_by_id(&cmd.user.id)
            .await?
            .ok_or(PlanningError::TeacherNotResolved)?;

        // 2. New uploads always land in the system cycle
        let cycle = self.resolver.system_cycle().await?;

        let now = Timestamp::now();
        let file = StoredFileName::derive(&cmd.file_name, &now)?;
        let document = PlanningDocument::submit(
            teacher.id(),
            cycle.name.clone(),
            period,
            file.clone(),
            cmd.comment,
            now,
        )?;

        // 3. File first, then the record
        self.storage
            .store(UploadArea::Planning, &file, &cmd.bytes)
            .await
            .map_err(DomainError::from)?;

        if let Err(e) = self.repository.save(&document).await {
            error!(error = %e, stored = %file.stored(), "Failed to record planning document");
            if let Err(cleanup) = self.storage.delete(UploadArea::Planning, &file).await {
                warn!(error = %cleanup, stored = %file.stored(), "Could not remove orphaned upload");
            }
            return Err(e.into());
        }

        info!(
            document_id = %document.id(),
            teacher_id = %teacher.id(),
            cycle = %cycle.name,
            period = %document.period(),
            "Planning document submitted"
        );

        Ok(SubmitPlanningResult {
            public_path: UploadArea::Planning.public_path(&file),
            document,
            cycle,
        })
    }
}
