//! ApprovePlanningHandler - Command handler for the Director's feedback action.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::PlanningDocumentId;
use crate::domain::planning::{PlanningDocument, PlanningError};
use crate::ports::PlanningRepository;

#[derive(Debug, Clone)]
pub struct ApprovePlanningCommand {
    pub document_id: PlanningDocumentId,
    pub feedback: String,
}

/// Approves a document and stores the feedback.
///
/// Approving an already approved document overwrites the feedback.
pub struct ApprovePlanningHandler {
    repository: Arc<dyn PlanningRepository>,
}

impl ApprovePlanningHandler {
    pub fn new(repository: Arc<dyn PlanningRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ApprovePlanningCommand,
    ) -> Result<PlanningDocument, PlanningError> {
        let mut document = self
            .repository
            .find_by_id(&cmd.document_id)
            .await?
            .ok_or(PlanningError::NotFound(cmd.document_id))?;

        document.approve(cmd.feedback)?;
        self.repository.update_review(&document).await?;

        info!(document_id = %document.id(), "Planning document approved");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::planning::test_support::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::planning::{ReviewStatus, MAX_FEEDBACK_LENGTH};

    #[tokio::test]
    async fn approval_sets_status_and_feedback() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        let doc = stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", Timestamp::now()).await;
        let handler = ApprovePlanningHandler::new(db.clone());

        handler
            .handle(ApprovePlanningCommand {
                document_id: doc.id(),
                feedback: "Muy completa".to_string(),
            })
            .await
            .unwrap();

        let stored = PlanningRepository::find_by_id(db.as_ref(), &doc.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), ReviewStatus::Aprobado);
        assert_eq!(stored.feedback(), Some("Muy completa"));
    }

    #[tokio::test]
    async fn second_approval_overwrites_feedback() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        let doc = stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", Timestamp::now()).await;
        let handler = ApprovePlanningHandler::new(db.clone());

        for feedback in ["primera", "segunda"] {
            handler
                .handle(ApprovePlanningCommand {
                    document_id: doc.id(),
                    feedback: feedback.to_string(),
                })
                .await
                .unwrap();
        }

        let stored = PlanningRepository::find_by_id(db.as_ref(), &doc.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), ReviewStatus::Aprobado);
        assert_eq!(stored.feedback(), Some("segunda"));
    }

    #[tokio::test]
    async fn unknown_document_is_not_found() {
        let db = database_with_active_cycle().await;
        let handler = ApprovePlanningHandler::new(db);
        let id = PlanningDocumentId::new();

        let err = handler
            .handle(ApprovePlanningCommand {
                document_id: id,
                feedback: "ok".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, PlanningError::NotFound(id));
    }

    #[tokio::test]
    async fn overlong_feedback_leaves_document_untouched() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        let doc = stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", Timestamp::now()).await;
        let handler = ApprovePlanningHandler::new(db.clone());

        let err = handler
            .handle(ApprovePlanningCommand {
                document_id: doc.id(),
                feedback: "x".repeat(MAX_FEEDBACK_LENGTH + 1),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PlanningError::ValidationFailed { .. }));
        let stored = PlanningRepository::find_by_id(db.as_ref(), &doc.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), ReviewStatus::EnRevision);
    }
}
