//! Planning document repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanningDocumentId};
use crate::domain::planning::PlanningDocument;

#[async_trait]
pub trait PlanningRepository: Send + Sync {
    /// Insert a freshly submitted document.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, document: &PlanningDocument) -> Result<(), DomainError>;

    /// Persist the review status and feedback of an existing document.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if the document doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_review(&self, document: &PlanningDocument) -> Result<(), DomainError>;

    /// Find a document by its ID.
    async fn find_by_id(
        &self,
        id: &PlanningDocumentId,
    ) -> Result<Option<PlanningDocument>, DomainError>;
}
