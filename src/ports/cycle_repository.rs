//! Academic cycle repository port.
//!
//! Cycles are created inactive and never deleted. The active flag is only
//! changed through [`CycleRepository::activate`], which must deactivate every
//! other cycle in the same transaction so at most one is active.

use async_trait::async_trait;

use crate::domain::academic_cycle::{AcademicCycle, CycleName};
use crate::domain::foundation::{CycleId, DomainError};

#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Insert a new cycle.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the name is taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, cycle: &AcademicCycle) -> Result<(), DomainError>;

    /// Find a cycle by its ID.
    async fn find_by_id(&self, id: &CycleId) -> Result<Option<AcademicCycle>, DomainError>;

    /// Find a cycle by its display name.
    async fn find_by_name(&self, name: &CycleName) -> Result<Option<AcademicCycle>, DomainError>;

    /// The cycle flagged active, if any.
    async fn find_active(&self) -> Result<Option<AcademicCycle>, DomainError>;

    /// All cycles, newest first.
    async fn list(&self) -> Result<Vec<AcademicCycle>, DomainError>;

    /// Make `id` the only active cycle, atomically.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if no cycle has that ID (nothing changes)
    /// - `DatabaseError` on persistence failure
    async fn activate(&self, id: &CycleId) -> Result<(), DomainError>;
}
