//! Group repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GroupId};
use crate::domain::school::{Group, GroupAssignmentRow, TeacherAssignment};

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError>;

    /// Groups by grade and letter, with the assigned teacher's name.
    async fn list_assignments(&self) -> Result<Vec<GroupAssignmentRow>, DomainError>;

    /// Apply every assignment in one transaction.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound` if any group is unknown (nothing changes)
    /// - `DatabaseError` on persistence failure
    async fn save_assignments(&self, assignments: &[TeacherAssignment]) -> Result<(), DomainError>;
}
