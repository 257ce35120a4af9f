//! Student record repository port.
//!
//! Every mutation that appends to the procedure history does so in the same
//! transaction as the change it describes.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GroupId, StudentId};
use crate::domain::school::{HistoryEntry, Student, StudentDocument};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a student together with its enrollment history line.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the CURP is taken
    async fn save(&self, student: &Student, entry: &HistoryEntry) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, DomainError>;

    /// Students of a group, by name.
    async fn list_by_group(&self, group: &GroupId) -> Result<Vec<Student>, DomainError>;

    /// Persist the new status and the history line.
    ///
    /// # Errors
    ///
    /// - `StudentNotFound` if the student doesn't exist
    async fn update_status(&self, student: &Student, entry: &HistoryEntry)
        -> Result<(), DomainError>;

    /// Insert a document and its history line.
    async fn add_document(
        &self,
        document: &StudentDocument,
        entry: &HistoryEntry,
    ) -> Result<(), DomainError>;

    /// Documents of a student, newest first.
    async fn list_documents(&self, student: &StudentId)
        -> Result<Vec<StudentDocument>, DomainError>;

    /// History of a student, newest first.
    async fn list_history(&self, student: &StudentId) -> Result<Vec<HistoryEntry>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn StudentRepository) {}
    }
}
