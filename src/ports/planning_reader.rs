//! Planning document reader port (read side).
//!
//! Queries behind the Kanban board, the teacher's own list and the
//! Director's folder and overview pages.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::academic_cycle::CycleName;
use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::planning::{PeriodLabel, PlanningDocument, TeacherRef};

#[async_trait]
pub trait PlanningReader: Send + Sync {
    /// All documents of one cycle and period, any teacher.
    async fn list_for_cycle_period(
        &self,
        cycle: &CycleName,
        period: &PeriodLabel,
    ) -> Result<Vec<PlanningDocument>, DomainError>;

    /// Documents of one teacher in a cycle, newest first.
    ///
    /// With `period` set, every document of that period is returned and
    /// `limit` is ignored. Otherwise at most `limit` documents.
    async fn list_for_teacher(
        &self,
        teacher: &AccountId,
        cycle: &CycleName,
        period: Option<&PeriodLabel>,
        limit: usize,
    ) -> Result<Vec<PlanningDocument>, DomainError>;

    /// Every teacher with their document count in the cycle, by name.
    async fn teacher_folders(&self, cycle: &CycleName) -> Result<Vec<TeacherFolder>, DomainError>;

    /// Most recent documents of the cycle with their teacher's name.
    async fn recent_for_cycle(
        &self,
        cycle: &CycleName,
        limit: usize,
    ) -> Result<Vec<RecentDocument>, DomainError>;
}

/// A teacher's folder on the Director's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherFolder {
    pub teacher: TeacherRef,
    pub document_count: i64,
}

/// A document joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentDocument {
    pub document: PlanningDocument,
    pub teacher_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planning_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn PlanningReader) {}
    }
}
