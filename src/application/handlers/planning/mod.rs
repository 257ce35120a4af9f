//! Planning document handlers.
//!
//! ## Commands
//! - Submit a planning document (file + record, one logical operation)
//! - Approve a document with feedback
//!
//! ## Queries
//! - Kanban board for a cycle and period
//! - A teacher's own documents
//! - Teacher folders, one teacher's documents, Director overview

mod approve_planning;
mod director_overview;
mod get_kanban;
mod list_teacher_plannings;
mod submit_planning;
mod teacher_folders;

// Commands
pub use approve_planning::{ApprovePlanningCommand, ApprovePlanningHandler};
pub use submit_planning::{SubmitPlanningCommand, SubmitPlanningHandler, SubmitPlanningResult};

// Queries
pub use director_overview::{DirectorOverview, DirectorOverviewHandler};
pub use get_kanban::{GetKanbanHandler, GetKanbanQuery, GetKanbanResult};
pub use list_teacher_plannings::{
    ListTeacherPlanningsHandler, ListTeacherPlanningsQuery, TeacherPlannings,
};
pub use teacher_folders::{
    TeacherDetail, TeacherDetailHandler, TeacherDetailQuery, TeacherFoldersHandler,
    TeacherFoldersResult,
};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::adapters::memory::InMemoryDatabase;
    use crate::application::handlers::academic_cycle::CycleResolver;
    use crate::domain::academic_cycle::{AcademicCycle, CycleName};
    use crate::domain::account::{Account, Password, Username};
    use crate::domain::foundation::{AccountId, StoredFileName, Timestamp};
    use crate::domain::planning::{PeriodLabel, PlanningDocument};
    use crate::ports::{AccountRepository, CycleRepository, PlanningRepository};

    pub const ACTIVE_CYCLE: &str = "2024-2025";

    pub async fn database_with_active_cycle() -> Arc<InMemoryDatabase> {
        let db = Arc::new(InMemoryDatabase::new());
        let cycle = AcademicCycle::new(CycleName::new(ACTIVE_CYCLE).unwrap());
        CycleRepository::save(db.as_ref(), &cycle).await.unwrap();
        db.activate(&cycle.id()).await.unwrap();
        db
    }

    pub fn resolver(db: &Arc<InMemoryDatabase>) -> Arc<CycleResolver> {
        Arc::new(CycleResolver::new(
            db.clone(),
            CycleName::new("2000-2001").unwrap(),
        ))
    }

    pub async fn teacher(db: &InMemoryDatabase, name: &str, username: &str) -> Account {
        let account = Account::new_teacher(
            name,
            Username::new(username).unwrap(),
            Password::new("temporal").unwrap(),
        )
        .unwrap();
        AccountRepository::save(db, &account).await.unwrap();
        account
    }

    pub async fn stored_document(
        db: &InMemoryDatabase,
        teacher: AccountId,
        cycle: &str,
        period: &str,
        uploaded_at: Timestamp,
    ) -> PlanningDocument {
        let document = PlanningDocument::submit(
            teacher,
            CycleName::new(cycle).unwrap(),
            PeriodLabel::new(period).unwrap(),
            StoredFileName::derive("plan.pdf", &uploaded_at).unwrap(),
            "",
            uploaded_at,
        )
        .unwrap();
        PlanningRepository::save(db, &document).await.unwrap();
        document
    }
}
