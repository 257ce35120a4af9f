//! Director's per-teacher views: the folder list and one teacher's documents.

use std::sync::Arc;

use crate::application::handlers::academic_cycle::CycleResolver;
use crate::domain::academic_cycle::ResolvedCycle;
use crate::domain::foundation::{AccountId, AuthenticatedUser};
use crate::domain::planning::{PlanningDocument, PlanningError, TeacherRef};
use crate::ports::{AccountRepository, PlanningReader, TeacherFolder};

/// Name shown when the requested account no longer exists.
const UNKNOWN_TEACHER_NAME: &str = "Maestro";

/// Upper bound for a single teacher's listing.
const TEACHER_DETAIL_LIMIT: usize = 10_000;

#[derive(Debug, Clone)]
pub struct TeacherFoldersResult {
    pub cycle: ResolvedCycle,
    pub folders: Vec<TeacherFolder>,
}

/// Every teacher with their document count in the selected cycle.
pub struct TeacherFoldersHandler {
    reader: Arc<dyn PlanningReader>,
    resolver: Arc<CycleResolver>,
}

impl TeacherFoldersHandler {
    pub fn new(reader: Arc<dyn PlanningReader>, resolver: Arc<CycleResolver>) -> Self {
        Self { reader, resolver }
    }

    pub async fn handle(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<TeacherFoldersResult, PlanningError> {
        let cycle = self.resolver.selected_cycle(user).await?;
        let folders = self.reader.teacher_folders(&cycle.name).await?;
        Ok(TeacherFoldersResult { cycle, folders })
    }
}

#[derive(Debug, Clone)]
pub struct TeacherDetailQuery {
    pub user: AuthenticatedUser,
    pub teacher_id: AccountId,
}

#[derive(Debug, Clone)]
pub struct TeacherDetail {
    pub cycle: ResolvedCycle,
    pub teacher: TeacherRef,
    pub documents: Vec<PlanningDocument>,
}

/// One teacher's documents in the selected cycle, newest first.
pub struct TeacherDetailHandler {
    accounts: Arc<dyn AccountRepository>,
    reader: Arc<dyn PlanningReader>,
    resolver: Arc<CycleResolver>,
}

impl TeacherDetailHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        reader: Arc<dyn PlanningReader>,
        resolver: Arc<CycleResolver>,
    ) -> Self {
        Self {
            accounts,
            reader,
            resolver,
        }
    }

    pub async fn handle(&self, query: TeacherDetailQuery) -> Result<TeacherDetail, PlanningError> {
        let cycle = self.resolver.selected_cycle(&query.user).await?;

        let full_name = self
            .accounts
            .find_by_id(&query.teacher_id)
            .await?
            .map(|a| a.full_name().to_string())
            .unwrap_or_else(|| UNKNOWN_TEACHER_NAME.to_string());

        let documents = self
            .reader
            .list_for_teacher(&query.teacher_id, &cycle.name, None, TEACHER_DETAIL_LIMIT)
            .await?;

        Ok(TeacherDetail {
            cycle,
            teacher: TeacherRef {
                id: query.teacher_id,
                full_name,
            },
            documents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::planning::test_support::*;
    use crate::domain::foundation::{Role, Timestamp};

    fn director() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
    }

    #[tokio::test]
    async fn folders_count_documents_of_selected_cycle() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        let beto = teacher(&db, "Beto Ruiz", "beto").await;
        stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", Timestamp::now()).await;
        stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q2", Timestamp::now()).await;
        stored_document(&db, beto.id(), "2023-2024", "SEP-Q1", Timestamp::now()).await;

        let handler = TeacherFoldersHandler::new(db.clone(), resolver(&db));
        let result = handler.handle(&director()).await.unwrap();

        let counts: Vec<(String, i64)> = result
            .folders
            .iter()
            .map(|f| (f.teacher.full_name.clone(), f.document_count))
            .collect();
        assert_eq!(
            counts,
            vec![("Ana López".to_string(), 2), ("Beto Ruiz".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn detail_lists_teacher_documents() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", Timestamp::now()).await;

        let handler = TeacherDetailHandler::new(db.clone(), db.clone(), resolver(&db));
        let detail = handler
            .handle(TeacherDetailQuery {
                user: director(),
                teacher_id: ana.id(),
            })
            .await
            .unwrap();

        assert_eq!(detail.teacher.full_name, "Ana López");
        assert_eq!(detail.documents.len(), 1);
    }

    #[tokio::test]
    async fn detail_of_unknown_teacher_is_empty_placeholder() {
        let db = database_with_active_cycle().await;
        let handler = TeacherDetailHandler::new(db.clone(), db.clone(), resolver(&db));

        let detail = handler
            .handle(TeacherDetailQuery {
                user: director(),
                teacher_id: AccountId::new(),
            })
            .await
            .unwrap();

        assert_eq!(detail.teacher.full_name, UNKNOWN_TEACHER_NAME);
        assert!(detail.documents.is_empty());
    }
}
