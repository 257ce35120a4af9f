//! GetKanbanHandler - Query handler for the Director's review board.

use std::sync::Arc;

use crate::application::handlers::academic_cycle::CycleResolver;
use crate::domain::academic_cycle::ResolvedCycle;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::planning::{KanbanBoard, PeriodLabel, PlanningError};
use crate::ports::{AccountRepository, PlanningReader};

#[derive(Debug, Clone)]
pub struct GetKanbanQuery {
    pub user: AuthenticatedUser,
    pub period: String,
}

#[derive(Debug, Clone)]
pub struct GetKanbanResult {
    pub cycle: ResolvedCycle,
    pub board: KanbanBoard,
}

/// Builds the board for the session's selected cycle and the given period.
pub struct GetKanbanHandler {
    accounts: Arc<dyn AccountRepository>,
    reader: Arc<dyn PlanningReader>,
    resolver: Arc<CycleResolver>,
}

impl GetKanbanHandler {
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

    pub async fn handle(&self, query: GetKanbanQuery) -> Result<GetKanbanResult, PlanningError> {
        let period = PeriodLabel::new(&query.period)?;
        let cycle = self.resolver.selected_cycle(&query.user).await?;

        let teachers = self.accounts.list_teachers().await?;
        let documents = self
            .reader
            .list_for_cycle_period(&cycle.name, &period)
            .await?;

        let board = KanbanBoard::partition(cycle.name.clone(), period, &teachers, documents);
        Ok(GetKanbanResult { cycle, board })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::planning::test_support::*;
    use crate::domain::foundation::{AccountId, Role, Timestamp};
    use crate::domain::planning::PlanningDocument;
    use crate::ports::PlanningRepository;

    fn director() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
    }

    fn query(user: AuthenticatedUser) -> GetKanbanQuery {
        GetKanbanQuery {
            user,
            period: "SEP-Q1".to_string(),
        }
    }

    #[tokio::test]
    async fn board_partitions_roster_for_selected_cycle() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        let beto = teacher(&db, "Beto Ruiz", "beto").await;
        let carla = teacher(&db, "Carla Díaz", "carla").await;

        stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", Timestamp::now()).await;
        let mut approved: PlanningDocument =
            stored_document(&db, beto.id(), ACTIVE_CYCLE, "SEP-Q1", Timestamp::now()).await;
        approved.approve("ok").unwrap();
        db.update_review(&approved).await.unwrap();
        stored_document(&db, carla.id(), ACTIVE_CYCLE, "SEP-Q2", Timestamp::now()).await;

        let handler = GetKanbanHandler::new(db.clone(), db.clone(), resolver(&db));
        let result = handler.handle(query(director())).await.unwrap();

        assert_eq!(result.cycle.name.as_str(), ACTIVE_CYCLE);
        assert_eq!(result.board.in_review_for(ana.id()), 1);
        assert_eq!(result.board.approved_for(beto.id()), 1);
        assert!(result.board.is_pending(carla.id()));
        assert_eq!(result.board.pending.len(), 1);
    }

    #[tokio::test]
    async fn selected_cycle_scopes_the_board() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        stored_document(&db, ana.id(), "2023-2024", "SEP-Q1", Timestamp::now()).await;

        let handler = GetKanbanHandler::new(db.clone(), db.clone(), resolver(&db));
        let current = handler.handle(query(director())).await.unwrap();
        let past = handler
            .handle(query(director().with_selected_cycle("2023-2024")))
            .await
            .unwrap();

        assert!(current.board.is_pending(ana.id()));
        assert_eq!(past.board.in_review_for(ana.id()), 1);
    }

    #[tokio::test]
    async fn missing_period_is_rejected() {
        let db = database_with_active_cycle().await;
        let handler = GetKanbanHandler::new(db.clone(), db.clone(), resolver(&db));
        let mut q = query(director());
        q.period = String::new();

        let err = handler.handle(q).await.unwrap_err();
        assert!(matches!(err, PlanningError::ValidationFailed { .. }));
    }
}
