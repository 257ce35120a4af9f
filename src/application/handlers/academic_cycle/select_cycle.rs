//! SelectCycleHandler - stores the Director's browsing cycle in the session.

use std::sync::Arc;

use tracing::info;

use crate::domain::academic_cycle::{CycleError, CycleName};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{CycleRepository, SessionIssuer};

#[derive(Debug, Clone)]
pub struct SelectCycleCommand {
    pub user: AuthenticatedUser,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct SelectCycleResult {
    pub user: AuthenticatedUser,
    /// Re-issued session token carrying the selection.
    pub token: String,
}

/// Selecting a cycle does not change which cycle is active.
pub struct SelectCycleHandler {
    repository: Arc<dyn CycleRepository>,
    issuer: Arc<dyn SessionIssuer>,
}

impl SelectCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, issuer: Arc<dyn SessionIssuer>) -> Self {
        Self { repository, issuer }
    }

    pub async fn handle(&self, cmd: SelectCycleCommand) -> Result<SelectCycleResult, CycleError> {
        if !cmd.user.is_director() {
            return Err(CycleError::Forbidden);
        }

        let name = CycleName::new(&cmd.name)?;
        let cycle = self
            .repository
            .find_by_name(&name)
            .await?
            .ok_or_else(|| CycleError::not_found(name.to_string()))?;

        let user = cmd.user.with_selected_cycle(cycle.name().as_str());
        let token = self
            .issuer
            .issue(&user)
            .await
            .map_err(|e| CycleError::infrastructure(e.to_string()))?;

        info!(user_id = %user.id, cycle = %cycle.name(), "Director switched browsing cycle");
        Ok(SelectCycleResult { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::academic_cycle::AcademicCycle;
    use crate::domain::foundation::{AccountId, AuthError, Role};
    use crate::ports::SessionValidator;

    async fn setup(
        sessions: MockSessionValidator,
    ) -> (SelectCycleHandler, Arc<MockSessionValidator>) {
        let db = Arc::new(InMemoryDatabase::new());
        let cycle = AcademicCycle::new(CycleName::new("2023-2024").unwrap());
        CycleRepository::save(db.as_ref(), &cycle).await.unwrap();
        let sessions = Arc::new(sessions);
        (SelectCycleHandler::new(db, sessions.clone()), sessions)
    }

    fn director() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
    }

    #[tokio::test]
    async fn reissued_token_carries_selection() {
        let (handler, sessions) = setup(MockSessionValidator::new()).await;

        let result = handler
            .handle(SelectCycleCommand {
                user: director(),
                name: "2023-2024".to_string(),
            })
            .await
            .unwrap();

        let user = sessions.validate(&result.token).await.unwrap();
        assert_eq!(user.selected_cycle.as_deref(), Some("2023-2024"));
    }

    #[tokio::test]
    async fn unknown_cycle_is_rejected() {
        let (handler, sessions) = setup(MockSessionValidator::new()).await;

        let err = handler
            .handle(SelectCycleCommand {
                user: director(),
                name: "1999-2000".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CycleError::NotFound(_)));
        assert_eq!(sessions.token_count(), 0);
    }

    #[tokio::test]
    async fn teachers_cannot_select() {
        let (handler, _) = setup(MockSessionValidator::new()).await;
        let teacher = AuthenticatedUser::new(AccountId::new(), "maestra", Role::Maestro);

        let err = handler
            .handle(SelectCycleCommand {
                user: teacher,
                name: "2023-2024".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CycleError::Forbidden);
    }

    #[tokio::test]
    async fn issue_failure_is_infrastructure() {
        let (handler, _) =
            setup(MockSessionValidator::new().with_error(AuthError::IssueFailed("key".into()))).await;

        let err = handler
            .handle(SelectCycleCommand {
                user: director(),
                name: "2023-2024".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CycleError::Infrastructure(_)));
    }
}
