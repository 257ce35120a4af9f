//! CreateTeacherHandler - Director registers a new teacher account.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{Account, AccountError, Password, Username};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::AccountRepository;

#[derive(Clone)]
pub struct CreateTeacherCommand {
    pub actor: AuthenticatedUser,
    pub full_name: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CreateTeacherCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateTeacherCommand")
            .field("actor", &self.actor.username)
            .field("full_name", &self.full_name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// New teachers must change their password on first login.
pub struct CreateTeacherHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl CreateTeacherHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: CreateTeacherCommand) -> Result<Account, AccountError> {
        if !cmd.actor.is_director() {
            return Err(AccountError::Forbidden);
        }

        let account = Account::new_teacher(
            &cmd.full_name,
            Username::new(&cmd.username)?,
            Password::new(cmd.password)?,
        )?;

        self.accounts.save(&account).await?;

        info!(
            account_id = %account.id(),
            username = %account.username(),
            created_by = %cmd.actor.username,
            "Teacher account created"
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::foundation::{AccountId, Role};

    fn director() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
    }

    fn cmd(actor: AuthenticatedUser, username: &str) -> CreateTeacherCommand {
        CreateTeacherCommand {
            actor,
            full_name: "Ana López".to_string(),
            username: username.to_string(),
            password: "temporal".to_string(),
        }
    }

    #[tokio::test]
    async fn new_teacher_requires_password_change() {
        let db = Arc::new(InMemoryDatabase::new());
        let handler = CreateTeacherHandler::new(db.clone());

        let account = handler.handle(cmd(director(), "ana")).await.unwrap();

        assert_eq!(account.role(), Role::Maestro);
        assert!(account.requires_password_change());
        assert_eq!(db.list_teachers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_already_exists() {
        let db = Arc::new(InMemoryDatabase::new());
        let handler = CreateTeacherHandler::new(db);
        handler.handle(cmd(director(), "ana")).await.unwrap();

        let err = handler.handle(cmd(director(), "ana")).await.unwrap_err();
        assert!(matches!(err, AccountError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn teachers_cannot_create_accounts() {
        let handler = CreateTeacherHandler::new(Arc::new(InMemoryDatabase::new()));
        let teacher = AuthenticatedUser::new(AccountId::new(), "ana", Role::Maestro);

        let err = handler.handle(cmd(teacher, "beto")).await.unwrap_err();
        assert_eq!(err, AccountError::Forbidden);
    }
}
