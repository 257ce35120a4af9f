//! LoginHandler - checks credentials and issues a session token.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::account::{AccountError, Username};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{AccountRepository, SessionIssuer};

#[derive(Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: AuthenticatedUser,
    pub token: String,
    /// The account still holds its provisional password.
    pub requires_password_change: bool,
}

/// Unknown usernames and wrong passwords fail identically.
pub struct LoginHandler {
    accounts: Arc<dyn AccountRepository>,
    issuer: Arc<dyn SessionIssuer>,
}

impl LoginHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, issuer: Arc<dyn SessionIssuer>) -> Self {
        Self { accounts, issuer }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        let username =
            Username::new(&cmd.username).map_err(|_| AccountError::InvalidCredentials)?;

        let account = match self.accounts.find_by_username(&username).await? {
            Some(account) if account.verify_password(&cmd.password) => account,
            _ => {
                warn!(username = %username, "Rejected login attempt");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let user = account.to_authenticated_user();
        let token = self
            .issuer
            .issue(&user)
            .await
            .map_err(|e| AccountError::Session(e.to_string()))?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(LoginResult {
            user,
            token,
            requires_password_change: account.requires_password_change(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::account::{Account, Password};
    use crate::domain::foundation::{AccountId, Role};
    use crate::ports::SessionValidator;

    async fn setup() -> (LoginHandler, Arc<MockSessionValidator>) {
        let db = Arc::new(InMemoryDatabase::new());
        db.insert_account(Account::reconstitute(
            AccountId::new(),
            Username::new("director").unwrap(),
            Role::Director,
            "Directora".to_string(),
            Password::reconstitute("secreta"),
            false,
        ));
        let teacher = Account::new_teacher(
            "Ana López",
            Username::new("ana").unwrap(),
            Password::new("temporal").unwrap(),
        )
        .unwrap();
        db.insert_account(teacher);
        let sessions = Arc::new(MockSessionValidator::new());
        (LoginHandler::new(db, sessions.clone()), sessions)
    }

    fn cmd(username: &str, password: &str) -> LoginCommand {
        LoginCommand {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_issue_session() {
        let (handler, sessions) = setup().await;

        let result = handler.handle(cmd("director", "secreta")).await.unwrap();

        assert_eq!(result.user.role, Role::Director);
        assert!(!result.requires_password_change);
        let validated = sessions.validate(&result.token).await.unwrap();
        assert_eq!(validated, result.user);
    }

    #[tokio::test]
    async fn provisional_password_requires_change() {
        let (handler, _) = setup().await;
        let result = handler.handle(cmd("ana", "temporal")).await.unwrap();
        assert!(result.requires_password_change);
        assert_eq!(result.user.role, Role::Maestro);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_alike() {
        let (handler, sessions) = setup().await;

        let wrong = handler.handle(cmd("director", "otra")).await.unwrap_err();
        let unknown = handler.handle(cmd("nadie", "secreta")).await.unwrap_err();
        let malformed = handler.handle(cmd("", "secreta")).await.unwrap_err();

        assert_eq!(wrong, AccountError::InvalidCredentials);
        assert_eq!(unknown, AccountError::InvalidCredentials);
        assert_eq!(malformed, AccountError::InvalidCredentials);
        assert_eq!(sessions.token_count(), 0);
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", cmd("ana", "temporal"));
        assert!(!rendered.contains("temporal"));
    }
}
