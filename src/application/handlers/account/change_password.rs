//! ChangePasswordHandler - replaces the provisional password.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{AccountError, PasswordChange};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::AccountRepository;

#[derive(Clone)]
pub struct ChangePasswordCommand {
    pub user: AuthenticatedUser,
    pub pass1: String,
    pub pass2: String,
}

impl std::fmt::Debug for ChangePasswordCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordCommand")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Both entries must match; success clears the change-required flag.
pub struct ChangePasswordHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl ChangePasswordHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), AccountError> {
        let change = PasswordChange::confirm(&cmd.pass1, &cmd.pass2)?;

        let mut account = self
            .accounts
            .find_by_id(&cmd.user.id)
            .await?
            .ok_or_else(|| AccountError::NotFound(cmd.user.username.clone()))?;

        account.change_password(change.into_password());
        self.accounts.update_password(&account).await?;

        info!(user_id = %account.id(), "Password changed");
        Ok(())
    }
}
