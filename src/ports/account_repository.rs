//! Staff account repository port.

use async_trait::async_trait;

use crate::domain::account::{Account, Username};
use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::planning::TeacherRef;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the username is taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, account: &Account) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, DomainError>;

    /// Persist password and first-login flag.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account doesn't exist
    async fn update_password(&self, account: &Account) -> Result<(), DomainError>;

    /// All MAESTRO accounts, by name.
    async fn list_teachers(&self) -> Result<Vec<TeacherRef>, DomainError>;
}
