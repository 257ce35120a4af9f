//! PostgreSQL implementation of AccountRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{Account, Password, Username};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Role};
use crate::domain::planning::TeacherRef;
use crate::ports::AccountRepository;

use super::errors::{corrupt_row, map_db_error};

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    role: String,
    full_name: String,
    password: String,
    requires_password_change: bool,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|e| corrupt_row("role", e))?;
        Ok(Account::reconstitute(
            AccountId::from_uuid(row.id),
            Username::new(&row.username).map_err(|e| corrupt_row("username", e))?,
            role,
            row.full_name,
            Password::reconstitute(row.password),
            row.requires_password_change,
        ))
    }
}

const SELECT_ACCOUNT: &str = r#"
    SELECT id, username, role, full_name, password, requires_password_change
    FROM accounts
"#;

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, username, role, full_name, password, requires_password_change
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.username().as_str())
        .bind(account.role().as_str())
        .bind(account.full_name())
        .bind(account.password().expose())
        .bind(account.requires_password_change())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to save account", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ACCOUNT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to fetch account", e))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE username = $1", SELECT_ACCOUNT))
                .bind(username.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error("Failed to fetch account by username", e))?;

        row.map(Account::try_from).transpose()
    }

    async fn update_password(&self, account: &Account) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET password = $2, requires_password_change = $3
            WHERE id = $1
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.password().expose())
        .bind(account.requires_password_change())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AccountNotFound,
                format!("Account not found: {}", account.id()),
            ));
        }

        Ok(())
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherRef>, DomainError> {
        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            "SELECT id, full_name FROM accounts WHERE role = 'MAESTRO' ORDER BY full_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list teachers", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, full_name)| TeacherRef {
                id: AccountId::from_uuid(id),
                full_name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            username: "ana".to_string(),
            role: role.to_string(),
            full_name: "Ana López".to_string(),
            password: "temporal".to_string(),
            requires_password_change: true,
        }
    }

    #[test]
    fn row_converts_to_account() {
        let account = Account::try_from(row("MAESTRO")).unwrap();
        assert_eq!(account.role(), Role::Maestro);
        assert!(account.verify_password("temporal"));
        assert!(account.requires_password_change());
    }

    #[test]
    fn unknown_role_is_corrupt() {
        let err = Account::try_from(row("ADMIN")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
