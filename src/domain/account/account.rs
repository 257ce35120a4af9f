//! Staff account entity.

use crate::domain::foundation::{AccountId, AuthenticatedUser, Role, ValidationError};

use super::{Password, Username};

/// Maximum length of a display name.
pub const MAX_FULL_NAME_LENGTH: usize = 120;

/// A Director or teacher login.
///
/// Teacher accounts are created by the Director with
/// `requires_password_change` set; the flag clears on the first password
/// update.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    username: Username,
    role: Role,
    full_name: String,
    password: Password,
    requires_password_change: bool,
}

impl Account {
    /// Creates a teacher account with a provisional password.
    pub fn new_teacher(
        full_name: impl AsRef<str>,
        username: Username,
        password: Password,
    ) -> Result<Self, ValidationError> {
        let full_name = full_name.as_ref().trim();
        if full_name.is_empty() {
            return Err(ValidationError::empty_field("nombre"));
        }
        if full_name.chars().count() > MAX_FULL_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "nombre",
                format!("must be at most {} characters", MAX_FULL_NAME_LENGTH),
            ));
        }

        Ok(Self {
            id: AccountId::new(),
            username,
            role: Role::Maestro,
            full_name: full_name.to_string(),
            password,
            requires_password_change: true,
        })
    }

    pub fn reconstitute(
        id: AccountId,
        username: Username,
        role: Role,
        full_name: String,
        password: Password,
        requires_password_change: bool,
    ) -> Self {
        Self {
            id,
            username,
            role,
            full_name,
            password,
            requires_password_change,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn requires_password_change(&self) -> bool {
        self.requires_password_change
    }

    /// Checks a login attempt.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password.matches(candidate)
    }

    /// Replaces the password and clears the first-login flag.
    pub fn change_password(&mut self, password: Password) {
        self.password = password;
        self.requires_password_change = false;
    }

    /// Session identity for this account.
    pub fn to_authenticated_user(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.username.as_str(), self.role)
    }
}
