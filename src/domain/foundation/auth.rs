//! Authentication types for the domain layer.
//!
//! A request is bound to an [`AuthenticatedUser`] by the `SessionValidator`
//! port. The type carries only what handlers use: who the account is, which
//! role it holds and, for Directors, which academic cycle they are browsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{AccountId, ValidationError};

/// Role of a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// School director: reviews plannings, manages cycles and staff.
    Director,
    /// Teacher: uploads plannings for their groups.
    Maestro,
}

impl Role {
    /// Canonical database / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "DIRECTOR",
            Role::Maestro => "MAESTRO",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DIRECTOR" => Ok(Role::Director),
            "MAESTRO" => Ok(Role::Maestro),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Identity bound to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: AccountId,
    pub username: String,
    pub role: Role,
    /// Cycle the Director chose to browse; `None` means "the active one".
    pub selected_cycle: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: AccountId, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
            selected_cycle: None,
        }
    }

    /// Returns a copy browsing the given cycle.
    pub fn with_selected_cycle(mut self, cycle: impl Into<String>) -> Self {
        self.selected_cycle = Some(cycle.into());
        self
    }

    pub fn is_director(&self) -> bool {
        self.role == Role::Director
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token signature is valid but its lifetime is over.
    #[error("Token expired")]
    TokenExpired,

    /// The token could not be produced.
    #[error("Could not issue session: {0}")]
    IssueFailed(String),
}

impl AuthError {
    /// Returns true if this error indicates the user should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
