//! Account-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by login, password changes and staff management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Username unknown or password wrong. Deliberately indistinguishable.
    InvalidCredentials,
    /// Account does not exist.
    NotFound(String),
    /// Username already taken.
    AlreadyExists(String),
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// The caller may not perform this action.
    Forbidden,
    /// Could not issue a session.
    Session(String),
    /// Store failure.
    Infrastructure(String),
}

impl AccountError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::InvalidCredentials => ErrorCode::Unauthorized,
            AccountError::NotFound(_) => ErrorCode::AccountNotFound,
            AccountError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::Forbidden => ErrorCode::Forbidden,
            AccountError::Session(_) => ErrorCode::InternalError,
            AccountError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AccountError::InvalidCredentials => "Usuario o contraseña incorrectos".to_string(),
            AccountError::NotFound(what) => format!("Account not found: {}", what),
            AccountError::AlreadyExists(username) => {
                format!("El usuario '{}' ya existe", username)
            }
            AccountError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AccountError::Forbidden => "Permission denied".to_string(),
            AccountError::Session(msg) => format!("Session error: {}", msg),
            AccountError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AccountNotFound => AccountError::NotFound(err.message),
            ErrorCode::AlreadyExists => AccountError::AlreadyExists(err.message),
            ErrorCode::Forbidden => AccountError::Forbidden,
            ErrorCode::Unauthorized => AccountError::InvalidCredentials,
            ErrorCode::ValidationFailed => AccountError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}
