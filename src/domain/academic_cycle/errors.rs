//! Cycle-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by cycle management and resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// No cycle with that id or name.
    NotFound(String),
    /// A cycle with the same name already exists.
    AlreadyExists(String),
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// The caller may not perform this action.
    Forbidden,
    /// Store failure.
    Infrastructure(String),
}

impl CycleError {
    pub fn not_found(what: impl Into<String>) -> Self {
        CycleError::NotFound(what.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CycleError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CycleError::NotFound(_) => ErrorCode::CycleNotFound,
            CycleError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            CycleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CycleError::Forbidden => ErrorCode::Forbidden,
            CycleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CycleError::NotFound(what) => format!("Cycle not found: {}", what),
            CycleError::AlreadyExists(name) => format!("Cycle '{}' already exists", name),
            CycleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CycleError::Forbidden => "Only the Director can manage cycles".to_string(),
            CycleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CycleError {}

impl From<ValidationError> for CycleError {
    fn from(err: ValidationError) -> Self {
        CycleError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CycleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CycleNotFound => CycleError::NotFound(err.message),
            ErrorCode::AlreadyExists => CycleError::AlreadyExists(err.message),
            ErrorCode::Forbidden => CycleError::Forbidden,
            ErrorCode::ValidationFailed => CycleError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => CycleError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_maps_to_not_found() {
        let err: CycleError = DomainError::new(ErrorCode::CycleNotFound, "abc").into();
        assert_eq!(err, CycleError::NotFound("abc".to_string()));
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: CycleError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert!(matches!(err, CycleError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
