//! Planning-specific error types.

use crate::domain::academic_cycle::CycleError;
use crate::domain::foundation::{DomainError, ErrorCode, PlanningDocumentId, ValidationError};

/// Errors raised by the planning-document lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// Document does not exist.
    NotFound(PlanningDocumentId),
    /// The session's account could not be resolved to a teacher.
    TeacherNotResolved,
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// The caller may not perform this action.
    Forbidden,
    /// Status change not permitted.
    InvalidState(String),
    /// Writing or removing the uploaded file failed.
    Storage(String),
    /// Store failure.
    Infrastructure(String),
}

impl PlanningError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlanningError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PlanningError::NotFound(_) => ErrorCode::DocumentNotFound,
            PlanningError::TeacherNotResolved => ErrorCode::AccountNotFound,
            PlanningError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PlanningError::Forbidden => ErrorCode::Forbidden,
            PlanningError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            PlanningError::Storage(_) => ErrorCode::StorageError,
            PlanningError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PlanningError::NotFound(id) => format!("Planning document not found: {}", id),
            PlanningError::TeacherNotResolved => {
                "The signed-in account could not be resolved".to_string()
            }
            PlanningError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PlanningError::Forbidden => "Permission denied".to_string(),
            PlanningError::InvalidState(msg) => format!("Invalid state: {}", msg),
            PlanningError::Storage(msg) => format!("Storage error: {}", msg),
            PlanningError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PlanningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PlanningError {}

impl From<ValidationError> for PlanningError {
    fn from(err: ValidationError) -> Self {
        PlanningError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for PlanningError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => PlanningError::Forbidden,
            ErrorCode::AccountNotFound => PlanningError::TeacherNotResolved,
            ErrorCode::InvalidStateTransition => PlanningError::InvalidState(err.message),
            ErrorCode::ValidationFailed => PlanningError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::StorageError => PlanningError::Storage(err.message),
            _ => PlanningError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CycleError> for PlanningError {
    fn from(err: CycleError) -> Self {
        match err {
            CycleError::Forbidden => PlanningError::Forbidden,
            CycleError::ValidationFailed { field, message } => {
                PlanningError::ValidationFailed { field, message }
            }
            other => PlanningError::Infrastructure(other.message()),
        }
    }
}
