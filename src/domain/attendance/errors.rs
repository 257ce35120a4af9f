//! Attendance-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    /// The student does not exist.
    StudentNotFound(String),
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// The caller may not perform this action.
    Forbidden,
    /// Store failure.
    Infrastructure(String),
}

impl AttendanceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AttendanceError::StudentNotFound(_) => ErrorCode::StudentNotFound,
            AttendanceError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AttendanceError::Forbidden => ErrorCode::Forbidden,
            AttendanceError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AttendanceError::StudentNotFound(id) => format!("Student not found: {}", id),
            AttendanceError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AttendanceError::Forbidden => "Permission denied".to_string(),
            AttendanceError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AttendanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AttendanceError {}

impl From<ValidationError> for AttendanceError {
    fn from(err: ValidationError) -> Self {
        AttendanceError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AttendanceError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::StudentNotFound => AttendanceError::StudentNotFound(err.message),
            ErrorCode::Forbidden => AttendanceError::Forbidden,
            ErrorCode::ValidationFailed => AttendanceError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => AttendanceError::Infrastructure(err.to_string()),
        }
    }
}
