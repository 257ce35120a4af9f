//! Errors for groups, students and student records.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchoolError {
    GroupNotFound(String),
    StudentNotFound(String),
    /// Duplicate natural key (student CURP).
    AlreadyExists(String),
    ValidationFailed { field: String, message: String },
    Forbidden,
    /// Writing or removing an uploaded file failed.
    Storage(String),
    Infrastructure(String),
}

impl SchoolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SchoolError::GroupNotFound(_) => ErrorCode::GroupNotFound,
            SchoolError::StudentNotFound(_) => ErrorCode::StudentNotFound,
            SchoolError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            SchoolError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SchoolError::Forbidden => ErrorCode::Forbidden,
            SchoolError::Storage(_) => ErrorCode::StorageError,
            SchoolError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SchoolError::GroupNotFound(id) => format!("Group not found: {}", id),
            SchoolError::StudentNotFound(id) => format!("Student not found: {}", id),
            SchoolError::AlreadyExists(what) => format!("Ya existe: {}", what),
            SchoolError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SchoolError::Forbidden => "Permission denied".to_string(),
            SchoolError::Storage(msg) => format!("Storage error: {}", msg),
            SchoolError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SchoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SchoolError {}

impl From<ValidationError> for SchoolError {
    fn from(err: ValidationError) -> Self {
        SchoolError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SchoolError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::GroupNotFound => SchoolError::GroupNotFound(err.message),
            ErrorCode::StudentNotFound => SchoolError::StudentNotFound(err.message),
            ErrorCode::AccountNotFound => SchoolError::ValidationFailed {
                field: "maestro".to_string(),
                message: err.message,
            },
            ErrorCode::AlreadyExists => SchoolError::AlreadyExists(err.message),
            ErrorCode::Forbidden => SchoolError::Forbidden,
            ErrorCode::StorageError => SchoolError::Storage(err.message),
            ErrorCode::ValidationFailed => SchoolError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => SchoolError::Infrastructure(err.to_string()),
        }
    }
}
