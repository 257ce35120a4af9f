//! Mapping from sqlx errors to domain errors.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Maps a driver error. Unique violations become `AlreadyExists` so callers
/// can report double submissions softly.
pub(crate) fn map_db_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            return DomainError::new(ErrorCode::AlreadyExists, format!("{}: already exists", context))
                .with_detail("constraint", constraint);
        }
    }
    DomainError::database(context, err)
}

/// True for a foreign-key violation (row references a missing parent).
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

/// A stored value failed domain validation on the way out.
pub(crate) fn corrupt_row(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value in database: {}", column, err),
    )
}
