//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, roles and error types that form the
//! vocabulary of the school administration domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod stored_file;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AccountId, AttendanceRecordId, CycleId, GroupId, HistoryEntryId, PlanningDocumentId,
    StudentDocumentId, StudentId,
};
pub use state_machine::StateMachine;
pub use stored_file::{StoredFileName, MAX_ORIGINAL_NAME_LENGTH};
pub use timestamp::Timestamp;
