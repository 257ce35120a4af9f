//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCycleRepository` - Academic cycles, atomic activation
//! - `PostgresPlanningRepository` / `PostgresPlanningReader` - Planning documents
//! - `PostgresAccountRepository` - Staff accounts
//! - `PostgresAttendanceRepository` - Justification upsert, report, statistics
//! - `PostgresGroupRepository` / `PostgresStudentRepository` - School records

mod account_repository;
mod attendance_repository;
mod cycle_repository;
mod errors;
mod group_repository;
mod planning_repository;
mod student_repository;

pub use account_repository::PostgresAccountRepository;
pub use attendance_repository::PostgresAttendanceRepository;
pub use cycle_repository::PostgresCycleRepository;
pub use group_repository::PostgresGroupRepository;
pub use planning_repository::{PostgresPlanningReader, PostgresPlanningRepository};
pub use student_repository::PostgresStudentRepository;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
