//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `CycleRepository` - Academic cycles and the single active flag
//! - `PlanningRepository` / `PlanningReader` - Planning documents (write / read)
//! - `AccountRepository` - Staff logins
//! - `AttendanceRepository` - Attendance justification and reports
//! - `GroupRepository` / `StudentRepository` - Groups, students and records
//!
//! ## Infrastructure Ports
//!
//! - `UploadStorage` - Uploaded file storage
//! - `SessionValidator` / `SessionIssuer` - Signed session tokens

mod account_repository;
mod attendance_repository;
mod cycle_repository;
mod group_repository;
mod planning_reader;
mod planning_repository;
mod session_validator;
mod student_repository;
mod upload_storage;

pub use account_repository::AccountRepository;
pub use attendance_repository::AttendanceRepository;
pub use cycle_repository::CycleRepository;
pub use group_repository::GroupRepository;
pub use planning_reader::{PlanningReader, RecentDocument, TeacherFolder};
pub use planning_repository::PlanningRepository;
pub use session_validator::{SessionIssuer, SessionValidator};
pub use student_repository::StudentRepository;
pub use upload_storage::{StorageError, UploadArea, UploadStorage};
