//! Group and student handlers.
//!
//! ## Commands
//! - Save group-to-teacher assignments (one transaction)
//! - Register a student, change a student's status
//! - Upload a document to a student's record
//!
//! ## Queries
//! - Group assignment table, students of a group
//! - A student's documents and procedure history

mod group_assignment;
mod student_records;
mod students;

pub use group_assignment::{
    GroupAssignmentHandler, GroupAssignmentView, SaveAssignmentsCommand, SaveAssignmentsHandler,
};
pub use student_records::{
    StudentDocumentsHandler, StudentHistoryHandler, UploadStudentDocumentCommand,
    UploadStudentDocumentHandler,
};
pub use students::{
    ChangeStudentStatusCommand, ChangeStudentStatusHandler, ListStudentsHandler,
    RegisterStudentCommand, RegisterStudentHandler,
};
