//! School domain module.
//!
//! Groups, teacher assignment, students, student documents and the
//! procedure history kept on each student's record.

mod errors;
mod group;
mod records;
mod student;

pub use errors::SchoolError;
pub use group::{group_label, Grade, Group, GroupAssignmentRow, TeacherAssignment};
pub use records::{HistoryEntry, StudentDocument, MAX_HISTORY_DESCRIPTION_LENGTH};
pub use student::{Curp, Student, StudentStatus, CURP_LENGTH, MAX_STUDENT_NAME_LENGTH};
