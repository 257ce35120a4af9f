//! Planning-document domain module.
//!
//! Teachers upload lesson plans per cycle and period; the Director reviews
//! them on a Kanban board and approves them with feedback.

mod document;
mod errors;
mod kanban;
mod period;
mod status;

pub use document::{PlanningDocument, MAX_COMMENT_LENGTH, MAX_FEEDBACK_LENGTH};
pub use errors::PlanningError;
pub use kanban::{KanbanBoard, KanbanCard, TeacherRef};
pub use period::{PeriodLabel, MAX_PERIOD_LENGTH};
pub use status::ReviewStatus;
