//! Academic cycle domain module.
//!
//! Cycles scope every dashboard and planning document. The active cycle is
//! the system default; a Director may browse another one per session.

mod cycle;
mod errors;
mod resolution;

pub use cycle::{AcademicCycle, CycleName, MAX_CYCLE_NAME_LENGTH};
pub use errors::CycleError;
pub use resolution::{CycleSource, ResolvedCycle};
