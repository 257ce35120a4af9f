//! Telesecundaria - school administration service
//!
//! Teachers upload planning documents per grading period; the Director
//! reviews them on a Kanban board scoped to an academic cycle, manages
//! cycles, staff, groups and student records, and justifies absences.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
