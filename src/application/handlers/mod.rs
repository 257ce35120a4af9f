//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped
//! by area. Each handler holds the ports it needs as `Arc<dyn Port>`.

pub mod academic_cycle;
pub mod account;
pub mod attendance;
pub mod planning;
pub mod school;
