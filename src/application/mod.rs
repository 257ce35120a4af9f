//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (uploads, approvals, activations) and queries (boards, reports)
//! live side by side per area.

pub mod handlers;

pub use handlers::academic_cycle::CycleResolver;
