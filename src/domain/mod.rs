//! Domain layer: entities, value objects and business rules.

pub mod academic_cycle;
pub mod account;
pub mod attendance;
pub mod foundation;
pub mod planning;
pub mod school;
