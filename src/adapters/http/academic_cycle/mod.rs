//! HTTP adapter for academic cycle management.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::*;
pub use routes::academic_cycle_routes;
