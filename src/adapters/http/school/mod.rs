//! HTTP adapter for groups, students and student records.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::*;
pub use routes::school_routes;
