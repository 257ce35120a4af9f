//! HTTP adapter for attendance reports and justifications.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::*;
pub use routes::attendance_routes;
