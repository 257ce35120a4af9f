//! HTTP adapter for planning documents: uploads, listings, Kanban and review.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::*;
pub use routes::planning_routes;
