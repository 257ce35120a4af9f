//! HTTP adapter for login, logout, password change and teacher accounts.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::*;
pub use routes::account_routes;
