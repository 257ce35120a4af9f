//! HTTP adapter - the JSON API served to the school's browser client.
//!
//! Each area has its own DTOs, handlers and routes; [`build_router`] merges
//! them behind the session middleware.

pub mod academic_cycle;
pub mod account;
pub mod attendance;
pub mod error;
pub mod middleware;
pub mod planning;
pub mod router;
pub mod school;
pub mod state;
pub mod upload;

pub use error::{ErrorResponse, NoticeResponse};
pub use router::build_router;
pub use state::{AppState, HttpSettings};
