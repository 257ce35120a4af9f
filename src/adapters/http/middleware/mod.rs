//! HTTP middleware for axum.
//!
//! - `auth` - Session cookie middleware and extractors

pub mod auth;

pub use auth::{
    session_cookie, session_middleware, AuthRejection, AuthState, RequireAuth, RequireDirector,
};
