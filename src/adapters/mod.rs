//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Signed session tokens (JWT) and a test double
//! - `http` - Axum router, extractors and JSON handlers
//! - `memory` - In-memory persistence for tests and demos
//! - `postgres` - PostgreSQL persistence via sqlx
//! - `storage` - Uploaded file storage (local disk, in-memory)

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
