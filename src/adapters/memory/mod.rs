//! In-memory adapters.
//!
//! [`InMemoryDatabase`] implements every persistence port over plain vectors
//! behind one mutex, so multi-table operations are trivially atomic. It backs
//! the integration tests and the router tests.

mod database;

pub use database::InMemoryDatabase;
