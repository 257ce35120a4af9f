//! Upload storage adapters
//!
//! - **LocalUploadStorage** - Files on local disk, written atomically
//! - **InMemoryUploadStorage** - Files in memory (testing/development)

mod in_memory_upload_storage;
mod local_upload_storage;

pub use in_memory_upload_storage::InMemoryUploadStorage;
pub use local_upload_storage::LocalUploadStorage;
