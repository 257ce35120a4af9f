//! Upload storage port - where uploaded files land.
//!
//! Files are written under one directory per [`UploadArea`] and are served
//! back at `/archivos/<area>/<stored name>`.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, StoredFileName};

/// Directory an upload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadArea {
    Planning,
    StudentRecords,
}

impl UploadArea {
    pub fn dir_name(&self) -> &'static str {
        match self {
            UploadArea::Planning => "planeaciones",
            UploadArea::StudentRecords => "expedientes",
        }
    }

    /// Public path the static file service exposes the file at.
    pub fn public_path(&self, name: &StoredFileName) -> String {
        format!("/archivos/{}/{}", self.dir_name(), name.stored())
    }
}

#[async_trait]
pub trait UploadStorage: Send + Sync {
    /// Write the bytes atomically (no partial file on failure). An existing
    /// file under the same name is never replaced.
    ///
    /// # Errors
    ///
    /// - `TooLarge` if `bytes` exceeds the configured limit
    /// - `AlreadyExists` if a file is already stored under `name`
    /// - `Io` on filesystem failure
    async fn store(
        &self,
        area: UploadArea,
        name: &StoredFileName,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError>;

    /// Remove a stored file. Missing files are not an error.
    async fn delete(&self, area: UploadArea, name: &StoredFileName) -> Result<(), StorageError>;

    /// Where a file lives (or would live).
    fn path(&self, area: UploadArea, name: &StoredFileName) -> PathBuf;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("file of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("a file named {0} is already stored")]
    AlreadyExists(String),

    #[error("storage I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TooLarge { .. } => DomainError::validation("archivo", err.to_string()),
            StorageError::AlreadyExists(_) | StorageError::Io(_) => {
                DomainError::new(ErrorCode::StorageError, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_path_uses_area_directory() {
        let name = StoredFileName::reconstitute("plan.pdf", "20250301080000_plan.pdf");
        assert_eq!(
            UploadArea::Planning.public_path(&name),
            "/archivos/planeaciones/20250301080000_plan.pdf"
        );
    }

    #[test]
    fn too_large_maps_to_validation() {
        let err: DomainError = StorageError::TooLarge { size: 10, limit: 5 }.into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn name_clash_is_a_storage_failure_not_a_duplicate() {
        let err: DomainError = StorageError::AlreadyExists("x.pdf".to_string()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.is_duplicate());
    }

    #[test]
    fn upload_storage_is_object_safe() {
        fn _accepts_dyn(_storage: &dyn UploadStorage) {}
    }
}
