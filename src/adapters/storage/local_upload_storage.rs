//! Local-disk upload storage.
//!
//! Layout:
//!
//! ```text
//! {base_path}/planeaciones/{stored name}
//! {base_path}/expedientes/{stored name}
//! ```
//!
//! `base_path` is also what the router serves at `/archivos`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::StoredFileName;
use crate::ports::{StorageError, UploadArea, UploadStorage};

#[derive(Debug, Clone)]
pub struct LocalUploadStorage {
    base_path: PathBuf,
    max_bytes: usize,
}

impl LocalUploadStorage {
    pub fn new<P: AsRef<Path>>(base_path: P, max_bytes: usize) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            max_bytes,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn area_dir(&self, area: UploadArea) -> PathBuf {
        self.base_path.join(area.dir_name())
    }
}

#[async_trait]
impl UploadStorage for LocalUploadStorage {
    async fn store(
        &self,
        area: UploadArea,
        name: &StoredFileName,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        if bytes.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let dir = self.area_dir(area);
        fs::create_dir_all(&dir).await?;

        let final_path = dir.join(name.stored());
        let temp_path = dir.join(format!(".{}.tmp", name.stored()));

        // Temp file + hard link so a reader never sees a partial upload and
        // an existing file is never replaced
        if let Err(e) = fs::write(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        let linked = fs::hard_link(&temp_path, &final_path).await;
        let _ = fs::remove_file(&temp_path).await;
        match linked {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(name.stored().to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(path = %final_path.display(), size = bytes.len(), "Stored upload");
        Ok(final_path)
    }

    async fn delete(&self, area: UploadArea, name: &StoredFileName) -> Result<(), StorageError> {
        match fs::remove_file(self.path(area, name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path(&self, area: UploadArea, name: &StoredFileName) -> PathBuf {
        self.area_dir(area).join(name.stored())
    }
}
