//! In-memory upload storage for tests and local development.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::foundation::StoredFileName;
use crate::ports::{StorageError, UploadArea, UploadStorage};

#[derive(Debug, Default)]
pub struct InMemoryUploadStorage {
    files: Mutex<HashMap<(UploadArea, String), Vec<u8>>>,
    fail_writes: bool,
}

impl InMemoryUploadStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage whose writes always fail.
    pub fn failing() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub fn contains(&self, area: UploadArea, stored: &str) -> bool {
        self.lock().contains_key(&(area, stored.to_string()))
    }

    pub fn read(&self, area: UploadArea, stored: &str) -> Option<Vec<u8>> {
        self.lock().get(&(area, stored.to_string())).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(UploadArea, String), Vec<u8>>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UploadStorage for InMemoryUploadStorage {
    async fn store(
        &self,
        area: UploadArea,
        name: &StoredFileName,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io("simulated write failure".to_string()));
        }
        match self.lock().entry((area, name.stored().to_string())) {
            Entry::Occupied(_) => {
                return Err(StorageError::AlreadyExists(name.stored().to_string()));
            }
            Entry::Vacant(slot) => {
                slot.insert(bytes.to_vec());
            }
        }
        Ok(self.path(area, name))
    }

    async fn delete(&self, area: UploadArea, name: &StoredFileName) -> Result<(), StorageError> {
        self.lock().remove(&(area, name.stored().to_string()));
        Ok(())
    }

    fn path(&self, area: UploadArea, name: &StoredFileName) -> PathBuf {
        PathBuf::from(area.dir_name()).join(name.stored())
    }
}
