//! Collision-resistant names for uploaded files.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Timestamp, ValidationError};

/// Maximum length of the original file name we keep.
pub const MAX_ORIGINAL_NAME_LENGTH: usize = 200;

/// Hex characters of random suffix between the timestamp and the name.
const SUFFIX_LENGTH: usize = 12;

/// Name under which an upload is stored:
/// `<YYYYmmddHHMMSS>_<random hex>_<original>`.
///
/// Two uploads of the same file name in the same second still get distinct
/// names. The original name is reduced to its final path component so a client
/// cannot address directories outside the upload root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredFileName {
    original: String,
    stored: String,
}

impl StoredFileName {
    /// Derives the stored name for `original` uploaded at `at`.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if nothing usable remains of the original name
    /// - `InvalidFormat` if it is longer than [`MAX_ORIGINAL_NAME_LENGTH`]
    pub fn derive(original: &str, at: &Timestamp) -> Result<Self, ValidationError> {
        let original = sanitize(original)?;
        let suffix = Uuid::new_v4().simple().to_string();
        let stored = format!(
            "{}_{}_{}",
            at.compact_local(),
            &suffix[..SUFFIX_LENGTH],
            original
        );
        Ok(Self { original, stored })
    }

    /// Reconstitute from persisted columns.
    pub fn reconstitute(original: impl Into<String>, stored: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            stored: stored.into(),
        }
    }

    /// File name as the client sent it (path stripped).
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Name on disk, relative to the upload root.
    pub fn stored(&self) -> &str {
        &self.stored
    }
}

impl fmt::Display for StoredFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stored)
    }
}

fn sanitize(raw: &str) -> Result<String, ValidationError> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(ValidationError::empty_field("archivo"));
    }
    if cleaned.chars().count() > MAX_ORIGINAL_NAME_LENGTH {
        return Err(ValidationError::invalid_format(
            "archivo",
            format!("file name longer than {} characters", MAX_ORIGINAL_NAME_LENGTH),
        ));
    }
    Ok(cleaned)
}
