//! Student documents and the procedure history.

use serde::Serialize;

use crate::domain::foundation::{
    HistoryEntryId, StoredFileName, StudentDocumentId, StudentId, Timestamp, ValidationError,
};

/// Maximum length of a history description.
pub const MAX_HISTORY_DESCRIPTION_LENGTH: usize = 500;

/// A file kept on a student's record (birth certificate, CURP copy...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDocument {
    id: StudentDocumentId,
    student_id: StudentId,
    file: StoredFileName,
    uploaded_at: Timestamp,
}

impl StudentDocument {
    pub fn new(student_id: StudentId, file: StoredFileName, uploaded_at: Timestamp) -> Self {
        Self {
            id: StudentDocumentId::new(),
            student_id,
            file,
            uploaded_at,
        }
    }

    pub fn reconstitute(
        id: StudentDocumentId,
        student_id: StudentId,
        file: StoredFileName,
        uploaded_at: Timestamp,
    ) -> Self {
        Self {
            id,
            student_id,
            file,
            uploaded_at,
        }
    }

    pub fn id(&self) -> StudentDocumentId {
        self.id
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn file(&self) -> &StoredFileName {
        &self.file
    }

    pub fn uploaded_at(&self) -> &Timestamp {
        &self.uploaded_at
    }
}

/// Append-only audit line on a student's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    id: HistoryEntryId,
    student_id: StudentId,
    description: String,
    actor: String,
    recorded_at: Timestamp,
}

impl HistoryEntry {
    pub fn record(
        student_id: StudentId,
        description: impl AsRef<str>,
        actor: impl Into<String>,
        recorded_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(ValidationError::empty_field("descripcion"));
        }
        if description.chars().count() > MAX_HISTORY_DESCRIPTION_LENGTH {
            return Err(ValidationError::invalid_format(
                "descripcion",
                format!(
                    "must be at most {} characters",
                    MAX_HISTORY_DESCRIPTION_LENGTH
                ),
            ));
        }
        Ok(Self {
            id: HistoryEntryId::new(),
            student_id,
            description: description.to_string(),
            actor: actor.into(),
            recorded_at,
        })
    }

    pub fn reconstitute(
        id: HistoryEntryId,
        student_id: StudentId,
        description: String,
        actor: String,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            id,
            student_id,
            description,
            actor,
            recorded_at,
        }
    }

    pub fn id(&self) -> HistoryEntryId {
        self.id
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn recorded_at(&self) -> &Timestamp {
        &self.recorded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_entry_requires_description() {
        assert!(HistoryEntry::record(StudentId::new(), "  ", "director", Timestamp::now()).is_err());
    }

    #[test]
    fn history_entry_keeps_actor() {
        let entry =
            HistoryEntry::record(StudentId::new(), "Alta", "director", Timestamp::now()).unwrap();
        assert_eq!(entry.actor(), "director");
        assert_eq!(entry.description(), "Alta");
    }
}
