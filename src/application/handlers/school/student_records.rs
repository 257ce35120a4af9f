//! Student record files and procedure history.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::foundation::{
    AuthenticatedUser, DomainError, StoredFileName, StudentId, Timestamp,
};
use crate::domain::school::{HistoryEntry, SchoolError, StudentDocument};
use crate::ports::{StudentRepository, UploadArea, UploadStorage};

#[derive(Debug, Clone)]
pub struct UploadStudentDocumentCommand {
    pub actor: AuthenticatedUser,
    pub student_id: StudentId,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Stores the file, then records it with a history line. A failed insert
/// removes the stored file again.
pub struct UploadStudentDocumentHandler {
    students: Arc<dyn StudentRepository>,
    storage: Arc<dyn UploadStorage>,
}

impl UploadStudentDocumentHandler {
    pub fn new(students: Arc<dyn StudentRepository>, storage: Arc<dyn UploadStorage>) -> Self {
        Self { students, storage }
    }

    pub async fn handle(
        &self,
        cmd: UploadStudentDocumentCommand,
    ) -> Result<StudentDocument, SchoolError> {
        if cmd.bytes.is_empty() {
            return Err(SchoolError::ValidationFailed {
                field: "archivo".to_string(),
                message: "No file was uploaded".to_string(),
            });
        }
        if self.students.find_by_id(&cmd.student_id).await?.is_none() {
            return Err(SchoolError::StudentNotFound(cmd.student_id.to_string()));
        }

        let now = Timestamp::now();
        let file = StoredFileName::derive(&cmd.file_name, &now)?;
        let document = StudentDocument::new(cmd.student_id, file.clone(), now);
        let entry = HistoryEntry::record(
            cmd.student_id,
            format!("Documento agregado: {}", file.original()),
            cmd.actor.username.clone(),
            now,
        )?;

        self.storage
            .store(UploadArea::StudentRecords, &file, &cmd.bytes)
            .await
            .map_err(DomainError::from)?;

        if let Err(e) = self.students.add_document(&document, &entry).await {
            error!(error = %e, stored = %file.stored(), "Failed to record student document");
            if let Err(cleanup) = self.storage.delete(UploadArea::StudentRecords, &file).await {
                warn!(error = %cleanup, stored = %file.stored(), "Could not remove orphaned upload");
            }
            return Err(e.into());
        }

        info!(student_id = %cmd.student_id, document_id = %document.id(), "Student document uploaded");
        Ok(document)
    }
}

/// A student's documents, newest first.
pub struct StudentDocumentsHandler {
    students: Arc<dyn StudentRepository>,
}

impl StudentDocumentsHandler {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    pub async fn handle(&self, student_id: StudentId) -> Result<Vec<StudentDocument>, SchoolError> {
        if self.students.find_by_id(&student_id).await?.is_none() {
            return Err(SchoolError::StudentNotFound(student_id.to_string()));
        }
        Ok(self.students.list_documents(&student_id).await?)
    }
}

/// A student's procedure history, newest first.
pub struct StudentHistoryHandler {
    students: Arc<dyn StudentRepository>,
}

impl StudentHistoryHandler {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    pub async fn handle(&self, student_id: StudentId) -> Result<Vec<HistoryEntry>, SchoolError> {
        if self.students.find_by_id(&student_id).await?.is_none() {
            return Err(SchoolError::StudentNotFound(student_id.to_string()));
        }
        Ok(self.students.list_history(&student_id).await?)
    }
}
