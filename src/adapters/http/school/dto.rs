//! HTTP DTOs for group and student endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::adapters::http::planning::TeacherRefResponse;
use crate::domain::foundation::{AccountId, GroupId};
use crate::domain::school::{
    GroupAssignmentRow, HistoryEntry, Student, StudentDocument, StudentStatus, TeacherAssignment,
};
use crate::ports::UploadArea;

/// Prefix of the per-group select fields on the assignment form.
pub const GROUP_FIELD_PREFIX: &str = "grupo_";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Deserialize)]
pub struct RegisterStudentForm {
    pub id_grupo: String,
    pub nombre: String,
    pub curp: String,
    #[serde(default)]
    pub fecha_ingreso: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct StudentStatusForm {
    pub estado: String,
}

/// Reads `grupo_<group id>=<teacher id>` pairs. Groups left unassigned
/// (empty value) are skipped; the first malformed id names the bad field.
pub fn parse_assignments(
    form: &HashMap<String, String>,
) -> Result<Vec<TeacherAssignment>, String> {
    let mut assignments = Vec::new();
    for (key, value) in form {
        let Some(group) = key.strip_prefix(GROUP_FIELD_PREFIX) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let group_id: GroupId = group.parse().map_err(|_| key.clone())?;
        let teacher_id: AccountId = value.parse().map_err(|_| key.clone())?;
        assignments.push(TeacherAssignment {
            group_id,
            teacher_id,
        });
    }
    Ok(assignments)
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAssignmentResponse {
    pub group_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
}

impl From<&GroupAssignmentRow> for GroupAssignmentResponse {
    fn from(row: &GroupAssignmentRow) -> Self {
        Self {
            group_id: row.group_id.to_string(),
            label: row.label.clone(),
            teacher_id: row.teacher_id.map(|id| id.to_string()),
            teacher_name: row.teacher_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentViewResponse {
    pub groups: Vec<GroupAssignmentResponse>,
    pub teachers: Vec<TeacherRefResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: String,
    pub group_id: String,
    pub full_name: String,
    pub curp: String,
    pub status: StudentStatus,
    pub enrolled_on: String,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            group_id: student.group_id().to_string(),
            full_name: student.full_name().to_string(),
            curp: student.curp().as_str().to_string(),
            status: student.status(),
            enrolled_on: student.enrolled_on().format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDocumentResponse {
    pub id: String,
    pub student_id: String,
    pub file_name: String,
    pub file_url: String,
    pub uploaded_at: String,
}

impl From<&StudentDocument> for StudentDocumentResponse {
    fn from(doc: &StudentDocument) -> Self {
        Self {
            id: doc.id().to_string(),
            student_id: doc.student_id().to_string(),
            file_name: doc.file().original().to_string(),
            file_url: UploadArea::StudentRecords.public_path(doc.file()),
            uploaded_at: doc.uploaded_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryResponse {
    pub id: String,
    pub description: String,
    pub actor: String,
    pub recorded_at: String,
}

impl From<&HistoryEntry> for HistoryEntryResponse {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            description: entry.description().to_string(),
            actor: entry.actor().to_string(),
            recorded_at: entry.recorded_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAssignmentsResponse {
    pub updated: usize,
}
