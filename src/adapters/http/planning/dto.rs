//! HTTP DTOs for planning endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::academic_cycle::CycleResponse;
use crate::domain::foundation::StoredFileName;
use crate::domain::planning::{KanbanBoard, KanbanCard, PlanningDocument, ReviewStatus, TeacherRef};
use crate::ports::{RecentDocument, TeacherFolder, UploadArea};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query for the teacher's own list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MyPlanningsQuery {
    pub periodo: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KanbanQuery {
    #[serde(default)]
    pub periodo: String,
}

#[derive(Clone, Deserialize)]
pub struct ApproveForm {
    pub id_planeacion: String,
    #[serde(default)]
    pub feedback: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

fn file_url(original: &str, stored: &str) -> String {
    UploadArea::Planning.public_path(&StoredFileName::reconstitute(original, stored))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningDocumentResponse {
    pub id: String,
    pub teacher_id: String,
    pub cycle: String,
    pub period: String,
    pub file_name: String,
    pub file_url: String,
    pub comment: String,
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub uploaded_at: String,
}

impl From<&PlanningDocument> for PlanningDocumentResponse {
    fn from(doc: &PlanningDocument) -> Self {
        Self {
            id: doc.id().to_string(),
            teacher_id: doc.teacher_id().to_string(),
            cycle: doc.cycle().to_string(),
            period: doc.period().to_string(),
            file_name: doc.file().original().to_string(),
            file_url: file_url(doc.file().original(), doc.file().stored()),
            comment: doc.comment().to_string(),
            status: doc.status(),
            feedback: doc.feedback().map(str::to_string),
            uploaded_at: doc.uploaded_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPlanningResponse {
    pub cycle: CycleResponse,
    pub document: PlanningDocumentResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherPlanningsResponse {
    pub cycle: CycleResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub documents: Vec<PlanningDocumentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentDocumentResponse {
    pub teacher_name: String,
    #[serde(flatten)]
    pub document: PlanningDocumentResponse,
}

impl From<&RecentDocument> for RecentDocumentResponse {
    fn from(recent: &RecentDocument) -> Self {
        Self {
            teacher_name: recent.teacher_name.clone(),
            document: PlanningDocumentResponse::from(&recent.document),
        }
    }
}

/// Landing page after login; its shape depends on the role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "UPPERCASE")]
pub enum DashboardResponse {
    Director {
        cycle: CycleResponse,
        recent: Vec<RecentDocumentResponse>,
    },
    Maestro {
        cycle: CycleResponse,
        documents: Vec<PlanningDocumentResponse>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRefResponse {
    pub id: String,
    pub full_name: String,
}

impl From<&TeacherRef> for TeacherRefResponse {
    fn from(teacher: &TeacherRef) -> Self {
        Self {
            id: teacher.id.to_string(),
            full_name: teacher.full_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanbanCardResponse {
    pub document_id: String,
    pub teacher_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    pub file_name: String,
    pub file_url: String,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub uploaded_at: String,
}

impl From<&KanbanCard> for KanbanCardResponse {
    fn from(card: &KanbanCard) -> Self {
        Self {
            document_id: card.document_id.to_string(),
            teacher_id: card.teacher_id.to_string(),
            teacher_name: card.teacher_name.clone(),
            file_name: card.file_name.clone(),
            file_url: file_url(&card.file_name, &card.stored_file),
            comment: card.comment.clone(),
            feedback: card.feedback.clone(),
            uploaded_at: card.uploaded_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanbanResponse {
    pub cycle: CycleResponse,
    pub period: String,
    pub pending: Vec<TeacherRefResponse>,
    pub in_review: Vec<KanbanCardResponse>,
    pub approved: Vec<KanbanCardResponse>,
}

impl KanbanResponse {
    pub fn new(cycle: CycleResponse, board: &KanbanBoard) -> Self {
        Self {
            cycle,
            period: board.period.to_string(),
            pending: board.pending.iter().map(TeacherRefResponse::from).collect(),
            in_review: board.in_review.iter().map(KanbanCardResponse::from).collect(),
            approved: board.approved.iter().map(KanbanCardResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherFolderResponse {
    pub teacher: TeacherRefResponse,
    pub document_count: i64,
}

impl From<&TeacherFolder> for TeacherFolderResponse {
    fn from(folder: &TeacherFolder) -> Self {
        Self {
            teacher: TeacherRefResponse::from(&folder.teacher),
            document_count: folder.document_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherFoldersResponse {
    pub cycle: CycleResponse,
    pub folders: Vec<TeacherFolderResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherDetailResponse {
    pub cycle: CycleResponse,
    pub teacher: TeacherRefResponse,
    pub documents: Vec<PlanningDocumentResponse>,
}
