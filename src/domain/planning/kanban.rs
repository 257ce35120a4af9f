//! Kanban partition of planning documents for one cycle and period.
//!
//! Three columns:
//!
//! - **pending**: teachers with no document at all for the pair
//! - **in review**: documents still `EN_REVISION`
//! - **approved**: documents `APROBADO`
//!
//! Columns are computed per document, not per teacher, so a teacher who
//! uploaded twice can show up in both document columns. A teacher appears in
//! `pending` if and only if they have nothing in either document column.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::academic_cycle::CycleName;
use crate::domain::foundation::{AccountId, PlanningDocumentId, Timestamp};

use super::{PeriodLabel, PlanningDocument, ReviewStatus};

/// Minimal teacher reference used in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherRef {
    pub id: AccountId,
    pub full_name: String,
}

/// A document placed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanCard {
    pub document_id: PlanningDocumentId,
    pub teacher_id: AccountId,
    pub teacher_name: Option<String>,
    pub file_name: String,
    pub stored_file: String,
    pub comment: String,
    pub feedback: Option<String>,
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanBoard {
    pub cycle: CycleName,
    pub period: PeriodLabel,
    pub pending: Vec<TeacherRef>,
    pub in_review: Vec<KanbanCard>,
    pub approved: Vec<KanbanCard>,
}

impl KanbanBoard {
    /// Builds the board from the roster of teachers and the documents of the
    /// pair. Documents outside `(cycle, period)` are ignored.
    ///
    /// Document columns are ordered newest first; `pending` keeps roster order.
    pub fn partition(
        cycle: CycleName,
        period: PeriodLabel,
        teachers: &[TeacherRef],
        documents: Vec<PlanningDocument>,
    ) -> Self {
        let names: HashMap<AccountId, &str> = teachers
            .iter()
            .map(|t| (t.id, t.full_name.as_str()))
            .collect();

        let mut submitted: HashSet<AccountId> = HashSet::new();
        let mut in_review = Vec::new();
        let mut approved = Vec::new();

        for doc in documents.into_iter().filter(|d| d.belongs_to(&cycle, &period)) {
            submitted.insert(doc.teacher_id());
            let card = KanbanCard {
                document_id: doc.id(),
                teacher_id: doc.teacher_id(),
                teacher_name: names.get(&doc.teacher_id()).map(|n| n.to_string()),
                file_name: doc.file().original().to_string(),
                stored_file: doc.file().stored().to_string(),
                comment: doc.comment().to_string(),
                feedback: doc.feedback().map(str::to_string),
                uploaded_at: *doc.uploaded_at(),
            };
            match doc.status() {
                ReviewStatus::EnRevision => in_review.push(card),
                ReviewStatus::Aprobado => approved.push(card),
            }
        }

        in_review.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        approved.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));

        let pending = teachers
            .iter()
            .filter(|t| !submitted.contains(&t.id))
            .cloned()
            .collect();

        Self {
            cycle,
            period,
            pending,
            in_review,
            approved,
        }
    }

    pub fn is_pending(&self, teacher: AccountId) -> bool {
        self.pending.iter().any(|t| t.id == teacher)
    }

    pub fn in_review_for(&self, teacher: AccountId) -> usize {
        self.in_review.iter().filter(|c| c.teacher_id == teacher).count()
    }

    pub fn approved_for(&self, teacher: AccountId) -> usize {
        self.approved.iter().filter(|c| c.teacher_id == teacher).count()
    }
}
