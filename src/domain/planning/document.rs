//! Planning document aggregate.
//!
//! A planning document ("planeación") is a file a teacher uploads for one
//! grading period of one academic cycle. The Director reviews it and, when
//! satisfied, approves it with written feedback.
//!
//! # Invariants
//!
//! - belongs to exactly one teacher, one cycle and one period
//! - starts in `EnRevision`
//! - only `approve` changes the status, and only forward (or onto itself)

use serde::{Deserialize, Serialize};

use crate::domain::academic_cycle::CycleName;
use crate::domain::foundation::{
    AccountId, DomainError, PlanningDocumentId, StateMachine, StoredFileName, Timestamp,
};

use super::{PeriodLabel, ReviewStatus};

/// Maximum length of the teacher's comment.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Maximum length of the Director's feedback.
pub const MAX_FEEDBACK_LENGTH: usize = 4_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningDocument {
    id: PlanningDocumentId,
    teacher_id: AccountId,
    cycle: CycleName,
    period: PeriodLabel,
    file: StoredFileName,
    comment: String,
    status: ReviewStatus,
    feedback: Option<String>,
    uploaded_at: Timestamp,
}

impl PlanningDocument {
    /// Records a fresh upload, in review.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the comment is too long
    pub fn submit(
        teacher_id: AccountId,
        cycle: CycleName,
        period: PeriodLabel,
        file: StoredFileName,
        comment: impl Into<String>,
        uploaded_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let comment = comment.into();
        if comment.chars().count() > MAX_COMMENT_LENGTH {
            return Err(DomainError::validation(
                "comentarios",
                format!("Comment must be at most {} characters", MAX_COMMENT_LENGTH),
            ));
        }

        Ok(Self {
            id: PlanningDocumentId::new(),
            teacher_id,
            cycle,
            period,
            file,
            comment,
            status: ReviewStatus::EnRevision,
            feedback: None,
            uploaded_at,
        })
    }

    /// Reconstitute a document from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PlanningDocumentId,
        teacher_id: AccountId,
        cycle: CycleName,
        period: PeriodLabel,
        file: StoredFileName,
        comment: String,
        status: ReviewStatus,
        feedback: Option<String>,
        uploaded_at: Timestamp,
    ) -> Self {
        Self {
            id,
            teacher_id,
            cycle,
            period,
            file,
            comment,
            status,
            feedback,
            uploaded_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> PlanningDocumentId {
        self.id
    }

    pub fn teacher_id(&self) -> AccountId {
        self.teacher_id
    }

    pub fn cycle(&self) -> &CycleName {
        &self.cycle
    }

    pub fn period(&self) -> &PeriodLabel {
        &self.period
    }

    pub fn file(&self) -> &StoredFileName {
        &self.file
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn uploaded_at(&self) -> &Timestamp {
        &self.uploaded_at
    }

    /// True when this document counts for the given cycle and period.
    pub fn belongs_to(&self, cycle: &CycleName, period: &PeriodLabel) -> bool {
        &self.cycle == cycle && &self.period == period
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Approves the document, replacing any earlier feedback.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the feedback is too long
    pub fn approve(&mut self, feedback: impl Into<String>) -> Result<(), DomainError> {
        let feedback = feedback.into();
        if feedback.chars().count() > MAX_FEEDBACK_LENGTH {
            return Err(DomainError::validation(
                "feedback",
                format!("Feedback must be at most {} characters", MAX_FEEDBACK_LENGTH),
            ));
        }

        self.status = self.status.transition_to(ReviewStatus::Aprobado)?;
        self.feedback = Some(feedback);
        Ok(())
    }
}
