//! ListTeacherPlanningsHandler - a teacher's own documents.

use std::sync::Arc;

use crate::application::handlers::academic_cycle::CycleResolver;
use crate::config::MAX_RECENT_LIMIT;
use crate::domain::academic_cycle::ResolvedCycle;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::planning::{PeriodLabel, PlanningDocument, PlanningError};
use crate::ports::PlanningReader;

#[derive(Debug, Clone)]
pub struct ListTeacherPlanningsQuery {
    pub user: AuthenticatedUser,
    /// Blank or missing means "no period filter".
    pub period: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct TeacherPlannings {
    pub cycle: ResolvedCycle,
    pub period: Option<PeriodLabel>,
    pub documents: Vec<PlanningDocument>,
}

/// With a period filter every document of that period is returned;
/// otherwise only the most recent ones.
pub struct ListTeacherPlanningsHandler {
    reader: Arc<dyn PlanningReader>,
    resolver: Arc<CycleResolver>,
    default_limit: usize,
}

impl ListTeacherPlanningsHandler {
    pub fn new(
        reader: Arc<dyn PlanningReader>,
        resolver: Arc<CycleResolver>,
        default_limit: usize,
    ) -> Self {
        Self {
            reader,
            resolver,
            default_limit,
        }
    }

    pub async fn handle(
        &self,
        query: ListTeacherPlanningsQuery,
    ) -> Result<TeacherPlannings, PlanningError> {
        let period = match query.period.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => Some(PeriodLabel::new(p)?),
            _ => None,
        };
        let limit = query
            .limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_RECENT_LIMIT);

        let cycle = self.resolver.selected_cycle(&query.user).await?;
        let documents = self
            .reader
            .list_for_teacher(&query.user.id, &cycle.name, period.as_ref(), limit)
            .await?;

        Ok(TeacherPlannings {
            cycle,
            period,
            documents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::planning::test_support::*;
    use crate::domain::foundation::Timestamp;
    use chrono::{Duration, Utc};

    fn at(minutes_ago: i64) -> Timestamp {
        Timestamp::from_datetime(Utc::now() - Duration::minutes(minutes_ago))
    }

    fn query(user: AuthenticatedUser, period: Option<&str>, limit: Option<usize>) -> ListTeacherPlanningsQuery {
        ListTeacherPlanningsQuery {
            user,
            period: period.map(str::to_string),
            limit,
        }
    }

    #[tokio::test]
    async fn submitted_document_is_listed_with_filter() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        let doc = stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", at(0)).await;
        let handler = ListTeacherPlanningsHandler::new(db.clone(), resolver(&db), 10);

        let listed = handler
            .handle(query(ana.to_authenticated_user(), Some("SEP-Q1"), None))
            .await
            .unwrap();

        assert_eq!(listed.documents, vec![doc]);
    }

    #[tokio::test]
    async fn unfiltered_listing_is_newest_first_and_limited() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        for minutes in [30, 10, 20] {
            stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", at(minutes)).await;
        }
        let handler = ListTeacherPlanningsHandler::new(db.clone(), resolver(&db), 10);

        let listed = handler
            .handle(query(ana.to_authenticated_user(), None, Some(2)))
            .await
            .unwrap();

        assert_eq!(listed.documents.len(), 2);
        assert!(listed.documents[0].uploaded_at() > listed.documents[1].uploaded_at());
    }

    #[tokio::test]
    async fn period_filter_ignores_limit() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        for minutes in [1, 2, 3] {
            stored_document(&db, ana.id(), ACTIVE_CYCLE, "SEP-Q1", at(minutes)).await;
        }
        let handler = ListTeacherPlanningsHandler::new(db.clone(), resolver(&db), 1);

        let listed = handler
            .handle(query(ana.to_authenticated_user(), Some("SEP-Q1"), None))
            .await
            .unwrap();

        assert_eq!(listed.documents.len(), 3);
    }

    #[tokio::test]
    async fn other_teachers_documents_are_hidden() {
        let db = database_with_active_cycle().await;
        let ana = teacher(&db, "Ana López", "ana").await;
        let beto = teacher(&db, "Beto Ruiz", "beto").await;
        stored_document(&db, beto.id(), ACTIVE_CYCLE, "SEP-Q1", at(0)).await;
        let handler = ListTeacherPlanningsHandler::new(db.clone(), resolver(&db), 10);

        let listed = handler
            .handle(query(ana.to_authenticated_user(), Some(" "), None))
            .await
            .unwrap();

        assert!(listed.period.is_none());
        assert!(listed.documents.is_empty());
    }
}
