//! Group-to-teacher assignment: the table view and the bulk save.

use std::sync::Arc;

use tracing::info;

use crate::domain::planning::TeacherRef;
use crate::domain::school::{GroupAssignmentRow, SchoolError, TeacherAssignment};
use crate::ports::{AccountRepository, GroupRepository};

#[derive(Debug, Clone)]
pub struct GroupAssignmentView {
    pub groups: Vec<GroupAssignmentRow>,
    pub teachers: Vec<TeacherRef>,
}

/// Groups with their assigned teacher, plus every teacher for the picker.
pub struct GroupAssignmentHandler {
    groups: Arc<dyn GroupRepository>,
    accounts: Arc<dyn AccountRepository>,
}

impl GroupAssignmentHandler {
    pub fn new(groups: Arc<dyn GroupRepository>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { groups, accounts }
    }

    pub async fn handle(&self) -> Result<GroupAssignmentView, SchoolError> {
        let groups = self.groups.list_assignments().await?;
        let teachers = self.accounts.list_teachers().await?;
        Ok(GroupAssignmentView { groups, teachers })
    }
}

#[derive(Debug, Clone)]
pub struct SaveAssignmentsCommand {
    pub assignments: Vec<TeacherAssignment>,
}

/// Applies every assignment in one transaction; one bad row rejects all.
pub struct SaveAssignmentsHandler {
    groups: Arc<dyn GroupRepository>,
}

impl SaveAssignmentsHandler {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn handle(&self, cmd: SaveAssignmentsCommand) -> Result<usize, SchoolError> {
        if cmd.assignments.is_empty() {
            return Ok(0);
        }
        self.groups.save_assignments(&cmd.assignments).await?;
        info!(count = cmd.assignments.len(), "Group assignments saved");
        Ok(cmd.assignments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::application::handlers::school::test_support::first_group;
    use crate::domain::account::{Account, Password, Username};
    use crate::domain::foundation::{AccountId, GroupId};

    async fn teacher(db: &InMemoryDatabase) -> Account {
        let account = Account::new_teacher(
            "Ana López",
            Username::new("ana").unwrap(),
            Password::new("temporal").unwrap(),
        )
        .unwrap();
        db.insert_account(account.clone());
        account
    }

    #[tokio::test]
    async fn saved_assignment_shows_teacher_name() {
        let db = Arc::new(InMemoryDatabase::new());
        let group = first_group(&db).await;
        let ana = teacher(&db).await;

        let saved = SaveAssignmentsHandler::new(db.clone())
            .handle(SaveAssignmentsCommand {
                assignments: vec![TeacherAssignment {
                    group_id: group.id(),
                    teacher_id: ana.id(),
                }],
            })
            .await
            .unwrap();
        let view = GroupAssignmentHandler::new(db.clone(), db.clone())
            .handle()
            .await
            .unwrap();

        assert_eq!(saved, 1);
        assert_eq!(view.groups[0].teacher_name.as_deref(), Some("Ana López"));
        assert_eq!(view.teachers.len(), 1);
    }

    #[tokio::test]
    async fn unknown_group_rejects_whole_batch() {
        let db = Arc::new(InMemoryDatabase::new());
        let group = first_group(&db).await;
        let ana = teacher(&db).await;

        let err = SaveAssignmentsHandler::new(db.clone())
            .handle(SaveAssignmentsCommand {
                assignments: vec![
                    TeacherAssignment {
                        group_id: group.id(),
                        teacher_id: ana.id(),
                    },
                    TeacherAssignment {
                        group_id: GroupId::new(),
                        teacher_id: ana.id(),
                    },
                ],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SchoolError::GroupNotFound(_)));
        let view = GroupAssignmentHandler::new(db.clone(), db.clone())
            .handle()
            .await
            .unwrap();
        assert!(view.groups[0].teacher_id.is_none());
    }

    #[tokio::test]
    async fn unknown_teacher_is_rejected() {
        let db = Arc::new(InMemoryDatabase::new());
        let group = first_group(&db).await;

        let err = SaveAssignmentsHandler::new(db)
            .handle(SaveAssignmentsCommand {
                assignments: vec![TeacherAssignment {
                    group_id: group.id(),
                    teacher_id: AccountId::new(),
                }],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SchoolError::ValidationFailed { .. }));
    }
}
