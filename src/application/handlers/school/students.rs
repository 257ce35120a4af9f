//! Students of a group: listing, registration and status changes.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, GroupId, StudentId, Timestamp};
use crate::domain::school::{Curp, HistoryEntry, SchoolError, Student, StudentStatus};
use crate::ports::{GroupRepository, StudentRepository};

/// Students of one group, by name.
pub struct ListStudentsHandler {
    groups: Arc<dyn GroupRepository>,
    students: Arc<dyn StudentRepository>,
}

impl ListStudentsHandler {
    pub fn new(groups: Arc<dyn GroupRepository>, students: Arc<dyn StudentRepository>) -> Self {
        Self { groups, students }
    }

    pub async fn handle(&self, group_id: GroupId) -> Result<Vec<Student>, SchoolError> {
        if self.groups.find_by_id(&group_id).await?.is_none() {
            return Err(SchoolError::GroupNotFound(group_id.to_string()));
        }
        Ok(self.students.list_by_group(&group_id).await?)
    }
}

#[derive(Debug, Clone)]
pub struct RegisterStudentCommand {
    pub actor: AuthenticatedUser,
    pub group_id: GroupId,
    pub full_name: String,
    pub curp: String,
    /// Defaults to today.
    pub enrolled_on: Option<NaiveDate>,
}

/// Enrolls a student; the enrollment is the first line of their history.
///
/// A duplicate CURP surfaces as `SchoolError::AlreadyExists`.
pub struct RegisterStudentHandler {
    groups: Arc<dyn GroupRepository>,
    students: Arc<dyn StudentRepository>,
}

impl RegisterStudentHandler {
    pub fn new(groups: Arc<dyn GroupRepository>, students: Arc<dyn StudentRepository>) -> Self {
        Self { groups, students }
    }

    pub async fn handle(&self, cmd: RegisterStudentCommand) -> Result<Student, SchoolError> {
        let curp = Curp::new(&cmd.curp)?;
        let group = self
            .groups
            .find_by_id(&cmd.group_id)
            .await?
            .ok_or_else(|| SchoolError::GroupNotFound(cmd.group_id.to_string()))?;

        let now = Timestamp::now();
        let enrolled_on = cmd.enrolled_on.unwrap_or_else(|| now.local_date());
        let student = Student::enroll(group.id(), &cmd.full_name, curp, enrolled_on)?;
        let entry = HistoryEntry::record(
            student.id(),
            format!("Alta en el grupo {}", group.label()),
            cmd.actor.username.clone(),
            now,
        )?;

        self.students.save(&student, &entry).await?;

        info!(student_id = %student.id(), group = %group.label(), "Student registered");
        Ok(student)
    }
}

#[derive(Debug, Clone)]
pub struct ChangeStudentStatusCommand {
    pub actor: AuthenticatedUser,
    pub student_id: StudentId,
    pub status: StudentStatus,
}

/// Updates the status and appends a history line in one transaction.
/// Setting the current status again writes nothing.
pub struct ChangeStudentStatusHandler {
    students: Arc<dyn StudentRepository>,
}

impl ChangeStudentStatusHandler {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    pub async fn handle(&self, cmd: ChangeStudentStatusCommand) -> Result<Student, SchoolError> {
        let mut student = self
            .students
            .find_by_id(&cmd.student_id)
            .await?
            .ok_or_else(|| SchoolError::StudentNotFound(cmd.student_id.to_string()))?;

        let Some(description) = student.change_status(cmd.status) else {
            return Ok(student);
        };
        let entry = HistoryEntry::record(
            student.id(),
            description,
            cmd.actor.username.clone(),
            Timestamp::now(),
        )?;

        self.students.update_status(&student, &entry).await?;

        info!(student_id = %student.id(), status = %student.status(), "Student status changed");
        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::application::handlers::school::test_support::{enrolled_student, first_group};
    use crate::domain::foundation::{AccountId, Role};

    const CURP: &str = "PELL100101HDFRSSA1";

    fn director() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
    }

    fn register(group_id: GroupId, curp: &str) -> RegisterStudentCommand {
        RegisterStudentCommand {
            actor: director(),
            group_id,
            full_name: "Luis Pérez".to_string(),
            curp: curp.to_string(),
            enrolled_on: None,
        }
    }

    #[tokio::test]
    async fn registration_records_enrollment_history() {
        let db = Arc::new(InMemoryDatabase::new());
        let group = first_group(&db).await;
        let handler = RegisterStudentHandler::new(db.clone(), db.clone());

        let student = handler.handle(register(group.id(), CURP)).await.unwrap();

        assert_eq!(student.status(), StudentStatus::Activo);
        let history = db.list_history(&student.id()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].description(), "Alta en el grupo 1° A");
        assert_eq!(history[0].actor(), "director");
        let listed = ListStudentsHandler::new(db.clone(), db.clone())
            .handle(group.id())
            .await
            .unwrap();
        assert_eq!(listed, vec![student]);
    }

    #[tokio::test]
    async fn duplicate_curp_is_already_exists() {
        let db = Arc::new(InMemoryDatabase::new());
        let group = first_group(&db).await;
        let handler = RegisterStudentHandler::new(db.clone(), db.clone());
        handler.handle(register(group.id(), CURP)).await.unwrap();

        let err = handler
            .handle(register(group.id(), &CURP.to_lowercase()))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn unknown_group_is_not_found() {
        let db = Arc::new(InMemoryDatabase::new());
        let handler = RegisterStudentHandler::new(db.clone(), db.clone());

        let err = handler.handle(register(GroupId::new(), CURP)).await.unwrap_err();
        assert!(matches!(err, SchoolError::GroupNotFound(_)));

        let err = ListStudentsHandler::new(db.clone(), db)
            .handle(GroupId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::GroupNotFound(_)));
    }

    #[tokio::test]
    async fn status_change_appends_history_once() {
        let db = Arc::new(InMemoryDatabase::new());
        let student = enrolled_student(&db, "Luis Pérez", CURP).await;
        let handler = ChangeStudentStatusHandler::new(db.clone());
        let cmd = ChangeStudentStatusCommand {
            actor: director(),
            student_id: student.id(),
            status: StudentStatus::Baja,
        };

        let changed = handler.handle(cmd.clone()).await.unwrap();
        handler.handle(cmd).await.unwrap();

        assert_eq!(changed.status(), StudentStatus::Baja);
        let history = db.list_history(&student.id()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].description(), "Cambio de estado: ACTIVO -> BAJA");
    }

    #[tokio::test]
    async fn status_change_of_unknown_student_is_not_found() {
        let handler = ChangeStudentStatusHandler::new(Arc::new(InMemoryDatabase::new()));
        let err = handler
            .handle(ChangeStudentStatusCommand {
                actor: director(),
                student_id: StudentId::new(),
                status: StudentStatus::Baja,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::StudentNotFound(_)));
    }
}
