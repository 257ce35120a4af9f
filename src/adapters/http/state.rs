//! Shared application state for the HTTP layer.
//!
//! Holds the ports and builds application handlers on demand, so every
//! request works against the same pool, file store and token service.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::academic_cycle::{
    ActivateCycleHandler, CreateCycleHandler, CycleResolver, ListCyclesHandler, SelectCycleHandler,
};
use crate::application::handlers::account::{
    ChangePasswordHandler, CreateTeacherHandler, LoginHandler,
};
use crate::application::handlers::attendance::{
    AttendanceStatisticsHandler, DailyReportHandler, JustifyAttendanceHandler,
};
use crate::application::handlers::planning::{
    ApprovePlanningHandler, DirectorOverviewHandler, GetKanbanHandler,
    ListTeacherPlanningsHandler, SubmitPlanningHandler, TeacherDetailHandler,
    TeacherFoldersHandler,
};
use crate::application::handlers::school::{
    ChangeStudentStatusHandler, GroupAssignmentHandler, ListStudentsHandler,
    RegisterStudentHandler, SaveAssignmentsHandler, StudentDocumentsHandler,
    StudentHistoryHandler, UploadStudentDocumentHandler,
};
use crate::config::AppConfig;
use crate::ports::{
    AccountRepository, AttendanceRepository, CycleRepository, GroupRepository, PlanningReader,
    PlanningRepository, SessionIssuer, SessionValidator, StudentRepository, UploadStorage,
};

use super::middleware::AuthState;

/// HTTP-facing settings taken from configuration.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cookie_name: String,
    pub secure_cookie: bool,
    pub session_ttl: Duration,
    /// Default number of documents on the teacher's list and the overview.
    pub recent_limit: usize,
    pub max_upload_bytes: usize,
    pub request_timeout: Duration,
    /// Browser origins allowed to call the API with credentials.
    pub cors_origins: Vec<String>,
}

impl HttpSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cookie_name: config.auth.cookie_name.clone(),
            secure_cookie: config.auth.secure_cookie,
            session_ttl: config.auth.session_ttl(),
            recent_limit: config.school.recent_limit,
            max_upload_bytes: config.storage.max_upload_bytes,
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
            cors_origins: config.server.cors_origins_list(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cookie_name: "sesion".to_string(),
            secure_cookie: false,
            session_ttl: Duration::from_secs(8 * 60 * 60),
            recent_limit: 10,
            max_upload_bytes: 20 * 1024 * 1024,
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub cycles: Arc<dyn CycleRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub plannings: Arc<dyn PlanningRepository>,
    pub planning_reader: Arc<dyn PlanningReader>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub storage: Arc<dyn UploadStorage>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub session_issuer: Arc<dyn SessionIssuer>,
    pub resolver: Arc<CycleResolver>,
    pub settings: HttpSettings,
}

impl AppState {
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            validator: self.session_validator.clone(),
            cookie_name: self.settings.cookie_name.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accounts
    // ─────────────────────────────────────────────────────────────────────────

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.accounts.clone(), self.session_issuer.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.accounts.clone())
    }

    pub fn create_teacher_handler(&self) -> CreateTeacherHandler {
        CreateTeacherHandler::new(self.accounts.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Academic cycles
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_cycle_handler(&self) -> CreateCycleHandler {
        CreateCycleHandler::new(self.cycles.clone())
    }

    pub fn activate_cycle_handler(&self) -> ActivateCycleHandler {
        ActivateCycleHandler::new(self.cycles.clone())
    }

    pub fn select_cycle_handler(&self) -> SelectCycleHandler {
        SelectCycleHandler::new(self.cycles.clone(), self.session_issuer.clone())
    }

    pub fn list_cycles_handler(&self) -> ListCyclesHandler {
        ListCyclesHandler::new(self.cycles.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Planning documents
    // ─────────────────────────────────────────────────────────────────────────

    pub fn submit_planning_handler(&self) -> SubmitPlanningHandler {
        SubmitPlanningHandler::new(
            self.accounts.clone(),
            self.plannings.clone(),
            self.storage.clone(),
            self.resolver.clone(),
        )
    }

    pub fn approve_planning_handler(&self) -> ApprovePlanningHandler {
        ApprovePlanningHandler::new(self.plannings.clone())
    }

    pub fn kanban_handler(&self) -> GetKanbanHandler {
        GetKanbanHandler::new(
            self.accounts.clone(),
            self.planning_reader.clone(),
            self.resolver.clone(),
        )
    }

    pub fn teacher_plannings_handler(&self) -> ListTeacherPlanningsHandler {
        ListTeacherPlanningsHandler::new(
            self.planning_reader.clone(),
            self.resolver.clone(),
            self.settings.recent_limit,
        )
    }

    pub fn teacher_folders_handler(&self) -> TeacherFoldersHandler {
        TeacherFoldersHandler::new(self.planning_reader.clone(), self.resolver.clone())
    }

    pub fn teacher_detail_handler(&self) -> TeacherDetailHandler {
        TeacherDetailHandler::new(
            self.accounts.clone(),
            self.planning_reader.clone(),
            self.resolver.clone(),
        )
    }

    pub fn director_overview_handler(&self) -> DirectorOverviewHandler {
        DirectorOverviewHandler::new(
            self.planning_reader.clone(),
            self.resolver.clone(),
            self.settings.recent_limit,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attendance
    // ─────────────────────────────────────────────────────────────────────────

    pub fn justify_attendance_handler(&self) -> JustifyAttendanceHandler {
        JustifyAttendanceHandler::new(self.attendance.clone())
    }

    pub fn daily_report_handler(&self) -> DailyReportHandler {
        DailyReportHandler::new(self.attendance.clone())
    }

    pub fn attendance_statistics_handler(&self) -> AttendanceStatisticsHandler {
        AttendanceStatisticsHandler::new(self.attendance.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Groups and students
    // ─────────────────────────────────────────────────────────────────────────

    pub fn group_assignment_handler(&self) -> GroupAssignmentHandler {
        GroupAssignmentHandler::new(self.groups.clone(), self.accounts.clone())
    }

    pub fn save_assignments_handler(&self) -> SaveAssignmentsHandler {
        SaveAssignmentsHandler::new(self.groups.clone())
    }

    pub fn list_students_handler(&self) -> ListStudentsHandler {
        ListStudentsHandler::new(self.groups.clone(), self.students.clone())
    }

    pub fn register_student_handler(&self) -> RegisterStudentHandler {
        RegisterStudentHandler::new(self.groups.clone(), self.students.clone())
    }

    pub fn change_student_status_handler(&self) -> ChangeStudentStatusHandler {
        ChangeStudentStatusHandler::new(self.students.clone())
    }

    pub fn upload_student_document_handler(&self) -> UploadStudentDocumentHandler {
        UploadStudentDocumentHandler::new(self.students.clone(), self.storage.clone())
    }

    pub fn student_documents_handler(&self) -> StudentDocumentsHandler {
        StudentDocumentsHandler::new(self.students.clone())
    }

    pub fn student_history_handler(&self) -> StudentHistoryHandler {
        StudentHistoryHandler::new(self.students.clone())
    }
}
