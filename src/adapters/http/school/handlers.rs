//! HTTP handlers for group and student endpoints.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::adapters::http::attendance::parse_date;
use crate::adapters::http::error::{
    duplicate_warning, forbidden, internal_error, not_found, validation_failed,
};
use crate::adapters::http::middleware::{RequireAuth, RequireDirector};
use crate::adapters::http::planning::TeacherRefResponse;
use crate::adapters::http::upload::UploadForm;
use crate::adapters::http::AppState;
use crate::application::handlers::school::{
    ChangeStudentStatusCommand, RegisterStudentCommand, SaveAssignmentsCommand,
    UploadStudentDocumentCommand,
};
use crate::domain::foundation::{GroupId, StudentId};
use crate::domain::school::{SchoolError, StudentStatus};

use super::dto::{
    parse_assignments, AssignmentViewResponse, GroupAssignmentResponse, HistoryEntryResponse,
    RegisterStudentForm, SavedAssignmentsResponse, StudentDocumentResponse, StudentResponse,
    StudentStatusForm,
};

fn parse_student_id(raw: &str) -> Result<StudentId, Response> {
    raw.trim()
        .parse()
        .map_err(|_| validation_failed("id", "Invalid student ID format"))
}

/// GET /director/asignacion
pub async fn assignment_view(
    State(state): State<AppState>,
    RequireDirector(_): RequireDirector,
) -> Response {
    match state.group_assignment_handler().handle().await {
        Ok(view) => Json(AssignmentViewResponse {
            groups: view.groups.iter().map(GroupAssignmentResponse::from).collect(),
            teachers: view.teachers.iter().map(TeacherRefResponse::from).collect(),
        })
        .into_response(),
        Err(e) => handle_school_error(e),
    }
}

/// POST /director/guardar-asignacion
pub async fn save_assignments(
    State(state): State<AppState>,
    RequireDirector(_): RequireDirector,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let assignments = match parse_assignments(&form) {
        Ok(assignments) => assignments,
        Err(field) => return validation_failed(&field, "Invalid group or teacher ID"),
    };

    match state
        .save_assignments_handler()
        .handle(SaveAssignmentsCommand { assignments })
        .await
    {
        Ok(updated) => Json(SavedAssignmentsResponse { updated }).into_response(),
        Err(e) => handle_school_error(e),
    }
}

/// GET /grupos/:id/alumnos
pub async fn list_students(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let group_id: GroupId = match id.parse() {
        Ok(id) => id,
        Err(_) => return validation_failed("id", "Invalid group ID format"),
    };

    match state.list_students_handler().handle(group_id).await {
        Ok(students) => {
            Json(students.iter().map(StudentResponse::from).collect::<Vec<_>>()).into_response()
        }
        Err(e) => handle_school_error(e),
    }
}

/// POST /director/alumnos
pub async fn register_student(
    State(state): State<AppState>,
    RequireDirector(actor): RequireDirector,
    Form(form): Form<RegisterStudentForm>,
) -> Response {
    let group_id: GroupId = match form.id_grupo.trim().parse() {
        Ok(id) => id,
        Err(_) => return validation_failed("id_grupo", "Invalid group ID format"),
    };
    let enrolled_on = match form.fecha_ingreso.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_date(raw) {
            Some(date) => Some(date),
            None => return validation_failed("fecha_ingreso", "Expected a YYYY-MM-DD date"),
        },
    };

    let cmd = RegisterStudentCommand {
        actor,
        group_id,
        full_name: form.nombre,
        curp: form.curp,
        enrolled_on,
    };

    match state.register_student_handler().handle(cmd).await {
        Ok(student) => (StatusCode::CREATED, Json(StudentResponse::from(&student))).into_response(),
        Err(e) => handle_school_error(e),
    }
}

/// POST /director/alumnos/:id/estado
pub async fn change_student_status(
    State(state): State<AppState>,
    RequireDirector(actor): RequireDirector,
    Path(id): Path<String>,
    Form(form): Form<StudentStatusForm>,
) -> Response {
    let student_id = match parse_student_id(&id) {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };
    let status: StudentStatus = match form.estado.trim().to_uppercase().parse() {
        Ok(status) => status,
        Err(e) => return handle_school_error(SchoolError::from(e)),
    };

    let cmd = ChangeStudentStatusCommand {
        actor,
        student_id,
        status,
    };

    match state.change_student_status_handler().handle(cmd).await {
        Ok(student) => Json(StudentResponse::from(&student)).into_response(),
        Err(e) => handle_school_error(e),
    }
}

/// POST /alumnos/:id/documentos
pub async fn upload_student_document(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let student_id = match parse_student_id(&id) {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };
    let form = match UploadForm::read(multipart, "archivo").await {
        Ok(form) => form,
        Err(rejection) => return rejection,
    };

    let cmd = UploadStudentDocumentCommand {
        actor,
        student_id,
        file_name: form.file_name,
        bytes: form.bytes,
    };

    match state.upload_student_document_handler().handle(cmd).await {
        Ok(document) => (
            StatusCode::CREATED,
            Json(StudentDocumentResponse::from(&document)),
        )
            .into_response(),
        Err(e) => handle_school_error(e),
    }
}

/// GET /alumnos/:id/documentos
pub async fn student_documents(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let student_id = match parse_student_id(&id) {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    match state.student_documents_handler().handle(student_id).await {
        Ok(documents) => Json(
            documents
                .iter()
                .map(StudentDocumentResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => handle_school_error(e),
    }
}

/// GET /alumnos/:id/historial
pub async fn student_history(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let student_id = match parse_student_id(&id) {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    match state.student_history_handler().handle(student_id).await {
        Ok(entries) => Json(
            entries
                .iter()
                .map(HistoryEntryResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => handle_school_error(e),
    }
}

fn handle_school_error(error: SchoolError) -> Response {
    match error {
        SchoolError::GroupNotFound(id) => not_found("Grupo", &id),
        SchoolError::StudentNotFound(id) => not_found("Alumno", &id),
        SchoolError::AlreadyExists(_) => duplicate_warning("El alumno"),
        SchoolError::ValidationFailed { field, message } => validation_failed(&field, message),
        SchoolError::Forbidden => forbidden(),
        SchoolError::Storage(_) | SchoolError::Infrastructure(_) => internal_error(error),
    }
}
