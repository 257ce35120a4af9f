//! HTTP routes for group and student endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{
    assignment_view, change_student_status, list_students, register_student, save_assignments,
    student_documents, student_history, upload_student_document,
};

pub fn school_routes() -> Router<AppState> {
    Router::new()
        .route("/director/asignacion", get(assignment_view))
        .route("/director/guardar-asignacion", post(save_assignments))
        .route("/grupos/:id/alumnos", get(list_students))
        .route("/director/alumnos", post(register_student))
        .route("/director/alumnos/:id/estado", post(change_student_status))
        .route(
            "/alumnos/:id/documentos",
            get(student_documents).post(upload_student_document),
        )
        .route("/alumnos/:id/historial", get(student_history))
}
