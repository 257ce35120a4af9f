//! HTTP routes for planning endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{
    approve_planning, dashboard, kanban, my_plannings, submit_planning, teacher_detail,
    teacher_folders,
};

pub fn planning_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/subir-planeacion", post(submit_planning))
        .route("/mis-planeaciones", get(my_plannings))
        .route("/director/kanban", get(kanban))
        .route("/director/aprobar-feedback", post(approve_planning))
        .route("/director/maestros", get(teacher_folders))
        .route("/director/ver-planeaciones/:id", get(teacher_detail))
}
