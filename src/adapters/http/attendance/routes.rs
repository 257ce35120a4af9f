//! HTTP routes for attendance endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{daily_report, justify, statistics};

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/ver-asistencias", get(daily_report))
        .route("/director/estadisticas", get(statistics))
        .route("/director/justificar", post(justify))
}
