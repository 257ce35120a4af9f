//! HTTP handlers for attendance endpoints.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::adapters::http::error::{forbidden, internal_error, not_found, validation_failed};
use crate::adapters::http::middleware::{RequireAuth, RequireDirector};
use crate::adapters::http::AppState;
use crate::application::handlers::attendance::{DailyReportQuery, JustifyAttendanceCommand};
use crate::domain::attendance::AttendanceError;
use crate::domain::foundation::StudentId;

use super::dto::{
    parse_date, AttendanceRecordResponse, DailyReportParams, DailyReportResponse,
    DailyRowResponse, JustifyForm, DATE_FORMAT,
};

/// GET /ver-asistencias
pub async fn daily_report(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Query(params): Query<DailyReportParams>,
) -> Response {
    let date = match params.fecha.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_date(raw) {
            Some(date) => Some(date),
            None => return validation_failed("fecha", "Expected a YYYY-MM-DD date"),
        },
    };

    match state
        .daily_report_handler()
        .handle(DailyReportQuery { date })
        .await
    {
        Ok(report) => Json(DailyReportResponse {
            date: report.date.format(DATE_FORMAT).to_string(),
            rows: report.rows.iter().map(DailyRowResponse::from).collect(),
        })
        .into_response(),
        Err(e) => handle_attendance_error(e),
    }
}

/// GET /director/estadisticas
pub async fn statistics(
    State(state): State<AppState>,
    RequireDirector(_): RequireDirector,
) -> Response {
    match state.attendance_statistics_handler().handle().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => handle_attendance_error(e),
    }
}

/// POST /director/justificar
pub async fn justify(
    State(state): State<AppState>,
    RequireDirector(_): RequireDirector,
    Form(form): Form<JustifyForm>,
) -> Response {
    let student_id: StudentId = match form.id_alumno.trim().parse() {
        Ok(id) => id,
        Err(_) => return validation_failed("id_alumno", "Invalid student ID format"),
    };
    let Some(date) = parse_date(&form.fecha) else {
        return validation_failed("fecha", "Expected a YYYY-MM-DD date");
    };

    match state
        .justify_attendance_handler()
        .handle(JustifyAttendanceCommand { student_id, date })
        .await
    {
        Ok(record) => Json(AttendanceRecordResponse::from(&record)).into_response(),
        Err(e) => handle_attendance_error(e),
    }
}

fn handle_attendance_error(error: AttendanceError) -> Response {
    match error {
        AttendanceError::StudentNotFound(id) => not_found("Alumno", &id),
        AttendanceError::ValidationFailed { field, message } => validation_failed(&field, message),
        AttendanceError::Forbidden => forbidden(),
        AttendanceError::Infrastructure(_) => internal_error(error),
    }
}
