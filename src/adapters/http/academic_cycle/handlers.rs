//! HTTP handlers for academic cycle endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::adapters::http::error::{
    duplicate_warning, forbidden, internal_error, not_found, validation_failed, NoticeResponse,
};
use crate::adapters::http::middleware::{session_cookie, RequireDirector};
use crate::adapters::http::AppState;
use crate::application::handlers::academic_cycle::{
    ActivateCycleCommand, CreateCycleCommand, SelectCycleCommand,
};
use crate::domain::academic_cycle::CycleError;
use crate::domain::foundation::CycleId;

use super::dto::{
    AcademicCycleResponse, CreateCycleForm, CycleListResponse, CycleResponse, SelectCycleForm,
};

/// GET /director/ciclos
pub async fn list_cycles(
    State(state): State<AppState>,
    RequireDirector(user): RequireDirector,
) -> Response {
    let current = match state.resolver.selected_cycle(&user).await {
        Ok(cycle) => cycle,
        Err(e) => return handle_cycle_error(e),
    };

    match state.list_cycles_handler().handle().await {
        Ok(cycles) => {
            let response = CycleListResponse {
                current: CycleResponse::from(&current),
                cycles: cycles.iter().map(AcademicCycleResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_cycle_error(e),
    }
}

/// POST /director/crear-ciclo
pub async fn create_cycle(
    State(state): State<AppState>,
    RequireDirector(_): RequireDirector,
    Form(form): Form<CreateCycleForm>,
) -> Response {
    let cmd = CreateCycleCommand { name: form.nombre };

    match state.create_cycle_handler().handle(cmd).await {
        Ok(cycle) => (
            StatusCode::CREATED,
            Json(AcademicCycleResponse::from(&cycle)),
        )
            .into_response(),
        Err(e) => handle_cycle_error(e),
    }
}

/// GET /director/activar-ciclo/:id
pub async fn activate_cycle(
    State(state): State<AppState>,
    RequireDirector(_): RequireDirector,
    Path(id): Path<String>,
) -> Response {
    let cycle_id: CycleId = match id.parse() {
        Ok(id) => id,
        Err(_) => return validation_failed("id", "Invalid cycle ID format"),
    };

    match state
        .activate_cycle_handler()
        .handle(ActivateCycleCommand { cycle_id })
        .await
    {
        Ok(cycle) => (StatusCode::OK, Json(AcademicCycleResponse::from(&cycle))).into_response(),
        Err(e) => handle_cycle_error(e),
    }
}

/// POST /director/cambiar-ciclo
///
/// Stores the choice in a freshly issued session cookie.
pub async fn select_cycle(
    State(state): State<AppState>,
    RequireDirector(user): RequireDirector,
    jar: CookieJar,
    Form(form): Form<SelectCycleForm>,
) -> Response {
    let cmd = SelectCycleCommand {
        user,
        name: form.ciclo,
    };

    match state.select_cycle_handler().handle(cmd).await {
        Ok(result) => {
            let cookie = session_cookie(
                &state.settings.cookie_name,
                result.token,
                state.settings.secure_cookie,
            );
            let message = format!(
                "Ciclo seleccionado: {}",
                result.user.selected_cycle.unwrap_or_default()
            );
            (jar.add(cookie), Json(NoticeResponse::ok(message))).into_response()
        }
        Err(e) => handle_cycle_error(e),
    }
}

fn handle_cycle_error(error: CycleError) -> Response {
    match error {
        CycleError::NotFound(what) => not_found("Cycle", &what),
        CycleError::AlreadyExists(_) => duplicate_warning("El ciclo"),
        CycleError::ValidationFailed { field, message } => validation_failed(&field, message),
        CycleError::Forbidden => forbidden(),
        CycleError::Infrastructure(_) => internal_error(error),
    }
}
