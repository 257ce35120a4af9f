//! HTTP handlers for planning endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::adapters::http::academic_cycle::CycleResponse;
use crate::adapters::http::error::{
    forbidden, internal_error, not_found, validation_failed, ErrorResponse,
};
use crate::adapters::http::middleware::{RequireAuth, RequireDirector};
use crate::adapters::http::upload::UploadForm;
use crate::adapters::http::AppState;
use crate::application::handlers::planning::{
    ApprovePlanningCommand, GetKanbanQuery, ListTeacherPlanningsQuery, SubmitPlanningCommand,
    TeacherDetailQuery,
};
use crate::domain::foundation::{AccountId, PlanningDocumentId};
use crate::domain::planning::PlanningError;

use super::dto::{
    ApproveForm, DashboardResponse, KanbanQuery, KanbanResponse, MyPlanningsQuery,
    PlanningDocumentResponse, RecentDocumentResponse, SubmitPlanningResponse,
    TeacherDetailResponse, TeacherFolderResponse, TeacherFoldersResponse, TeacherPlanningsResponse,
    TeacherRefResponse,
};

/// GET /dashboard
pub async fn dashboard(State(state): State<AppState>, RequireAuth(user): RequireAuth) -> Response {
    if user.is_director() {
        return match state.director_overview_handler().handle(&user).await {
            Ok(overview) => Json(DashboardResponse::Director {
                cycle: CycleResponse::from(&overview.cycle),
                recent: overview.recent.iter().map(RecentDocumentResponse::from).collect(),
            })
            .into_response(),
            Err(e) => handle_planning_error(e),
        };
    }

    let query = ListTeacherPlanningsQuery {
        user,
        period: None,
        limit: None,
    };
    match state.teacher_plannings_handler().handle(query).await {
        Ok(result) => Json(DashboardResponse::Maestro {
            cycle: CycleResponse::from(&result.cycle),
            documents: result
                .documents
                .iter()
                .map(PlanningDocumentResponse::from)
                .collect(),
        })
        .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// POST /subir-planeacion
pub async fn submit_planning(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Response {
    let form = match UploadForm::read(multipart, "archivo").await {
        Ok(form) => form,
        Err(rejection) => return rejection,
    };

    let cmd = SubmitPlanningCommand {
        user,
        period: form.field("periodo"),
        comment: form.field("comentarios"),
        file_name: form.file_name,
        bytes: form.bytes,
    };

    match state.submit_planning_handler().handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SubmitPlanningResponse {
                cycle: CycleResponse::from(&result.cycle),
                document: PlanningDocumentResponse::from(&result.document),
            }),
        )
            .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// GET /mis-planeaciones
pub async fn my_plannings(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MyPlanningsQuery>,
) -> Response {
    let query = ListTeacherPlanningsQuery {
        user,
        period: query.periodo,
        limit: query.limit,
    };

    match state.teacher_plannings_handler().handle(query).await {
        Ok(result) => Json(TeacherPlanningsResponse {
            cycle: CycleResponse::from(&result.cycle),
            period: result.period.map(|p| p.to_string()),
            documents: result
                .documents
                .iter()
                .map(PlanningDocumentResponse::from)
                .collect(),
        })
        .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// GET /director/kanban
pub async fn kanban(
    State(state): State<AppState>,
    RequireDirector(user): RequireDirector,
    Query(query): Query<KanbanQuery>,
) -> Response {
    let query = GetKanbanQuery {
        user,
        period: query.periodo,
    };

    match state.kanban_handler().handle(query).await {
        Ok(result) => Json(KanbanResponse::new(
            CycleResponse::from(&result.cycle),
            &result.board,
        ))
        .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// POST /director/aprobar-feedback
pub async fn approve_planning(
    State(state): State<AppState>,
    RequireDirector(_): RequireDirector,
    Form(form): Form<ApproveForm>,
) -> Response {
    let document_id: PlanningDocumentId = match form.id_planeacion.trim().parse() {
        Ok(id) => id,
        Err(_) => return validation_failed("id_planeacion", "Invalid document ID format"),
    };

    let cmd = ApprovePlanningCommand {
        document_id,
        feedback: form.feedback,
    };

    match state.approve_planning_handler().handle(cmd).await {
        Ok(document) => Json(PlanningDocumentResponse::from(&document)).into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// GET /director/maestros
pub async fn teacher_folders(
    State(state): State<AppState>,
    RequireDirector(user): RequireDirector,
) -> Response {
    match state.teacher_folders_handler().handle(&user).await {
        Ok(result) => Json(TeacherFoldersResponse {
            cycle: CycleResponse::from(&result.cycle),
            folders: result.folders.iter().map(TeacherFolderResponse::from).collect(),
        })
        .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// GET /director/ver-planeaciones/:id
pub async fn teacher_detail(
    State(state): State<AppState>,
    RequireDirector(user): RequireDirector,
    Path(id): Path<String>,
) -> Response {
    let teacher_id: AccountId = match id.parse() {
        Ok(id) => id,
        Err(_) => return validation_failed("id", "Invalid teacher ID format"),
    };

    match state
        .teacher_detail_handler()
        .handle(TeacherDetailQuery { user, teacher_id })
        .await
    {
        Ok(detail) => Json(TeacherDetailResponse {
            cycle: CycleResponse::from(&detail.cycle),
            teacher: TeacherRefResponse::from(&detail.teacher),
            documents: detail
                .documents
                .iter()
                .map(PlanningDocumentResponse::from)
                .collect(),
        })
        .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

fn handle_planning_error(error: PlanningError) -> Response {
    match error {
        PlanningError::NotFound(id) => not_found("Planeación", &id.to_string()),
        PlanningError::ValidationFailed { field, message } => validation_failed(&field, message),
        PlanningError::Forbidden => forbidden(),
        PlanningError::TeacherNotResolved => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden(error.message())),
        )
            .into_response(),
        PlanningError::InvalidState(message) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        PlanningError::Storage(_) | PlanningError::Infrastructure(_) => internal_error(error),
    }
}
