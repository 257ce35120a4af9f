//! HTTP handlers for account endpoints.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::adapters::http::error::{
    duplicate_warning, forbidden, internal_error, not_found, validation_failed, ErrorResponse,
    NoticeResponse,
};
use crate::adapters::http::middleware::{session_cookie, RequireAuth, RequireDirector};
use crate::adapters::http::AppState;
use crate::application::handlers::account::{
    ChangePasswordCommand, CreateTeacherCommand, LoginCommand,
};
use crate::domain::account::AccountError;
use crate::domain::foundation::AuthenticatedUser;

use super::dto::{
    CreateTeacherForm, FormPageResponse, LoginForm, LoginResponse, NewPasswordForm,
    SessionUserResponse, TeacherAccountResponse, DASHBOARD_PATH, FIRST_LOGIN_PATH,
};

/// GET /
///
/// Login form. A signed-in user goes straight to the dashboard.
pub async fn login_page(user: Option<Extension<AuthenticatedUser>>) -> Response {
    match user {
        Some(_) => Redirect::to(DASHBOARD_PATH).into_response(),
        None => Json(FormPageResponse::login()).into_response(),
    }
}

/// GET /primer-ingreso
pub async fn first_login_page(RequireAuth(user): RequireAuth) -> Response {
    Json(FormPageResponse::new_password(&user)).into_response()
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let cmd = LoginCommand {
        username: form.username,
        password: form.password,
    };

    match state.login_handler().handle(cmd).await {
        Ok(result) => {
            let cookie = session_cookie(
                &state.settings.cookie_name,
                result.token,
                state.settings.secure_cookie,
            );
            let redirect = if result.requires_password_change {
                FIRST_LOGIN_PATH
            } else {
                DASHBOARD_PATH
            };
            let response = LoginResponse {
                user: SessionUserResponse::from(&result.user),
                requires_password_change: result.requires_password_change,
                redirect: redirect.to_string(),
            };
            (jar.add(cookie), (StatusCode::OK, Json(response))).into_response()
        }
        Err(e) => handle_account_error(e),
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let expired = Cookie::build((state.settings.cookie_name.clone(), "")).path("/");
    (jar.remove(expired), Redirect::to("/")).into_response()
}

/// POST /guardar-nuevo-password
pub async fn save_new_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<NewPasswordForm>,
) -> Response {
    let cmd = ChangePasswordCommand {
        user,
        pass1: form.pass1,
        pass2: form.pass2,
    };

    match state.change_password_handler().handle(cmd).await {
        Ok(()) => (
            StatusCode::OK,
            Json(NoticeResponse::ok("Contraseña actualizada")),
        )
            .into_response(),
        Err(e) => handle_account_error(e),
    }
}

/// POST /director/crear-maestro
pub async fn create_teacher(
    State(state): State<AppState>,
    RequireDirector(actor): RequireDirector,
    Form(form): Form<CreateTeacherForm>,
) -> Response {
    let cmd = CreateTeacherCommand {
        actor,
        full_name: form.nombre,
        username: form.usuario,
        password: form.password,
    };

    match state.create_teacher_handler().handle(cmd).await {
        Ok(account) => (
            StatusCode::CREATED,
            Json(TeacherAccountResponse::from(&account)),
        )
            .into_response(),
        Err(e) => handle_account_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_account_error(error: AccountError) -> Response {
    match error {
        AccountError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized(error.message())),
        )
            .into_response(),
        AccountError::NotFound(what) => not_found("Account", &what),
        AccountError::AlreadyExists(_) => duplicate_warning("El usuario"),
        AccountError::ValidationFailed { field, message } => validation_failed(&field, message),
        AccountError::Forbidden => forbidden(),
        AccountError::Session(_) | AccountError::Infrastructure(_) => internal_error(error),
    }
}
