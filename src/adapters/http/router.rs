//! Assembles the application router.

use std::path::Path;

use axum::{extract::DefaultBodyLimit, middleware::from_fn_with_state, Router};
use http::{header, HeaderValue, Method};
use tower_http::{cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::warn;

use super::academic_cycle::academic_cycle_routes;
use super::account::account_routes;
use super::attendance::attendance_routes;
use super::middleware::session_middleware;
use super::planning::planning_routes;
use super::school::school_routes;
use super::AppState;

/// Room for multipart boundaries and text fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds every route, the session middleware and the static file service
/// for `upload_dir` at `/archivos`.
pub fn build_router(state: AppState, upload_dir: impl AsRef<Path>) -> Router {
    let body_limit = state.settings.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .merge(account_routes())
        .merge(academic_cycle_routes())
        .merge(planning_routes())
        .merge(attendance_routes())
        .merge(school_routes())
        .nest_service("/archivos", ServeDir::new(upload_dir.as_ref()))
        .layer(from_fn_with_state(state.auth_state(), session_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(state.settings.request_timeout))
        .layer(cors_layer(&state.settings.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Skipping unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::{test_app, TestApp};
    use crate::domain::account::{Account, Password, Username};
    use crate::domain::foundation::{AccountId, AuthenticatedUser, Role};
    use crate::ports::SessionIssuer;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use tower::ServiceExt;

    const BOUNDARY: &str = "planeacion-boundary";

    async fn send(app: &TestApp, request: Request<Body>) -> Response {
        build_router(app.state.clone(), std::env::temp_dir())
            .oneshot(request)
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn session_for(app: &TestApp, user: &AuthenticatedUser) -> String {
        let token = app.sessions.issue(user).await.unwrap();
        format!("sesion={}", token)
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn planning_upload(cookie: &str, period: &str, file_name: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"periodo\"\r\n\r\n{period}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"comentarios\"\r\n\r\nLista\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"archivo\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/pdf\r\n\r\n{content}\r\n--{b}--\r\n",
            b = BOUNDARY,
        );
        Request::builder()
            .method("POST")
            .uri("/subir-planeacion")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .unwrap()
    }

    fn teacher_account(username: &str) -> Account {
        Account::new_teacher(
            "Ana López",
            Username::new(username).unwrap(),
            Password::new("temporal").unwrap(),
        )
        .unwrap()
    }

    fn director() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Session handling
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_session_redirects_to_login() {
        let app = test_app();

        let response = send(&app, get("/dashboard", None)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn login_redirect_target_serves_the_login_form() {
        let app = test_app();

        let redirect = send(&app, get("/dashboard", None)).await;
        let location = redirect.headers()[header::LOCATION].to_str().unwrap().to_string();
        let response = send(&app, get(&location, None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["action"], "/login");
        assert_eq!(body["fields"][0], "username");
        assert!(body.get("user").is_none());
    }

    #[tokio::test]
    async fn signed_in_user_skips_the_login_form() {
        let app = test_app();
        let account = teacher_account("ana");
        app.db.insert_account(account.clone());
        let cookie = session_for(&app, &account.to_authenticated_user()).await;

        let response = send(&app, get("/", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn first_login_page_offers_the_password_form() {
        let app = test_app();
        let account = teacher_account("ana");
        app.db.insert_account(account.clone());
        let cookie = session_for(&app, &account.to_authenticated_user()).await;

        let response = send(&app, get("/primer-ingreso", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["action"], "/guardar-nuevo-password");
        assert_eq!(body["user"]["username"], "ana");
    }

    #[tokio::test]
    async fn invalid_cookie_is_treated_as_missing() {
        let app = test_app();

        let response = send(&app, get("/mis-planeaciones", Some("sesion=forged"))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn teacher_cannot_reach_director_pages() {
        let app = test_app();
        let account = teacher_account("ana");
        app.db.insert_account(account.clone());
        let cookie = session_for(&app, &account.to_authenticated_user()).await;

        let response = send(&app, get("/director/kanban?periodo=SEP-Q1", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Login
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn first_login_sets_cookie_and_asks_for_new_password() {
        let app = test_app();
        app.db.insert_account(teacher_account("ana"));

        let response = send(
            &app,
            post_form("/login", None, "username=ana&password=temporal"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with("sesion=mock-session-"));
        assert!(cookie.contains("HttpOnly"));
        let body = json_body(response).await;
        assert_eq!(body["redirect"], "/primer-ingreso");
        assert_eq!(body["user"]["role"], "MAESTRO");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = test_app();
        app.db.insert_account(teacher_account("ana"));

        let response = send(&app, post_form("/login", None, "username=ana&password=nope")).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Planning
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn uploaded_planning_appears_in_teacher_list() {
        let app = test_app();
        let account = teacher_account("ana");
        app.db.insert_account(account.clone());
        let cookie = session_for(&app, &account.to_authenticated_user()).await;

        let response = send(&app, planning_upload(&cookie, "SEP-Q1", "plan.pdf", "%PDF-1.4")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["document"]["status"], "EN_REVISION");
        assert_eq!(created["cycle"]["source"], "fallback");
        assert_eq!(app.storage.file_count(), 1);

        let response = send(&app, get("/mis-planeaciones?periodo=SEP-Q1", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let listed = json_body(response).await;
        let documents = listed["documents"].as_array().unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0]["file_name"], "plan.pdf");
        assert!(documents[0]["file_url"]
            .as_str()
            .unwrap()
            .starts_with("/archivos/planeaciones/"));
    }

    #[tokio::test]
    async fn director_upload_is_forbidden() {
        let app = test_app();
        let cookie = session_for(&app, &director()).await;

        let response = send(&app, planning_upload(&cookie, "SEP-Q1", "plan.pdf", "%PDF-1.4")).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(app.storage.file_count(), 0);
        assert_eq!(app.db.document_count(), 0);
    }

    #[tokio::test]
    async fn upload_without_file_is_rejected() {
        let app = test_app();
        let account = teacher_account("ana");
        app.db.insert_account(account.clone());
        let cookie = session_for(&app, &account.to_authenticated_user()).await;

        let response = send(&app, planning_upload(&cookie, "SEP-Q1", "plan.pdf", "")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.db.document_count(), 0);
    }

    #[tokio::test]
    async fn kanban_requires_a_period() {
        let app = test_app();
        let cookie = session_for(&app, &director()).await;

        let response = send(&app, get("/director/kanban", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn approving_unknown_document_is_not_found() {
        let app = test_app();
        let cookie = session_for(&app, &director()).await;
        let body = format!("id_planeacion={}&feedback=Bien", AccountId::new());

        let response = send(&app, post_form("/director/aprobar-feedback", Some(&cookie), &body)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Cycles and soft duplicates
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn creating_a_cycle_twice_returns_warning() {
        let app = test_app();
        let cookie = session_for(&app, &director()).await;

        let first = send(&app, post_form("/director/crear-ciclo", Some(&cookie), "nombre=2025-2026")).await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = send(&app, post_form("/director/crear-ciclo", Some(&cookie), "nombre=2025-2026")).await;
        assert_eq!(second.status(), StatusCode::OK);
        let body = json_body(second).await;
        assert_eq!(body["status"], "warning");
    }

    #[tokio::test]
    async fn selecting_a_cycle_reissues_the_session() {
        let app = test_app();
        let cookie = session_for(&app, &director()).await;
        send(&app, post_form("/director/crear-ciclo", Some(&cookie), "nombre=2023-2024")).await;

        let response = send(&app, post_form("/director/cambiar-ciclo", Some(&cookie), "ciclo=2023-2024")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let new_cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let listed = json_body(send(&app, get("/director/ciclos", Some(&new_cookie))).await).await;
        assert_eq!(listed["current"]["name"], "2023-2024");
        assert_eq!(listed["current"]["source"], "selected");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Attendance
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn justify_rejects_malformed_date() {
        let app = test_app();
        let cookie = session_for(&app, &director()).await;
        let body = format!("id_alumno={}&fecha=14/03/2025", AccountId::new());

        let response = send(&app, post_form("/director/justificar", Some(&cookie), &body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
