//! HTTP routes for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{
    create_teacher, first_login_page, login, login_page, logout, save_new_password,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page))
        .route("/login", post(login))
        .route("/primer-ingreso", get(first_login_page))
        .route("/logout", get(logout))
        .route("/guardar-nuevo-password", post(save_new_password))
        .route("/director/crear-maestro", post(create_teacher))
}
