//! HTTP routes for academic cycle endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{activate_cycle, create_cycle, list_cycles, select_cycle};

pub fn academic_cycle_routes() -> Router<AppState> {
    Router::new()
        .route("/director/ciclos", get(list_cycles))
        .route("/director/crear-ciclo", post(create_cycle))
        .route("/director/activar-ciclo/:id", get(activate_cycle))
        .route("/director/cambiar-ciclo", post(select_cycle))
}
