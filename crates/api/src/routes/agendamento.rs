use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/agendamentos",
            post(handlers::agendamento::criar_agendamento),
        )
        .route(
            "/api/agendamentos",
            get(handlers::agendamento::listar_meus_agendamentos),
        )
        .route(
            "/api/agendamentos/:id",
            delete(handlers::agendamento::cancelar_agendamento),
        )
}
