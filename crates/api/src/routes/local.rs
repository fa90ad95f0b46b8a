use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/locais", post(handlers::local::criar_local))
        .route("/api/locais", get(handlers::local::listar_locais))
        .route("/api/locais/:id", get(handlers::local::get_local))
        .route(
            "/api/locais/:id/disponibilidade",
            get(handlers::disponibilidade::get_disponibilidade),
        )
}
