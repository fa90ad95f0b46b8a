use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/mensalidades",
            post(handlers::mensalidade::criar_mensalidade),
        )
        .route(
            "/api/locais/:id/mensalidades",
            get(handlers::mensalidade::listar_mensalidades_do_local),
        )
        .route(
            "/api/mensalidades/:id/confirmar",
            put(handlers::mensalidade::confirmar_mensalidade),
        )
        .route(
            "/api/mensalidades/:id",
            delete(handlers::mensalidade::cancelar_mensalidade),
        )
}
