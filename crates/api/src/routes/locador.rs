use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/locadores/me/ocupacao",
        get(handlers::ocupacao::get_ocupacao),
    )
}
