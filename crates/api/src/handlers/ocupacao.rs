//! # Occupancy Summary Handler
//!
//! The venue owner's dashboard shows, for one date, how full each of their
//! courts is. The summary reuses the same slot derivation as the public
//! availability endpoint (owner view, so pending requests are visible there)
//! and collapses it into per-court counters.

use axum::{
    extract::{Query, State},
    Json,
};
use quadra_core::{
    errors::QuadraError,
    models::disponibilidade::{DisponibilidadeQuery, OcupacaoLocal, OcupacaoResponse},
    models::usuario::Papel,
};
use std::sync::Arc;

use crate::{
    handlers::disponibilidade::disponibilidade_do_dia,
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

/// `GET /api/locadores/me/ocupacao?data=YYYY-MM-DD`
#[axum::debug_handler]
pub async fn get_ocupacao(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
    Query(query): Query<DisponibilidadeQuery>,
) -> Result<Json<OcupacaoResponse>, AppError> {
    if usuario.papel != Papel::Locador {
        return Err(AppError(QuadraError::Authorization(
            "Apenas locadores têm painel de ocupação".to_string(),
        )));
    }

    let locais =
        quadra_db::repositories::local::list_locais_by_locador(&state.db_pool, usuario.id)
            .await
            .map_err(QuadraError::Database)?;

    let mut resumos = Vec::with_capacity(locais.len());
    for local in &locais {
        let disponibilidade =
            disponibilidade_do_dia(&state.db_pool, local, query.data, true).await?;
        resumos.push(OcupacaoLocal::resumir(
            local.id,
            local.nome.clone(),
            &disponibilidade,
        ));
    }

    Ok(Json(OcupacaoResponse {
        data: query.data,
        locais: resumos,
    }))
}
