use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveTime;
use quadra_core::{
    errors::QuadraError,
    models::local::{CriarLocalRequest, HorarioFuncionamento, LocalResponse},
    models::usuario::Papel,
};
use sqlx::PgPool;
use std::sync::Arc;

use quadra_db::models::DbLocal;

use crate::{
    handlers::disponibilidade::horario_do_db,
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

fn validar_horario(horario: &HorarioFuncionamento) -> Result<(), AppError> {
    if horario.dia_semana > 6 {
        return Err(AppError(QuadraError::Validation(format!(
            "Dia da semana inválido: {}",
            horario.dia_semana
        ))));
    }
    if horario.aberto && horario.janela().is_none() {
        return Err(AppError(QuadraError::Validation(format!(
            "Horário de funcionamento inválido para o dia {}: abertura deve ser anterior ao fechamento",
            horario.dia_semana
        ))));
    }
    Ok(())
}

async fn local_response(pool: &PgPool, local: DbLocal) -> Result<LocalResponse, AppError> {
    let horarios = quadra_db::repositories::local::get_horarios_by_local(pool, local.id)
        .await
        .map_err(QuadraError::Database)?;

    let mut convertidos = Vec::with_capacity(horarios.len());
    for horario in &horarios {
        convertidos.push(horario_do_db(horario)?);
    }

    Ok(LocalResponse {
        id: local.id,
        nome: local.nome,
        endereco: local.endereco,
        cidade: local.cidade,
        esporte: local.esporte,
        valor_hora: local.valor_hora,
        horarios: convertidos,
    })
}

/// `POST /api/locais` — locador only; the weekday schedule rides along.
#[axum::debug_handler]
pub async fn criar_local(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
    Json(payload): Json<CriarLocalRequest>,
) -> Result<(StatusCode, Json<LocalResponse>), AppError> {
    if usuario.papel != Papel::Locador {
        return Err(AppError(QuadraError::Authorization(
            "Apenas locadores podem cadastrar locais".to_string(),
        )));
    }

    if payload.nome.trim().is_empty() {
        return Err(AppError(QuadraError::Validation(
            "Nome do local é obrigatório".to_string(),
        )));
    }
    for horario in &payload.horarios {
        validar_horario(horario)?;
    }

    let local = quadra_db::repositories::local::create_local(
        &state.db_pool,
        usuario.id,
        &payload.nome,
        &payload.endereco,
        &payload.cidade,
        &payload.esporte,
        payload.valor_hora,
    )
    .await
    .map_err(QuadraError::Database)?;

    for horario in &payload.horarios {
        let abertura: Option<NaiveTime> = horario.abertura.map(Into::into);
        let fechamento: Option<NaiveTime> = horario.fechamento.map(Into::into);
        quadra_db::repositories::local::upsert_horario(
            &state.db_pool,
            local.id,
            horario.dia_semana as i16,
            horario.aberto,
            abertura,
            fechamento,
        )
        .await
        .map_err(QuadraError::Database)?;
    }

    tracing::info!("Local criado: id={}, nome={}", local.id, local.nome);

    let response = local_response(&state.db_pool, local).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/locais` — public court listing.
#[axum::debug_handler]
pub async fn listar_locais(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<LocalResponse>>, AppError> {
    let locais = quadra_db::repositories::local::list_locais(&state.db_pool)
        .await
        .map_err(QuadraError::Database)?;

    let mut response = Vec::with_capacity(locais.len());
    for local in locais {
        response.push(local_response(&state.db_pool, local).await?);
    }

    Ok(Json(response))
}

/// `GET /api/locais/:id` — public court detail.
#[axum::debug_handler]
pub async fn get_local(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<LocalResponse>, AppError> {
    let local = quadra_db::repositories::local::get_local_by_id(&state.db_pool, id)
        .await
        .map_err(QuadraError::Database)?
        .ok_or_else(|| QuadraError::NotFound(format!("Local com ID {} não encontrado", id)))?;

    let response = local_response(&state.db_pool, local).await?;
    Ok(Json(response))
}
