//! # Monthly Subscription Handlers
//!
//! A mensalidade is a weekly recurring hold on one hourly slot. Players
//! request one; it stays `solicitada` (rendered as `solicitado` in the
//! owner's availability view only) until the court's owner confirms it, at
//! which point it turns `ativa` and occupies the slot every week.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveTime;
use quadra_core::{
    errors::QuadraError,
    models::mensalidade::{CriarMensalidadeRequest, MensalidadeResponse, StatusMensalidade},
    models::usuario::Papel,
    time::{slots_de_hora, TimeOfDay},
};
use std::sync::Arc;

use quadra_db::models::DbMensalidade;

use crate::{
    handlers::disponibilidade::horario_do_db,
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

fn mensalidade_response(db: DbMensalidade) -> Result<MensalidadeResponse, AppError> {
    let inicio = TimeOfDay::try_from(db.inicio)
        .map_err(|e| AppError(QuadraError::Internal(e.to_string().into())))?;
    let status = StatusMensalidade::parse(&db.status).ok_or_else(|| {
        AppError(QuadraError::Internal(
            format!("Status desconhecido: {}", db.status).into(),
        ))
    })?;

    Ok(MensalidadeResponse {
        id: db.id,
        local_id: db.local_id,
        dia_semana: db.dia_semana as u8,
        inicio,
        status,
    })
}

/// `POST /api/mensalidades` body `{ localId, diaSemana, inicio }`
#[axum::debug_handler]
pub async fn criar_mensalidade(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
    Json(payload): Json<CriarMensalidadeRequest>,
) -> Result<(StatusCode, Json<MensalidadeResponse>), AppError> {
    if usuario.papel != Papel::Jogador {
        return Err(AppError(QuadraError::Authorization(
            "Apenas jogadores podem solicitar mensalidades".to_string(),
        )));
    }
    if payload.dia_semana > 6 {
        return Err(AppError(QuadraError::Validation(format!(
            "Dia da semana inválido: {}",
            payload.dia_semana
        ))));
    }

    let local = quadra_db::repositories::local::get_local_by_id(&state.db_pool, payload.local_id)
        .await
        .map_err(QuadraError::Database)?
        .ok_or_else(|| {
            QuadraError::NotFound(format!("Local com ID {} não encontrado", payload.local_id))
        })?;

    let dia = payload.dia_semana as i16;
    let horario = quadra_db::repositories::local::get_horario_by_local_and_dia(
        &state.db_pool,
        local.id,
        dia,
    )
    .await
    .map_err(QuadraError::Database)?
    .as_ref()
    .map(horario_do_db)
    .transpose()?;

    let janela = horario.as_ref().and_then(|h| h.janela()).ok_or_else(|| {
        QuadraError::Validation("O local está fechado nesse dia".to_string())
    })?;

    if !slots_de_hora(janela.0, janela.1).contains(&payload.inicio) {
        return Err(AppError(QuadraError::Validation(
            "Horário fora do funcionamento do local".to_string(),
        )));
    }

    let inicio: NaiveTime = payload.inicio.into();

    let ocupado = quadra_db::repositories::mensalidade::get_mensalidade_ativa(
        &state.db_pool,
        local.id,
        dia,
        inicio,
    )
    .await
    .map_err(QuadraError::Database)?
    .is_some();

    if ocupado {
        return Err(AppError(QuadraError::Conflict(
            "Já existe uma mensalidade ativa nesse horário".to_string(),
        )));
    }

    let mensalidade = quadra_db::repositories::mensalidade::create_mensalidade(
        &state.db_pool,
        local.id,
        usuario.id,
        dia,
        inicio,
    )
    .await
    .map_err(QuadraError::Database)?;

    tracing::info!(
        "Mensalidade solicitada: id={}, local_id={}, dia_semana={}",
        mensalidade.id,
        mensalidade.local_id,
        mensalidade.dia_semana
    );

    Ok((StatusCode::CREATED, Json(mensalidade_response(mensalidade)?)))
}

/// `GET /api/locais/:id/mensalidades` — the court's owner reviews the
/// subscriptions (pending requests included) before confirming or refusing.
#[axum::debug_handler]
pub async fn listar_mensalidades_do_local(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MensalidadeResponse>>, AppError> {
    let local = quadra_db::repositories::local::get_local_by_id(&state.db_pool, id)
        .await
        .map_err(QuadraError::Database)?
        .ok_or_else(|| QuadraError::NotFound(format!("Local com ID {} não encontrado", id)))?;

    if usuario.id != local.locador_id {
        return Err(AppError(QuadraError::Authorization(
            "Apenas o locador do local pode listar mensalidades".to_string(),
        )));
    }

    let mensalidades =
        quadra_db::repositories::mensalidade::list_mensalidades_by_local(&state.db_pool, local.id)
            .await
            .map_err(QuadraError::Database)?;

    let mut response = Vec::with_capacity(mensalidades.len());
    for mensalidade in mensalidades {
        response.push(mensalidade_response(mensalidade)?);
    }

    Ok(Json(response))
}

/// `PUT /api/mensalidades/:id/confirmar` — the court's owner approves.
#[axum::debug_handler]
pub async fn confirmar_mensalidade(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<MensalidadeResponse>, AppError> {
    let mensalidade =
        quadra_db::repositories::mensalidade::get_mensalidade_by_id(&state.db_pool, id)
            .await
            .map_err(QuadraError::Database)?
            .ok_or_else(|| {
                QuadraError::NotFound(format!("Mensalidade com ID {} não encontrada", id))
            })?;

    let local =
        quadra_db::repositories::local::get_local_by_id(&state.db_pool, mensalidade.local_id)
            .await
            .map_err(QuadraError::Database)?
            .ok_or_else(|| {
                QuadraError::NotFound(format!(
                    "Local com ID {} não encontrado",
                    mensalidade.local_id
                ))
            })?;

    if usuario.id != local.locador_id {
        return Err(AppError(QuadraError::Authorization(
            "Apenas o locador do local pode confirmar mensalidades".to_string(),
        )));
    }

    if mensalidade.status != "solicitada" {
        return Err(AppError(QuadraError::Conflict(format!(
            "Mensalidade não está pendente (status: {})",
            mensalidade.status
        ))));
    }

    // Another request may have been approved for the same weekly slot first
    let ja_ocupado = quadra_db::repositories::mensalidade::get_mensalidade_ativa(
        &state.db_pool,
        mensalidade.local_id,
        mensalidade.dia_semana,
        mensalidade.inicio,
    )
    .await
    .map_err(QuadraError::Database)?
    .is_some();

    if ja_ocupado {
        return Err(AppError(QuadraError::Conflict(
            "Já existe uma mensalidade ativa nesse horário".to_string(),
        )));
    }

    let confirmada = quadra_db::repositories::mensalidade::atualizar_status_mensalidade(
        &state.db_pool,
        id,
        "ativa",
    )
    .await
    .map_err(QuadraError::Database)?;

    Ok(Json(mensalidade_response(confirmada)?))
}

/// `DELETE /api/mensalidades/:id` — the player or the court's owner cancels.
#[axum::debug_handler]
pub async fn cancelar_mensalidade(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<MensalidadeResponse>, AppError> {
    let mensalidade =
        quadra_db::repositories::mensalidade::get_mensalidade_by_id(&state.db_pool, id)
            .await
            .map_err(QuadraError::Database)?
            .ok_or_else(|| {
                QuadraError::NotFound(format!("Mensalidade com ID {} não encontrada", id))
            })?;

    let local =
        quadra_db::repositories::local::get_local_by_id(&state.db_pool, mensalidade.local_id)
            .await
            .map_err(QuadraError::Database)?
            .ok_or_else(|| {
                QuadraError::NotFound(format!(
                    "Local com ID {} não encontrado",
                    mensalidade.local_id
                ))
            })?;

    let permitido = usuario.id == mensalidade.jogador_id || usuario.id == local.locador_id;
    if !permitido {
        return Err(AppError(QuadraError::Authorization(
            "Sem permissão para cancelar essa mensalidade".to_string(),
        )));
    }

    if mensalidade.status == "cancelada" {
        return Err(AppError(QuadraError::Conflict(
            "Mensalidade já cancelada".to_string(),
        )));
    }

    let cancelada = quadra_db::repositories::mensalidade::atualizar_status_mensalidade(
        &state.db_pool,
        id,
        "cancelada",
    )
    .await
    .map_err(QuadraError::Database)?;

    Ok(Json(mensalidade_response(cancelada)?))
}
