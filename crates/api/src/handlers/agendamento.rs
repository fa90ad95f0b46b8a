//! # Booking Handlers
//!
//! Creating a booking is the one write with real contention: two players can
//! race for the same slot. The handler pre-checks occupancy and answers
//! `409 Conflict` when the slot is taken; the partial unique index on
//! confirmed bookings settles any race the pre-check missed, and that
//! database rejection is translated to the same 409.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveTime;
use quadra_core::{
    errors::QuadraError,
    models::agendamento::{AgendamentoResponse, CriarAgendamentoRequest, StatusAgendamento},
    models::usuario::Papel,
    time::{dia_semana, slots_de_hora, TimeOfDay, SLOT_MINUTES},
};
use std::sync::Arc;

use quadra_db::models::DbAgendamento;

use crate::{
    handlers::disponibilidade::horario_do_db,
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

const MSG_HORARIO_RESERVADO: &str = "Horário já reservado. Escolha outro horário.";

fn agendamento_response(db: DbAgendamento) -> Result<AgendamentoResponse, AppError> {
    let inicio = TimeOfDay::try_from(db.inicio)
        .map_err(|e| AppError(QuadraError::Internal(e.to_string().into())))?;
    let fim = inicio
        .checked_add_minutes(SLOT_MINUTES)
        .ok_or_else(|| AppError(QuadraError::Internal("Slot cruza a meia-noite".into())))?;
    let status = StatusAgendamento::parse(&db.status).ok_or_else(|| {
        AppError(QuadraError::Internal(
            format!("Status desconhecido: {}", db.status).into(),
        ))
    })?;

    Ok(AgendamentoResponse {
        id: db.id,
        local_id: db.local_id,
        data: db.data,
        inicio,
        fim,
        status,
    })
}

/// Maps a unique index violation to the booking conflict, anything else to a
/// database error.
fn conflito_ou_db(err: eyre::Report) -> AppError {
    if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
        if db_err.code().as_deref() == Some("23505") {
            return AppError(QuadraError::Conflict(MSG_HORARIO_RESERVADO.to_string()));
        }
    }
    AppError(QuadraError::Database(err))
}

/// `POST /api/agendamentos` body `{ localId, data, inicio }`
#[axum::debug_handler]
pub async fn criar_agendamento(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
    Json(payload): Json<CriarAgendamentoRequest>,
) -> Result<(StatusCode, Json<AgendamentoResponse>), AppError> {
    if usuario.papel != Papel::Jogador {
        return Err(AppError(QuadraError::Authorization(
            "Apenas jogadores podem reservar horários".to_string(),
        )));
    }

    let local = quadra_db::repositories::local::get_local_by_id(&state.db_pool, payload.local_id)
        .await
        .map_err(QuadraError::Database)?
        .ok_or_else(|| {
            QuadraError::NotFound(format!("Local com ID {} não encontrado", payload.local_id))
        })?;

    // The requested start must be one of the day's generated slot starts
    let dia = dia_semana(payload.data) as i16;
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

    let ja_reservado = quadra_db::repositories::agendamento::get_agendamento_confirmado(
        &state.db_pool,
        local.id,
        payload.data,
        inicio,
    )
    .await
    .map_err(QuadraError::Database)?
    .is_some();

    let mensalista = quadra_db::repositories::mensalidade::get_mensalidade_ativa(
        &state.db_pool,
        local.id,
        dia,
        inicio,
    )
    .await
    .map_err(QuadraError::Database)?
    .is_some();

    if ja_reservado || mensalista {
        return Err(AppError(QuadraError::Conflict(
            MSG_HORARIO_RESERVADO.to_string(),
        )));
    }

    let db_agendamento = quadra_db::repositories::agendamento::create_agendamento(
        &state.db_pool,
        local.id,
        usuario.id,
        payload.data,
        inicio,
    )
    .await
    .map_err(conflito_ou_db)?;

    tracing::info!(
        "Agendamento criado: id={}, local_id={}, data={}, inicio={}",
        db_agendamento.id,
        db_agendamento.local_id,
        db_agendamento.data,
        db_agendamento.inicio
    );

    Ok((StatusCode::CREATED, Json(agendamento_response(db_agendamento)?)))
}

/// `GET /api/agendamentos` — the authenticated player's bookings.
#[axum::debug_handler]
pub async fn listar_meus_agendamentos(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
) -> Result<Json<Vec<AgendamentoResponse>>, AppError> {
    let agendamentos = quadra_db::repositories::agendamento::list_agendamentos_by_jogador(
        &state.db_pool,
        usuario.id,
    )
    .await
    .map_err(QuadraError::Database)?;

    let mut response = Vec::with_capacity(agendamentos.len());
    for agendamento in agendamentos {
        response.push(agendamento_response(agendamento)?);
    }

    Ok(Json(response))
}

/// `DELETE /api/agendamentos/:id` — cancel a booking.
///
/// Allowed to the booking's player and to the court's owner.
#[axum::debug_handler]
pub async fn cancelar_agendamento(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<AgendamentoResponse>, AppError> {
    let agendamento = quadra_db::repositories::agendamento::get_agendamento_by_id(
        &state.db_pool,
        id,
    )
    .await
    .map_err(QuadraError::Database)?
    .ok_or_else(|| QuadraError::NotFound(format!("Agendamento com ID {} não encontrado", id)))?;

    let local =
        quadra_db::repositories::local::get_local_by_id(&state.db_pool, agendamento.local_id)
            .await
            .map_err(QuadraError::Database)?
            .ok_or_else(|| {
                QuadraError::NotFound(format!(
                    "Local com ID {} não encontrado",
                    agendamento.local_id
                ))
            })?;

    let permitido = usuario.id == agendamento.jogador_id || usuario.id == local.locador_id;
    if !permitido {
        return Err(AppError(QuadraError::Authorization(
            "Sem permissão para cancelar esse agendamento".to_string(),
        )));
    }

    if agendamento.status == "cancelado" {
        return Err(AppError(QuadraError::Conflict(
            "Agendamento já cancelado".to_string(),
        )));
    }

    let cancelado =
        quadra_db::repositories::agendamento::cancelar_agendamento(&state.db_pool, id)
            .await
            .map_err(QuadraError::Database)?;

    Ok(Json(agendamento_response(cancelado)?))
}
