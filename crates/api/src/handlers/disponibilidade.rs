//! # Availability Handler
//!
//! Computes the slot list a client renders for one court and date. Slots are
//! derived on every request, never stored:
//!
//! 1. Resolve the weekday of the requested date (0 = Sunday .. 6 = Saturday)
//!    and load the court's operating window for that weekday. A closed or
//!    missing weekday short-circuits to `{ fechado: true, slots: [] }`.
//! 2. Generate the 60-minute slot starts between opening and closing time.
//! 3. Mark slots taken by confirmed bookings and active monthly
//!    subscriptions as `ocupado`.
//! 4. When the requester is the court's owner, additionally mark pending
//!    subscription requests as `solicitado`; players never see those.
//!
//! Re-fetching this endpoint after a booking is the client's only way to
//! learn the new occupancy; the server is the single source of truth.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use quadra_core::{
    errors::QuadraError,
    models::{
        disponibilidade::{montar_disponibilidade, Disponibilidade, DisponibilidadeQuery},
        local::HorarioFuncionamento,
    },
    time::{dia_semana, TimeOfDay},
};
use sqlx::PgPool;
use std::sync::Arc;

use quadra_db::models::{DbHorarioFuncionamento, DbLocal};

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

/// Converts a stored weekday window into the domain type.
pub(crate) fn horario_do_db(
    row: &DbHorarioFuncionamento,
) -> Result<HorarioFuncionamento, QuadraError> {
    let abertura = row
        .abertura
        .map(TimeOfDay::try_from)
        .transpose()
        .map_err(|e| QuadraError::Internal(e.to_string().into()))?;
    let fechamento = row
        .fechamento
        .map(TimeOfDay::try_from)
        .transpose()
        .map_err(|e| QuadraError::Internal(e.to_string().into()))?;

    Ok(HorarioFuncionamento {
        dia_semana: row.dia_semana as u8,
        aberto: row.aberto,
        abertura,
        fechamento,
    })
}

/// Loads everything the slot derivation needs and assembles the payload.
pub(crate) async fn disponibilidade_do_dia(
    pool: &PgPool,
    local: &DbLocal,
    data: NaiveDate,
    visao_locador: bool,
) -> Result<Disponibilidade, AppError> {
    let dia = dia_semana(data) as i16;

    let horario = quadra_db::repositories::local::get_horario_by_local_and_dia(pool, local.id, dia)
        .await
        .map_err(QuadraError::Database)?
        .as_ref()
        .map(horario_do_db)
        .transpose()?;

    let agendamentos =
        quadra_db::repositories::agendamento::get_agendamentos_confirmados(pool, local.id, data)
            .await
            .map_err(QuadraError::Database)?;

    let mensalidades_ativas = quadra_db::repositories::mensalidade::get_mensalidades_by_status(
        pool, local.id, dia, "ativa",
    )
    .await
    .map_err(QuadraError::Database)?;

    let mut ocupados = Vec::new();
    for inicio in agendamentos
        .iter()
        .map(|a| a.inicio)
        .chain(mensalidades_ativas.iter().map(|m| m.inicio))
    {
        let inicio =
            TimeOfDay::try_from(inicio).map_err(|e| QuadraError::Internal(e.to_string().into()))?;
        ocupados.push(inicio);
    }

    let mut solicitados = Vec::new();
    if visao_locador {
        let pendentes = quadra_db::repositories::mensalidade::get_mensalidades_by_status(
            pool,
            local.id,
            dia,
            "solicitada",
        )
        .await
        .map_err(QuadraError::Database)?;
        for mensalidade in &pendentes {
            let inicio = TimeOfDay::try_from(mensalidade.inicio)
                .map_err(|e| QuadraError::Internal(e.to_string().into()))?;
            solicitados.push(inicio);
        }
    }

    Ok(montar_disponibilidade(
        horario.as_ref(),
        &ocupados,
        &solicitados,
        visao_locador,
    ))
}

/// `GET /api/locais/:id/disponibilidade?data=YYYY-MM-DD`
///
/// Authentication is optional here: it only decides whether the owner view
/// (pending subscription requests as `solicitado`) is rendered.
#[axum::debug_handler]
pub async fn get_disponibilidade(
    State(state): State<Arc<ApiState>>,
    usuario: Option<CurrentUser>,
    Path(id): Path<i64>,
    Query(query): Query<DisponibilidadeQuery>,
) -> Result<Json<Disponibilidade>, AppError> {
    let local = quadra_db::repositories::local::get_local_by_id(&state.db_pool, id)
        .await
        .map_err(QuadraError::Database)?
        .ok_or_else(|| QuadraError::NotFound(format!("Local com ID {} não encontrado", id)))?;

    let visao_locador = usuario
        .map(|u| u.id == local.locador_id)
        .unwrap_or(false);

    let disponibilidade =
        disponibilidade_do_dia(&state.db_pool, &local, query.data, visao_locador).await?;

    Ok(Json(disponibilidade))
}
