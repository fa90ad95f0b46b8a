use crate::models::DbAgendamento;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_agendamento(
    pool: &Pool<Postgres>,
    local_id: i64,
    jogador_id: Uuid,
    data: NaiveDate,
    inicio: NaiveTime,
) -> Result<DbAgendamento> {
    let now = Utc::now();

    tracing::debug!(
        "Creating agendamento: local_id={}, jogador_id={}, data={}, inicio={}",
        local_id,
        jogador_id,
        data,
        inicio
    );

    let agendamento = sqlx::query_as::<_, DbAgendamento>(
        r#"
        INSERT INTO agendamentos (local_id, jogador_id, data, inicio, status, created_at)
        VALUES ($1, $2, $3, $4, 'confirmado', $5)
        RETURNING id, local_id, jogador_id, data, inicio, status, created_at
        "#,
    )
    .bind(local_id)
    .bind(jogador_id)
    .bind(data)
    .bind(inicio)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(agendamento)
}

pub async fn get_agendamento_by_id(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbAgendamento>> {
    let agendamento = sqlx::query_as::<_, DbAgendamento>(
        r#"
        SELECT id, local_id, jogador_id, data, inicio, status, created_at
        FROM agendamentos
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(agendamento)
}

pub async fn get_agendamento_confirmado(
    pool: &Pool<Postgres>,
    local_id: i64,
    data: NaiveDate,
    inicio: NaiveTime,
) -> Result<Option<DbAgendamento>> {
    let agendamento = sqlx::query_as::<_, DbAgendamento>(
        r#"
        SELECT id, local_id, jogador_id, data, inicio, status, created_at
        FROM agendamentos
        WHERE local_id = $1 AND data = $2 AND inicio = $3 AND status = 'confirmado'
        "#,
    )
    .bind(local_id)
    .bind(data)
    .bind(inicio)
    .fetch_optional(pool)
    .await?;

    Ok(agendamento)
}

pub async fn get_agendamentos_confirmados(
    pool: &Pool<Postgres>,
    local_id: i64,
    data: NaiveDate,
) -> Result<Vec<DbAgendamento>> {
    let agendamentos = sqlx::query_as::<_, DbAgendamento>(
        r#"
        SELECT id, local_id, jogador_id, data, inicio, status, created_at
        FROM agendamentos
        WHERE local_id = $1 AND data = $2 AND status = 'confirmado'
        ORDER BY inicio ASC
        "#,
    )
    .bind(local_id)
    .bind(data)
    .fetch_all(pool)
    .await?;

    Ok(agendamentos)
}

pub async fn list_agendamentos_by_jogador(
    pool: &Pool<Postgres>,
    jogador_id: Uuid,
) -> Result<Vec<DbAgendamento>> {
    let agendamentos = sqlx::query_as::<_, DbAgendamento>(
        r#"
        SELECT id, local_id, jogador_id, data, inicio, status, created_at
        FROM agendamentos
        WHERE jogador_id = $1
        ORDER BY data ASC, inicio ASC
        "#,
    )
    .bind(jogador_id)
    .fetch_all(pool)
    .await?;

    Ok(agendamentos)
}

pub async fn cancelar_agendamento(pool: &Pool<Postgres>, id: i64) -> Result<DbAgendamento> {
    let agendamento = sqlx::query_as::<_, DbAgendamento>(
        r#"
        UPDATE agendamentos
        SET status = 'cancelado'
        WHERE id = $1
        RETURNING id, local_id, jogador_id, data, inicio, status, created_at
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(agendamento)
}
