use crate::models::DbMensalidade;
use chrono::{NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_mensalidade(
    pool: &Pool<Postgres>,
    local_id: i64,
    jogador_id: Uuid,
    dia_semana: i16,
    inicio: NaiveTime,
) -> Result<DbMensalidade> {
    let now = Utc::now();

    tracing::debug!(
        "Creating mensalidade: local_id={}, jogador_id={}, dia_semana={}, inicio={}",
        local_id,
        jogador_id,
        dia_semana,
        inicio
    );

    let mensalidade = sqlx::query_as::<_, DbMensalidade>(
        r#"
        INSERT INTO mensalidades (local_id, jogador_id, dia_semana, inicio, status, created_at)
        VALUES ($1, $2, $3, $4, 'solicitada', $5)
        RETURNING id, local_id, jogador_id, dia_semana, inicio, status, created_at
        "#,
    )
    .bind(local_id)
    .bind(jogador_id)
    .bind(dia_semana)
    .bind(inicio)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(mensalidade)
}

pub async fn get_mensalidade_by_id(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbMensalidade>> {
    let mensalidade = sqlx::query_as::<_, DbMensalidade>(
        r#"
        SELECT id, local_id, jogador_id, dia_semana, inicio, status, created_at
        FROM mensalidades
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(mensalidade)
}

pub async fn get_mensalidades_by_status(
    pool: &Pool<Postgres>,
    local_id: i64,
    dia_semana: i16,
    status: &str,
) -> Result<Vec<DbMensalidade>> {
    let mensalidades = sqlx::query_as::<_, DbMensalidade>(
        r#"
        SELECT id, local_id, jogador_id, dia_semana, inicio, status, created_at
        FROM mensalidades
        WHERE local_id = $1 AND dia_semana = $2 AND status = $3
        ORDER BY inicio ASC
        "#,
    )
    .bind(local_id)
    .bind(dia_semana)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(mensalidades)
}

pub async fn get_mensalidade_ativa(
    pool: &Pool<Postgres>,
    local_id: i64,
    dia_semana: i16,
    inicio: NaiveTime,
) -> Result<Option<DbMensalidade>> {
    let mensalidade = sqlx::query_as::<_, DbMensalidade>(
        r#"
        SELECT id, local_id, jogador_id, dia_semana, inicio, status, created_at
        FROM mensalidades
        WHERE local_id = $1 AND dia_semana = $2 AND inicio = $3 AND status = 'ativa'
        "#,
    )
    .bind(local_id)
    .bind(dia_semana)
    .bind(inicio)
    .fetch_optional(pool)
    .await?;

    Ok(mensalidade)
}

pub async fn list_mensalidades_by_local(
    pool: &Pool<Postgres>,
    local_id: i64,
) -> Result<Vec<DbMensalidade>> {
    let mensalidades = sqlx::query_as::<_, DbMensalidade>(
        r#"
        SELECT id, local_id, jogador_id, dia_semana, inicio, status, created_at
        FROM mensalidades
        WHERE local_id = $1
        ORDER BY dia_semana ASC, inicio ASC
        "#,
    )
    .bind(local_id)
    .fetch_all(pool)
    .await?;

    Ok(mensalidades)
}

pub async fn atualizar_status_mensalidade(
    pool: &Pool<Postgres>,
    id: i64,
    status: &str,
) -> Result<DbMensalidade> {
    let mensalidade = sqlx::query_as::<_, DbMensalidade>(
        r#"
        UPDATE mensalidades
        SET status = $2
        WHERE id = $1
        RETURNING id, local_id, jogador_id, dia_semana, inicio, status, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(mensalidade)
}
