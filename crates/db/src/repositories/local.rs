use crate::models::{DbHorarioFuncionamento, DbLocal};
use chrono::{NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_local(
    pool: &Pool<Postgres>,
    locador_id: Uuid,
    nome: &str,
    endereco: &str,
    cidade: &str,
    esporte: &str,
    valor_hora: i64,
) -> Result<DbLocal> {
    let now = Utc::now();

    tracing::debug!("Creating local: nome={}, locador_id={}", nome, locador_id);

    let local = sqlx::query_as::<_, DbLocal>(
        r#"
        INSERT INTO locais (locador_id, nome, endereco, cidade, esporte, valor_hora, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, locador_id, nome, endereco, cidade, esporte, valor_hora, created_at
        "#,
    )
    .bind(locador_id)
    .bind(nome)
    .bind(endereco)
    .bind(cidade)
    .bind(esporte)
    .bind(valor_hora)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(local)
}

pub async fn get_local_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbLocal>> {
    let local = sqlx::query_as::<_, DbLocal>(
        r#"
        SELECT id, locador_id, nome, endereco, cidade, esporte, valor_hora, created_at
        FROM locais
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(local)
}

pub async fn list_locais(pool: &Pool<Postgres>) -> Result<Vec<DbLocal>> {
    let locais = sqlx::query_as::<_, DbLocal>(
        r#"
        SELECT id, locador_id, nome, endereco, cidade, esporte, valor_hora, created_at
        FROM locais
        ORDER BY nome ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(locais)
}

pub async fn list_locais_by_locador(
    pool: &Pool<Postgres>,
    locador_id: Uuid,
) -> Result<Vec<DbLocal>> {
    let locais = sqlx::query_as::<_, DbLocal>(
        r#"
        SELECT id, locador_id, nome, endereco, cidade, esporte, valor_hora, created_at
        FROM locais
        WHERE locador_id = $1
        ORDER BY nome ASC
        "#,
    )
    .bind(locador_id)
    .fetch_all(pool)
    .await?;

    Ok(locais)
}

pub async fn upsert_horario(
    pool: &Pool<Postgres>,
    local_id: i64,
    dia_semana: i16,
    aberto: bool,
    abertura: Option<NaiveTime>,
    fechamento: Option<NaiveTime>,
) -> Result<DbHorarioFuncionamento> {
    let horario = sqlx::query_as::<_, DbHorarioFuncionamento>(
        r#"
        INSERT INTO horarios_funcionamento (local_id, dia_semana, aberto, abertura, fechamento)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (local_id, dia_semana)
        DO UPDATE SET aberto = $3, abertura = $4, fechamento = $5
        RETURNING id, local_id, dia_semana, aberto, abertura, fechamento
        "#,
    )
    .bind(local_id)
    .bind(dia_semana)
    .bind(aberto)
    .bind(abertura)
    .bind(fechamento)
    .fetch_one(pool)
    .await?;

    Ok(horario)
}

pub async fn get_horarios_by_local(
    pool: &Pool<Postgres>,
    local_id: i64,
) -> Result<Vec<DbHorarioFuncionamento>> {
    let horarios = sqlx::query_as::<_, DbHorarioFuncionamento>(
        r#"
        SELECT id, local_id, dia_semana, aberto, abertura, fechamento
        FROM horarios_funcionamento
        WHERE local_id = $1
        ORDER BY dia_semana ASC
        "#,
    )
    .bind(local_id)
    .fetch_all(pool)
    .await?;

    Ok(horarios)
}

pub async fn get_horario_by_local_and_dia(
    pool: &Pool<Postgres>,
    local_id: i64,
    dia_semana: i16,
) -> Result<Option<DbHorarioFuncionamento>> {
    let horario = sqlx::query_as::<_, DbHorarioFuncionamento>(
        r#"
        SELECT id, local_id, dia_semana, aberto, abertura, fechamento
        FROM horarios_funcionamento
        WHERE local_id = $1 AND dia_semana = $2
        "#,
    )
    .bind(local_id)
    .bind(dia_semana)
    .fetch_optional(pool)
    .await?;

    Ok(horario)
}
