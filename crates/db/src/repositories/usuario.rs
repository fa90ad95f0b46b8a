use crate::models::{DbSessao, DbUsuario};
use chrono::{Duration, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_usuario(
    pool: &Pool<Postgres>,
    nome: &str,
    email: &str,
    senha_hash: &str,
    papel: &str,
) -> Result<DbUsuario> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating usuario: id={}, email={}, papel={}", id, email, papel);

    let usuario = sqlx::query_as::<_, DbUsuario>(
        r#"
        INSERT INTO usuarios (id, nome, email, senha_hash, papel, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, nome, email, senha_hash, papel, created_at
        "#,
    )
    .bind(id)
    .bind(nome)
    .bind(email)
    .bind(senha_hash)
    .bind(papel)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(usuario)
}

pub async fn get_usuario_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUsuario>> {
    let usuario = sqlx::query_as::<_, DbUsuario>(
        r#"
        SELECT id, nome, email, senha_hash, papel, created_at
        FROM usuarios
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(usuario)
}

pub async fn get_usuario_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUsuario>> {
    let usuario = sqlx::query_as::<_, DbUsuario>(
        r#"
        SELECT id, nome, email, senha_hash, papel, created_at
        FROM usuarios
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(usuario)
}

pub async fn create_sessao(
    pool: &Pool<Postgres>,
    usuario_id: Uuid,
    ttl_hours: i64,
) -> Result<DbSessao> {
    let token = Uuid::new_v4();
    let now = Utc::now();
    let expires_at = now + Duration::hours(ttl_hours);

    let sessao = sqlx::query_as::<_, DbSessao>(
        r#"
        INSERT INTO sessoes (token, usuario_id, created_at, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING token, usuario_id, created_at, expires_at
        "#,
    )
    .bind(token)
    .bind(usuario_id)
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(sessao)
}

pub async fn get_sessao(pool: &Pool<Postgres>, token: Uuid) -> Result<Option<DbSessao>> {
    let sessao = sqlx::query_as::<_, DbSessao>(
        r#"
        SELECT token, usuario_id, created_at, expires_at
        FROM sessoes
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(sessao)
}

pub async fn delete_sessao(pool: &Pool<Postgres>, token: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM sessoes
        WHERE token = $1
        "#,
    )
    .bind(token)
    .execute(pool)
    .await?;

    Ok(())
}
