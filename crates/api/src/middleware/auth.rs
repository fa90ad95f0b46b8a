//! # Authentication Module
//!
//! Password hashing with Argon2 and the `CurrentUser` extractor that turns an
//! `Authorization: Bearer <token>` header into the authenticated user for a
//! request. Session tokens are opaque UUIDs persisted server-side; an unknown
//! or expired token is rejected as an authentication error (HTTP 401) so the
//! client can surface its session-expired message.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use eyre::Result;
use quadra_core::{errors::QuadraError, models::usuario::Papel};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a password using the Argon2 algorithm.
///
/// Generates a random salt per password and returns the PHC string format
/// (algorithm, version, parameters, salt, and hash).
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a plain text password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(is_valid)
}

/// The authenticated user behind a request's session token.
///
/// Handlers that require authentication take this as an extractor argument;
/// handlers where authentication only changes the view (the owner's
/// availability view) take `Option<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub nome: String,
    pub papel: Papel,
    /// The session token the request authenticated with, kept for logout.
    pub token: Uuid,
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError(QuadraError::Authentication(
                    "Missing Authorization header".to_string(),
                ))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(QuadraError::Authentication(
                "Authorization header must be a Bearer token".to_string(),
            ))
        })?;

        let token = Uuid::parse_str(token.trim()).map_err(|_| {
            AppError(QuadraError::Authentication("Invalid session token".to_string()))
        })?;

        let sessao = quadra_db::repositories::usuario::get_sessao(&state.db_pool, token)
            .await
            .map_err(QuadraError::Database)?
            .ok_or_else(|| {
                QuadraError::Authentication("Sessão expirada. Faça login novamente.".to_string())
            })?;

        if sessao.expires_at < Utc::now() {
            return Err(AppError(QuadraError::Authentication(
                "Sessão expirada. Faça login novamente.".to_string(),
            )));
        }

        let usuario =
            quadra_db::repositories::usuario::get_usuario_by_id(&state.db_pool, sessao.usuario_id)
                .await
                .map_err(QuadraError::Database)?
                .ok_or_else(|| {
                    QuadraError::Authentication("Sessão órfã, usuário removido".to_string())
                })?;

        let papel = Papel::parse(&usuario.papel).ok_or_else(|| {
            QuadraError::Internal(format!("Papel desconhecido: {}", usuario.papel).into())
        })?;

        Ok(CurrentUser {
            id: usuario.id,
            nome: usuario.nome,
            papel,
            token,
        })
    }
}
