use axum::{extract::State, Json};
use quadra_core::{
    errors::QuadraError,
    models::usuario::{LoginRequest, LoginResponse, Papel, RegistrarRequest, Usuario},
};
use std::sync::Arc;

use crate::{
    middleware::{auth, auth::CurrentUser, error_handling::AppError},
    ApiState,
};

fn usuario_response(db: quadra_db::models::DbUsuario) -> Result<Usuario, AppError> {
    let papel = Papel::parse(&db.papel).ok_or_else(|| {
        AppError(QuadraError::Internal(
            format!("Papel desconhecido: {}", db.papel).into(),
        ))
    })?;
    Ok(Usuario {
        id: db.id,
        nome: db.nome,
        email: db.email,
        papel,
        created_at: db.created_at,
    })
}

#[axum::debug_handler]
pub async fn registrar(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegistrarRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.nome.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError(QuadraError::Validation(
            "Nome e e-mail são obrigatórios".to_string(),
        )));
    }
    if payload.senha.len() < 6 {
        return Err(AppError(QuadraError::Validation(
            "A senha deve ter pelo menos 6 caracteres".to_string(),
        )));
    }

    let existente =
        quadra_db::repositories::usuario::get_usuario_by_email(&state.db_pool, &payload.email)
            .await
            .map_err(QuadraError::Database)?;
    if existente.is_some() {
        return Err(AppError(QuadraError::Conflict(
            "E-mail já cadastrado".to_string(),
        )));
    }

    let senha_hash = auth::hash_password(&payload.senha)?;

    let db_usuario = quadra_db::repositories::usuario::create_usuario(
        &state.db_pool,
        &payload.nome,
        &payload.email,
        &senha_hash,
        payload.papel.as_str(),
    )
    .await
    .map_err(QuadraError::Database)?;

    let sessao = quadra_db::repositories::usuario::create_sessao(
        &state.db_pool,
        db_usuario.id,
        state.session_ttl_hours,
    )
    .await
    .map_err(QuadraError::Database)?;

    let response = LoginResponse {
        token: sessao.token.to_string(),
        usuario: usuario_response(db_usuario)?,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let db_usuario =
        quadra_db::repositories::usuario::get_usuario_by_email(&state.db_pool, &payload.email)
            .await
            .map_err(QuadraError::Database)?
            .ok_or_else(|| QuadraError::Authentication("Credenciais inválidas".to_string()))?;

    let is_valid = auth::verify_password(&payload.senha, &db_usuario.senha_hash)?;
    if !is_valid {
        return Err(AppError(QuadraError::Authentication(
            "Credenciais inválidas".to_string(),
        )));
    }

    let sessao = quadra_db::repositories::usuario::create_sessao(
        &state.db_pool,
        db_usuario.id,
        state.session_ttl_hours,
    )
    .await
    .map_err(QuadraError::Database)?;

    tracing::info!("Usuário autenticado: {}", db_usuario.email);

    let response = LoginResponse {
        token: sessao.token.to_string(),
        usuario: usuario_response(db_usuario)?,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    usuario: CurrentUser,
) -> Result<Json<serde_json::Value>, AppError> {
    quadra_db::repositories::usuario::delete_sessao(&state.db_pool, usuario.token)
        .await
        .map_err(QuadraError::Database)?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
