use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUsuario {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub papel: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSessao {
    pub token: Uuid,
    pub usuario_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLocal {
    pub id: i64,
    pub locador_id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub cidade: String,
    pub esporte: String,
    pub valor_hora: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHorarioFuncionamento {
    pub id: i64,
    pub local_id: i64,
    pub dia_semana: i16,
    pub aberto: bool,
    pub abertura: Option<NaiveTime>,
    pub fechamento: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAgendamento {
    pub id: i64,
    pub local_id: i64,
    pub jogador_id: Uuid,
    pub data: NaiveDate,
    pub inicio: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMensalidade {
    pub id: i64,
    pub local_id: i64,
    pub jogador_id: Uuid,
    pub dia_semana: i16,
    pub inicio: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
