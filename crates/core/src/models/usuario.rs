use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marketplace role: players book courts, locadores own and manage them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Papel {
    Jogador,
    Locador,
}

impl Papel {
    pub fn as_str(self) -> &'static str {
        match self {
            Papel::Jogador => "jogador",
            Papel::Locador => "locador",
        }
    }

    pub fn parse(value: &str) -> Option<Papel> {
        match value {
            "jogador" => Some(Papel::Jogador),
            "locador" => Some(Papel::Locador),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub papel: Papel,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub papel: Papel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: Usuario,
}
