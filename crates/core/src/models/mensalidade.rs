use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMensalidade {
    Solicitada,
    Ativa,
    Cancelada,
}

impl StatusMensalidade {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusMensalidade::Solicitada => "solicitada",
            StatusMensalidade::Ativa => "ativa",
            StatusMensalidade::Cancelada => "cancelada",
        }
    }

    pub fn parse(value: &str) -> Option<StatusMensalidade> {
        match value {
            "solicitada" => Some(StatusMensalidade::Solicitada),
            "ativa" => Some(StatusMensalidade::Ativa),
            "cancelada" => Some(StatusMensalidade::Cancelada),
            _ => None,
        }
    }
}

/// A recurring weekly hold on one hourly slot of a court.
///
/// Requested by a player, pending (`solicitada`) until the court's owner
/// approves it, then `ativa` and occupying the slot every week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mensalidade {
    pub id: i64,
    pub local_id: i64,
    pub jogador_id: Uuid,
    pub dia_semana: u8,
    pub inicio: TimeOfDay,
    pub status: StatusMensalidade,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/mensalidades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarMensalidadeRequest {
    pub local_id: i64,
    pub dia_semana: u8,
    pub inicio: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MensalidadeResponse {
    pub id: i64,
    pub local_id: i64,
    pub dia_semana: u8,
    pub inicio: TimeOfDay,
    pub status: StatusMensalidade,
}
