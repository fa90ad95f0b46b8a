use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAgendamento {
    Confirmado,
    Cancelado,
}

impl StatusAgendamento {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusAgendamento::Confirmado => "confirmado",
            StatusAgendamento::Cancelado => "cancelado",
        }
    }

    pub fn parse(value: &str) -> Option<StatusAgendamento> {
        match value {
            "confirmado" => Some(StatusAgendamento::Confirmado),
            "cancelado" => Some(StatusAgendamento::Cancelado),
            _ => None,
        }
    }
}

/// A booking of one hourly slot on one court, owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agendamento {
    pub id: i64,
    pub local_id: i64,
    pub jogador_id: Uuid,
    pub data: NaiveDate,
    pub inicio: TimeOfDay,
    pub status: StatusAgendamento,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/agendamentos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarAgendamentoRequest {
    pub local_id: i64,
    pub data: NaiveDate,
    pub inicio: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendamentoResponse {
    pub id: i64,
    pub local_id: i64,
    pub data: NaiveDate,
    pub inicio: TimeOfDay,
    pub fim: TimeOfDay,
    pub status: StatusAgendamento,
}
