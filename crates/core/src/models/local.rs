use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::TimeOfDay;

/// A bookable venue/court.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Local {
    pub id: i64,
    pub locador_id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub cidade: String,
    pub esporte: String,
    /// Hourly rate in centavos.
    pub valor_hora: i64,
    pub created_at: DateTime<Utc>,
}

/// Operating window of a court on one weekday (0 = Sunday .. 6 = Saturday).
///
/// When `aberto` is false the day is closed and both times are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorarioFuncionamento {
    pub dia_semana: u8,
    pub aberto: bool,
    pub abertura: Option<TimeOfDay>,
    pub fechamento: Option<TimeOfDay>,
}

impl HorarioFuncionamento {
    /// The open window, or `None` when the day is closed or misconfigured.
    pub fn janela(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        if !self.aberto {
            return None;
        }
        match (self.abertura, self.fechamento) {
            (Some(abertura), Some(fechamento)) if abertura < fechamento => {
                Some((abertura, fechamento))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarLocalRequest {
    pub nome: String,
    pub endereco: String,
    pub cidade: String,
    pub esporte: String,
    pub valor_hora: i64,
    #[serde(default)]
    pub horarios: Vec<HorarioFuncionamento>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalResponse {
    pub id: i64,
    pub nome: String,
    pub endereco: String,
    pub cidade: String,
    pub esporte: String,
    pub valor_hora: i64,
    pub horarios: Vec<HorarioFuncionamento>,
}
