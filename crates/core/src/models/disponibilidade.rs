//! Availability payloads and the slot status derivation.
//!
//! Slots are derived on every request from the court's weekday window and the
//! bookings that overlap it; nothing here is persisted. A confirmed booking
//! or an active monthly subscription renders `ocupado` for everyone. A
//! pending subscription request renders `solicitado`, and only in the owner's
//! view; players keep seeing the slot as `livre` until the owner approves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::local::HorarioFuncionamento;
use crate::time::{slots_de_hora, TimeOfDay, SLOT_MINUTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Livre,
    Ocupado,
    Solicitado,
}

/// One bookable hourly interval within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub inicio: TimeOfDay,
    pub fim: TimeOfDay,
    pub status: SlotStatus,
}

/// Wire shape of `GET /api/locais/{id}/disponibilidade`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disponibilidade {
    pub fechado: bool,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisponibilidadeQuery {
    pub data: NaiveDate,
}

/// Derives the slot list for one court and date.
///
/// `ocupados` holds the start times taken by confirmed bookings and active
/// subscriptions; `solicitados` holds pending subscription requests, which
/// are only surfaced when `visao_locador` is set. A closed or misconfigured
/// weekday yields `fechado: true` and no slots, whatever else is passed in.
pub fn montar_disponibilidade(
    horario: Option<&HorarioFuncionamento>,
    ocupados: &[TimeOfDay],
    solicitados: &[TimeOfDay],
    visao_locador: bool,
) -> Disponibilidade {
    let Some((abertura, fechamento)) = horario.and_then(HorarioFuncionamento::janela) else {
        return Disponibilidade {
            fechado: true,
            slots: Vec::new(),
        };
    };

    let slots = slots_de_hora(abertura, fechamento)
        .into_iter()
        .map(|inicio| {
            let fim = inicio.checked_add_minutes(SLOT_MINUTES).unwrap_or(fechamento);
            let status = if ocupados.contains(&inicio) {
                SlotStatus::Ocupado
            } else if visao_locador && solicitados.contains(&inicio) {
                SlotStatus::Solicitado
            } else {
                SlotStatus::Livre
            };
            Slot { inicio, fim, status }
        })
        .collect();

    Disponibilidade {
        fechado: false,
        slots,
    }
}

/// One court's line in the owner occupancy summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcupacaoLocal {
    pub local_id: i64,
    pub nome: String,
    pub fechado: bool,
    pub total: usize,
    pub ocupados: usize,
    pub livres: usize,
}

/// Wire shape of `GET /api/locadores/me/ocupacao`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcupacaoResponse {
    pub data: NaiveDate,
    pub locais: Vec<OcupacaoLocal>,
}

impl OcupacaoLocal {
    /// Collapses a day's availability into the counters the dashboard shows.
    pub fn resumir(local_id: i64, nome: String, disponibilidade: &Disponibilidade) -> Self {
        let total = disponibilidade.slots.len();
        let ocupados = disponibilidade
            .slots
            .iter()
            .filter(|slot| slot.status == SlotStatus::Ocupado)
            .count();
        Self {
            local_id,
            nome,
            fechado: disponibilidade.fechado,
            total,
            ocupados,
            livres: total - ocupados,
        }
    }
}
