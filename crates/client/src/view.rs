use chrono::NaiveDate;

use quadra_core::models::agendamento::CriarAgendamentoRequest;
use quadra_core::models::disponibilidade::{Slot, SlotStatus};
use quadra_core::time::TimeOfDay;

use crate::error::ClientError;
use crate::http::DisponibilidadeApi;

/// What the booking screen is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoAgenda {
    /// No date picked yet.
    Ocioso,
    /// A load is in flight for the current date.
    CarregandoSlots,
    /// Slots for the current date are rendered.
    SlotsProntos,
    /// A booking submission is in flight.
    Reservando,
}

/// Proof that a given availability load is the latest one issued.
///
/// Tickets are compared by sequence number; a completion whose ticket no
/// longer matches the view's counter belongs to a superseded request and
/// must be dropped, not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketCarga {
    seq: u64,
    pub data: NaiveDate,
}

/// Same idea for a booking submission: the ticket pins the date the user
/// was looking at when they hit reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketReserva {
    seq: u64,
    pub inicio: TimeOfDay,
}

/// User-facing outcome of a completed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aviso {
    ReservaConfirmada,
    HorarioReservado,
    SessaoExpirada,
    FalhaReserva,
    FalhaCarga,
}

impl Aviso {
    pub fn mensagem(&self) -> &'static str {
        match self {
            Aviso::ReservaConfirmada => "Reserva confirmada!",
            Aviso::HorarioReservado => "Horário já reservado. Escolha outro horário.",
            Aviso::SessaoExpirada => "Sessão expirada. Faça login novamente.",
            Aviso::FalhaReserva => "Não foi possível concluir a reserva. Tente novamente.",
            Aviso::FalhaCarga => "Não foi possível carregar os horários. Tente novamente.",
        }
    }
}

/// State machine behind the booking screen of a single court.
///
/// `Ocioso → CarregandoSlots → SlotsProntos → Reservando → SlotsProntos`.
///
/// The view never talks to the network itself; callers either drive it
/// with the `iniciar_*`/`concluir_*` pairs around their own I/O, or hand
/// it a [`DisponibilidadeApi`] via [`AgendaView::carregar`] and
/// [`AgendaView::reservar`].
pub struct AgendaView {
    local_id: i64,
    seq: u64,
    data: Option<NaiveDate>,
    estado: EstadoAgenda,
    fechado: bool,
    slots: Vec<Slot>,
    selecionado: Option<TimeOfDay>,
}

impl AgendaView {
    pub fn new(local_id: i64) -> Self {
        Self {
            local_id,
            seq: 0,
            data: None,
            estado: EstadoAgenda::Ocioso,
            fechado: false,
            slots: Vec::new(),
            selecionado: None,
        }
    }

    pub fn estado(&self) -> EstadoAgenda {
        self.estado
    }

    pub fn data(&self) -> Option<NaiveDate> {
        self.data
    }

    pub fn fechado(&self) -> bool {
        self.fechado
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn selecionado(&self) -> Option<TimeOfDay> {
        self.selecionado
    }

    /// Starts a load for `data` and returns its ticket. Bumping the
    /// sequence here is what invalidates every response still in flight
    /// for a previously picked date.
    pub fn iniciar_carga(&mut self, data: NaiveDate) -> TicketCarga {
        self.seq += 1;
        self.data = Some(data);
        self.selecionado = None;
        self.estado = EstadoAgenda::CarregandoSlots;
        TicketCarga {
            seq: self.seq,
            data,
        }
    }

    /// Applies a finished load. Returns `None` when the result was applied
    /// cleanly or silently dropped as stale.
    pub fn concluir_carga(
        &mut self,
        ticket: TicketCarga,
        resultado: Result<quadra_core::models::disponibilidade::Disponibilidade, ClientError>,
    ) -> Option<Aviso> {
        if ticket.seq != self.seq {
            tracing::debug!(
                data = %ticket.data,
                seq = ticket.seq,
                atual = self.seq,
                "resposta de disponibilidade obsoleta descartada"
            );
            return None;
        }

        match resultado {
            Ok(disponibilidade) => {
                self.fechado = disponibilidade.fechado;
                self.slots = disponibilidade.slots;
                self.estado = EstadoAgenda::SlotsProntos;
                None
            }
            Err(err) => {
                tracing::warn!(erro = %err, "falha ao carregar disponibilidade");
                self.estado = EstadoAgenda::Ocioso;
                self.data = None;
                Some(Aviso::FalhaCarga)
            }
        }
    }

    /// Marks a rendered, free slot as the booking candidate. Returns false
    /// when the slot is missing, occupied, or the view is mid-operation.
    pub fn selecionar_slot(&mut self, inicio: TimeOfDay) -> bool {
        if self.estado != EstadoAgenda::SlotsProntos {
            return false;
        }
        let livre = self
            .slots
            .iter()
            .any(|s| s.inicio == inicio && s.status == SlotStatus::Livre);
        if livre {
            self.selecionado = Some(inicio);
        }
        livre
    }

    /// Begins a booking for the selected slot. `None` when there is
    /// nothing selected or slots are not rendered.
    pub fn iniciar_reserva(&mut self) -> Option<TicketReserva> {
        if self.estado != EstadoAgenda::SlotsProntos {
            return None;
        }
        let inicio = self.selecionado?;
        self.estado = EstadoAgenda::Reservando;
        Some(TicketReserva {
            seq: self.seq,
            inicio,
        })
    }

    /// Applies a finished booking submission.
    ///
    /// Whatever the outcome, the rendered slot list is left untouched; a
    /// success tells the caller to issue a fresh load rather than patching
    /// the local copy optimistically.
    pub fn concluir_reserva(
        &mut self,
        ticket: TicketReserva,
        resultado: Result<quadra_core::models::agendamento::AgendamentoResponse, ClientError>,
    ) -> Option<Aviso> {
        if ticket.seq != self.seq {
            tracing::debug!(
                inicio = %ticket.inicio,
                "resultado de reserva para data já trocada, descartado"
            );
            return None;
        }

        self.estado = EstadoAgenda::SlotsProntos;
        match resultado {
            Ok(agendamento) => {
                tracing::info!(id = agendamento.id, "reserva confirmada");
                self.selecionado = None;
                Some(Aviso::ReservaConfirmada)
            }
            Err(ClientError::HorarioOcupado) => Some(Aviso::HorarioReservado),
            Err(ClientError::SessaoExpirada) => Some(Aviso::SessaoExpirada),
            Err(err) => {
                tracing::warn!(erro = %err, "falha ao reservar");
                Some(Aviso::FalhaReserva)
            }
        }
    }

    /// Loads availability for `data` through `api` and applies the result.
    pub async fn carregar(
        &mut self,
        api: &impl DisponibilidadeApi,
        data: NaiveDate,
    ) -> Option<Aviso> {
        let ticket = self.iniciar_carga(data);
        let resultado = api.get_disponibilidade(self.local_id, data).await;
        self.concluir_carga(ticket, resultado)
    }

    /// Submits a booking for the selected slot through `api`. Exactly one
    /// request is issued per call; failed submissions are never retried
    /// behind the user's back.
    pub async fn reservar(&mut self, api: &impl DisponibilidadeApi) -> Option<Aviso> {
        let data = self.data?;
        let ticket = self.iniciar_reserva()?;
        let pedido = CriarAgendamentoRequest {
            local_id: self.local_id,
            data,
            inicio: ticket.inicio,
        };
        let resultado = api.criar_agendamento(pedido).await;
        self.concluir_reserva(ticket, resultado)
    }
}
