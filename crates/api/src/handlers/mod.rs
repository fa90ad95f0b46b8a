pub mod agendamento;
pub mod auth;
pub mod disponibilidade;
pub mod local;
pub mod mensalidade;
pub mod ocupacao;
