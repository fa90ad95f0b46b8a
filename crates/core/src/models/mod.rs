pub mod agendamento;
pub mod disponibilidade;
pub mod local;
pub mod mensalidade;
pub mod usuario;
