pub mod agendamento;
pub mod local;
pub mod mensalidade;
pub mod usuario;
