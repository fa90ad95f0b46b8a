pub mod agendamento;
pub mod auth;
pub mod health;
pub mod local;
pub mod locador;
pub mod mensalidade;
