use thiserror::Error;

/// Errors a client call can surface.
///
/// The two workflow-relevant HTTP statuses get their own variants so the
/// view layer can react without inspecting status codes: `409` means the
/// slot was taken by someone else, `401` means the session is gone and the
/// user has to sign in again. Neither is retried automatically; the human
/// is the retry mechanism.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Horário já reservado. Escolha outro horário.")]
    HorarioOcupado,

    #[error("Sessão expirada. Faça login novamente.")]
    SessaoExpirada,

    #[error("Falha na requisição ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Falha de rede: {0}")]
    Transporte(#[from] reqwest::Error),
}
