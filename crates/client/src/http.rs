use chrono::NaiveDate;
use mockall::automock;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use quadra_core::models::agendamento::{AgendamentoResponse, CriarAgendamentoRequest};
use quadra_core::models::disponibilidade::{Disponibilidade, OcupacaoResponse};
use quadra_core::models::usuario::{LoginRequest, LoginResponse};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::sessao::Sessao;

/// Error body the API returns on failures: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErroApi {
    error: String,
}

/// The calls the booking view needs. Kept as a trait so the view can be
/// tested against a mock instead of a live server.
#[automock]
#[async_trait::async_trait]
pub trait DisponibilidadeApi {
    async fn get_disponibilidade(
        &self,
        local_id: i64,
        data: NaiveDate,
    ) -> Result<Disponibilidade, ClientError>;

    async fn criar_agendamento(
        &self,
        pedido: CriarAgendamentoRequest,
    ) -> Result<AgendamentoResponse, ClientError>;
}

/// HTTP client for the Quadra API.
///
/// The session is held by value and attached to every request as a Bearer
/// token; there is no implicit auth state outside this struct.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    sessao: Option<Sessao>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sessao: None,
        })
    }

    /// Attaches a previously obtained session, e.g. one restored from disk.
    pub fn with_sessao(mut self, sessao: Sessao) -> Self {
        self.sessao = Some(sessao);
        self
    }

    pub fn sessao(&self) -> Option<&Sessao> {
        self.sessao.as_ref()
    }

    /// Authenticates and stores the resulting session on this client.
    pub async fn login(&mut self, email: &str, senha: &str) -> Result<&Sessao, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            senha: senha.to_string(),
        };

        let resp = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&body)
            .send()
            .await?;

        // A 401 on login means bad credentials, not an expired session.
        if resp.status() == StatusCode::UNAUTHORIZED {
            let message = mensagem_de_erro(resp).await;
            return Err(ClientError::Api {
                status: 401,
                message,
            });
        }

        let resp = checar(resp).await?;
        let login: LoginResponse = resp.json().await?;

        tracing::info!(usuario = %login.usuario.email, "sessão iniciada");
        Ok(self
            .sessao
            .insert(Sessao::nova(login.token, login.usuario)))
    }

    /// Invalidates the session server-side and drops it locally.
    ///
    /// The local session is cleared even when the server call fails; a
    /// token we can no longer reach is as good as gone.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let resultado = match self.sessao.take() {
            Some(sessao) => {
                let req = self
                    .http
                    .post(format!("{}/api/auth/logout", self.base_url))
                    .bearer_auth(&sessao.token);
                match req.send().await {
                    Ok(resp) => checar(resp).await.map(|_| ()),
                    Err(err) => Err(ClientError::Transporte(err)),
                }
            }
            None => Ok(()),
        };
        resultado
    }

    pub async fn cancelar_agendamento(&self, id: i64) -> Result<AgendamentoResponse, ClientError> {
        let resp = self
            .autenticado(
                self.http
                    .delete(format!("{}/api/agendamentos/{}", self.base_url, id)),
            )
            .send()
            .await?;
        let resp = checar(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn listar_meus_agendamentos(&self) -> Result<Vec<AgendamentoResponse>, ClientError> {
        let resp = self
            .autenticado(self.http.get(format!("{}/api/agendamentos", self.base_url)))
            .send()
            .await?;
        let resp = checar(resp).await?;
        Ok(resp.json().await?)
    }

    /// Owner-side occupancy panel for a date.
    pub async fn get_ocupacao(&self, data: NaiveDate) -> Result<OcupacaoResponse, ClientError> {
        let resp = self
            .autenticado(
                self.http
                    .get(format!("{}/api/locadores/me/ocupacao", self.base_url))
                    .query(&[("data", data.to_string())]),
            )
            .send()
            .await?;
        let resp = checar(resp).await?;
        Ok(resp.json().await?)
    }

    fn autenticado(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.sessao {
            Some(sessao) => req.bearer_auth(&sessao.token),
            None => req,
        }
    }
}

#[async_trait::async_trait]
impl DisponibilidadeApi for ApiClient {
    async fn get_disponibilidade(
        &self,
        local_id: i64,
        data: NaiveDate,
    ) -> Result<Disponibilidade, ClientError> {
        let resp = self
            .autenticado(
                self.http
                    .get(format!(
                        "{}/api/locais/{}/disponibilidade",
                        self.base_url, local_id
                    ))
                    .query(&[("data", data.to_string())]),
            )
            .send()
            .await?;
        let resp = checar(resp).await?;
        Ok(resp.json().await?)
    }

    async fn criar_agendamento(
        &self,
        pedido: CriarAgendamentoRequest,
    ) -> Result<AgendamentoResponse, ClientError> {
        let resp = self
            .autenticado(self.http.post(format!("{}/api/agendamentos", self.base_url)))
            .json(&pedido)
            .send()
            .await?;
        let resp = checar(resp).await?;
        Ok(resp.json().await?)
    }
}

/// Maps a response to the client error taxonomy. 409 and 401 get their
/// dedicated variants; everything else non-2xx becomes a generic API error
/// carrying the server's message.
async fn checar(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    match status {
        StatusCode::CONFLICT => Err(ClientError::HorarioOcupado),
        StatusCode::UNAUTHORIZED => Err(ClientError::SessaoExpirada),
        _ => {
            let message = mensagem_de_erro(resp).await;
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

async fn mensagem_de_erro(resp: Response) -> String {
    match resp.json::<ErroApi>().await {
        Ok(erro) => erro.error,
        Err(_) => "resposta de erro sem corpo legível".to_string(),
    }
}
