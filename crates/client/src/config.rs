use eyre::{Result, WrapErr};
use std::env;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Quadra API (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl ClientConfig {
    /// Creates a new ClientConfig from environment variables.
    ///
    /// `QUADRA_API_URL` is required; `CLIENT_REQUEST_TIMEOUT_SECONDS`
    /// defaults to 10.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("QUADRA_API_URL")
            .wrap_err("QUADRA_API_URL environment variable must be set")?;

        let request_timeout_seconds = env::var("CLIENT_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(Self {
            base_url,
            request_timeout_seconds,
        })
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_seconds: 10,
        }
    }
}
