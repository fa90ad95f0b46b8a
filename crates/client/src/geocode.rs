use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Default number of distinct addresses kept memoized.
pub const CAPACIDADE_CACHE_GEOCODE: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordenadas {
    pub latitude: f64,
    pub longitude: f64,
}

/// Least-recently-used memo cache with a fixed capacity.
///
/// Insertion past capacity evicts the entry touched longest ago, so the
/// cache stays bounded no matter how many courts a long session browses.
pub struct CacheLru<V> {
    capacidade: usize,
    valores: HashMap<String, V>,
    ordem: VecDeque<String>,
}

impl<V> CacheLru<V> {
    pub fn new(capacidade: usize) -> Self {
        assert!(capacidade > 0, "capacidade do cache deve ser positiva");
        Self {
            capacidade,
            valores: HashMap::new(),
            ordem: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.valores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valores.is_empty()
    }

    pub fn get(&mut self, chave: &str) -> Option<&V> {
        if !self.valores.contains_key(chave) {
            return None;
        }
        self.tocar(chave);
        self.valores.get(chave)
    }

    pub fn insert(&mut self, chave: String, valor: V) {
        if self.valores.insert(chave.clone(), valor).is_some() {
            self.tocar(&chave);
            return;
        }
        self.ordem.push_back(chave);
        if self.valores.len() > self.capacidade {
            if let Some(mais_antiga) = self.ordem.pop_front() {
                self.valores.remove(&mais_antiga);
            }
        }
    }

    fn tocar(&mut self, chave: &str) {
        if let Some(pos) = self.ordem.iter().position(|c| c == chave) {
            let chave = self.ordem.remove(pos).unwrap();
            self.ordem.push_back(chave);
        }
    }
}

/// Nominatim-style search hit; coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

/// Address-to-coordinates lookup backed by [`CacheLru`].
///
/// Repeated lookups of the same address (the common case when a user flips
/// between a handful of courts) hit the memo instead of the network.
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    cache: CacheLru<Coordenadas>,
}

impl GeocodeClient {
    pub fn new(config: &ClientConfig, base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            cache: CacheLru::new(CAPACIDADE_CACHE_GEOCODE),
        })
    }

    pub async fn localizar(&mut self, endereco: &str) -> Result<Coordenadas, ClientError> {
        if let Some(coordenadas) = self.cache.get(endereco) {
            return Ok(*coordenadas);
        }

        let resp = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", endereco), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: "falha no serviço de geocodificação".to_string(),
            });
        }

        let hits: Vec<GeocodeHit> = resp.json().await?;
        let hit = hits.into_iter().next().ok_or_else(|| ClientError::Api {
            status: status.as_u16(),
            message: format!("endereço não encontrado: {endereco}"),
        })?;

        let coordenadas = parse_hit(&hit).ok_or_else(|| ClientError::Api {
            status: status.as_u16(),
            message: "coordenadas ilegíveis na resposta de geocodificação".to_string(),
        })?;

        tracing::debug!(endereco, lat = coordenadas.latitude, "endereço geocodificado");
        self.cache.insert(endereco.to_string(), coordenadas);
        Ok(coordenadas)
    }
}

fn parse_hit(hit: &GeocodeHit) -> Option<Coordenadas> {
    Some(Coordenadas {
        latitude: hit.lat.parse().ok()?,
        longitude: hit.lon.parse().ok()?,
    })
}
