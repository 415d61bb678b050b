//! # Pricing Client
//!
//! HTTP data source for the pricing calculator. Fetches the tariff catalog and
//! the exchange-rate table from the pricing API.

use std::time::Duration;

use pricing_types::{CalculatorData, CalculatorDataSource, ExchangeRateEntry, LoadError, Tariff};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for LoadError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => LoadError::Unavailable(e.to_string()),
            ClientError::Api { status, message } => LoadError::Api { status, message },
            ClientError::Json(e) => LoadError::InvalidPayload(e.to_string()),
        }
    }
}

/// Pricing API client.
pub struct HttpDataSource {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl HttpDataSource {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            http: Client::new(),
        }
    }

    /// Sets the API key sent as `X-API-Key`.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replaces the HTTP client with one that gives up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ClientError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Fetches the tariff catalog.
    pub async fn tariffs(&self) -> Result<Vec<Tariff>, ClientError> {
        self.get("/api/tariffs").await
    }

    /// Fetches the exchange-rate table.
    pub async fn exchange_rates(&self) -> Result<Vec<ExchangeRateEntry>, ClientError> {
        self.get("/api/exchange-rates").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            req = req.header("X-API-Key", key);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait::async_trait]
impl CalculatorDataSource for HttpDataSource {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self) -> Result<CalculatorData, LoadError> {
        let (tariffs, exchange_rates) = tokio::try_join!(self.tariffs(), self.exchange_rates())?;
        tracing::debug!(
            tariffs = tariffs.len(),
            exchange_rates = exchange_rates.len(),
            "Fetched calculator data"
        );
        Ok(CalculatorData {
            tariffs,
            exchange_rates,
        })
    }
}
