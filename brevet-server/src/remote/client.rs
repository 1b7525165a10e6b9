//! HTTP client for the `/api` routes of another brevet server.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Brevet, BrevetId};
use crate::web::{BrevetResult, ErrorResponse, InsertResponse, SubmitBrevetRequest};

use super::error::ClientError;

/// Configuration for the remote API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Server root, e.g. `http://api:5000`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for a remote brevet API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// All brevets, oldest first.
    pub async fn list(&self) -> Result<Vec<BrevetResult>, ClientError> {
        let response = self.http.get(self.url("brevets")).send().await?;
        parse_json(check(response).await?).await
    }

    pub async fn get(&self, id: BrevetId) -> Result<BrevetResult, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("brevet/{id}")))
            .send()
            .await?;
        parse_json(check(response).await?).await
    }

    /// Store a brevet remotely and return the id the remote assigned.
    pub async fn insert(&self, brevet: &Brevet) -> Result<BrevetId, ClientError> {
        let response = self
            .http
            .post(self.url("brevets"))
            .json(&SubmitBrevetRequest::from_brevet(brevet))
            .send()
            .await?;
        let inserted: InsertResponse = parse_json(check(response).await?).await?;

        let id = inserted.id.parse().map_err(|_| ClientError::Json {
            message: format!("remote returned invalid id {:?}", inserted.id),
        })?;
        debug!(%id, base_url = %self.base_url, "inserted brevet remotely");
        Ok(id)
    }

    pub async fn update(&self, id: BrevetId, brevet: &Brevet) -> Result<(), ClientError> {
        let response = self
            .http
            .put(self.url(&format!("brevet/{id}")))
            .json(&BrevetResult::from_brevet(None, brevet))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn delete(&self, id: BrevetId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("brevet/{id}")))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Turn error statuses into `ClientError`s.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    // Prefer the message from our own error body, fall back to the raw text.
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Json {
        message: e.to_string(),
    })
}
