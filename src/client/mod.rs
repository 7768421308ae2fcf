//! Blocking HTTP client for a running pole prediction service.
//!
//! Mirrors how downstream backends call the service: JSON `{"datos": [..]}`
//! bodies, a 30 second timeout, and any non-2xx status treated as a failure.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{HealthResponse, PolesResponse, PredictRequest, TypeResponse};
use crate::error::AppError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct PoleClient {
    client: Client,
    base_url: String,
}

impl PoleClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_type(&self, features: &[f64]) -> Result<TypeResponse, AppError> {
        self.post("/predecir_tipo", &request(features))
    }

    pub fn predict_poles(&self, features: &[f64]) -> Result<PolesResponse, AppError> {
        self.post("/predecir_polos", &request(features))
    }

    pub fn health(&self) -> Result<HealthResponse, AppError> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::new(4, format!("Request to {url} failed: {e}")))?;
        decode(&url, resp)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, AppError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| AppError::new(4, format!("Request to {url} failed: {e}")))?;
        decode(&url, resp)
    }
}

fn request(features: &[f64]) -> PredictRequest {
    PredictRequest {
        datos: features.to_vec(),
    }
}

fn decode<T: DeserializeOwned>(url: &str, resp: reqwest::blocking::Response) -> Result<T, AppError> {
    let status = resp.status();
    if !status.is_success() {
        // Surface the service's `{"error": ...}` message when there is one.
        let detail = resp
            .json::<crate::domain::ErrorResponse>()
            .map(|e| format!(": {}", e.error))
            .unwrap_or_default();
        return Err(AppError::new(
            4,
            format!("{url} returned status {status}{detail}"),
        ));
    }
    resp.json()
        .map_err(|e| AppError::new(4, format!("Failed to decode response from {url}: {e}")))
}
