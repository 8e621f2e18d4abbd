//! The generation endpoint as seen from the presentation side.

use async_trait::async_trait;
use kpi_api::models::{GenerationRequest, KpiSet};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const GENERATE_PATH: &str = "/api/generate-kpis";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Anything that can turn a request into KPIs. The workbench never sees HTTP.
#[async_trait]
pub trait KpiBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<KpiSet, BackendError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct HttpKpiBackend {
    client: Client,
    base_url: String,
}

impl HttpKpiBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }
}

#[async_trait]
impl KpiBackend for HttpKpiBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<KpiSet, BackendError> {
        debug!("POST {}", self.endpoint());

        let response = self.client.post(self.endpoint()).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<KpiSet>().await?)
    }
}
