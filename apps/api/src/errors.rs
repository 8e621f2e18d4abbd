use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::extract::ExtractError;
use crate::llm_client::LlmError;

/// Message returned to callers for every failure. Error kinds are logged, never surfaced.
pub const GENERIC_FAILURE: &str = "Failed to generate KPIs";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed model output: {0}")]
    MalformedOutput(#[from] ExtractError),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::MalformedOutput(_) => "MALFORMED_OUTPUT",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Error generating KPIs [{}]: {:?}", self.code(), self);

        let body = Json(json!({ "error": GENERIC_FAILURE }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_every_variant_collapses_to_generic_500() {
        let errors = vec![
            AppError::InvalidRequest("missing field `domain`".to_string()),
            AppError::Llm(LlmError::EmptyContent),
            AppError::MalformedOutput(ExtractError::NoJsonObject),
            AppError::Llm(LlmError::Blocked("SAFETY".to_string())),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Failed to generate KPIs" })
            );
        }
    }
}
