//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_kpis;
use crate::models::{GenerationRequest, KpiSet};
use crate::state::AppState;

/// POST /api/generate-kpis
///
/// Builds the prompt, calls the model once, and returns the validated KPI list.
/// Every failure, including an unreadable request body, is a generic 500.
pub async fn handle_generate_kpis(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<KpiSet>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate_kpis", %request_id);

    async move {
        info!(
            "Generating KPIs: tier={}, domain_len={}, columns_len={}",
            request.tier,
            request.domain.len(),
            request.columns.len()
        );

        let set = generate_kpis(state.llm.as_ref(), &request).await?;

        info!("Returning {} KPIs", set.kpis.len());
        Ok::<_, AppError>(Json(set))
    }
    .instrument(span)
    .await
}
