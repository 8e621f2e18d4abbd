//! KPI Generation — one prompt, one model call, one validated reply.
//!
//! Flow: build prompt → TextGenerator::generate → log raw text →
//!       extract JSON object → schema validation → KpiSet.
//!
//! A failure at any step fails the request. Nothing is retried.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::extract::parse_kpi_set;
use crate::generation::prompts::build_kpi_prompt;
use crate::generation::schema::kpi_response_schema;
use crate::llm_client::TextGenerator;
use crate::models::{GenerationRequest, KpiSet};

/// The model is asked for this many KPIs. Not enforced.
pub const EXPECTED_KPI_RANGE: std::ops::RangeInclusive<usize> = 4..=8;

pub async fn generate_kpis(
    llm: &dyn TextGenerator,
    request: &GenerationRequest,
) -> Result<KpiSet, AppError> {
    let prompt = build_kpi_prompt(request, &kpi_response_schema());

    let raw = llm.generate(&prompt).await?;
    info!("Raw model output:\n{raw}");

    let set = parse_kpi_set(&raw)?;

    if !EXPECTED_KPI_RANGE.contains(&set.kpis.len()) {
        warn!(
            "Model returned {} KPIs (asked for {}-{})",
            set.kpis.len(),
            EXPECTED_KPI_RANGE.start(),
            EXPECTED_KPI_RANGE.end()
        );
    }

    Ok(set)
}
