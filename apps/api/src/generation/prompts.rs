// All LLM prompt text for KPI generation.
// User input is spliced in with format!, never through placeholder replacement,
// so a domain or column list containing `{...}` reaches the model verbatim.

use serde_json::Value;

use crate::models::{GenerationRequest, TierFilter};

pub const TIER_DEFINITIONS: &str = "\
KPI Tier Definitions:
- Strategic: Long-term company goals and vision (CEO/C-suite level)
- Tactical: Department-level performance metrics (Manager level)
- Operational: Day-to-day tasks and individual contributions (Team/Individual level)
- Analytical: Deep data analysis to identify trends and provide insights for strategic decision-making";

pub const KPI_DELIVERABLES: &str = "\
For each KPI, provide:
- Clear name and description
- Appropriate tier classification
- SQL query using the actual column names
- Pandas code using DataFrame operations
- DAX query for Power BI

Make the queries practical and executable with the given column structure.";

/// Natural-language rendering of the tier filter, repeated in the prompt.
pub fn tier_filter_phrase(tier: TierFilter) -> String {
    match tier {
        TierFilter::All => "all tiers (Strategic, Tactical, Operational, and Analytical)".to_string(),
        TierFilter::Only(tier) => format!("{tier} tier"),
    }
}

/// Builds the full generation prompt. `schema` is pretty-printed at the end.
pub fn build_kpi_prompt(request: &GenerationRequest, schema: &Value) -> String {
    let tier_filter = tier_filter_phrase(request.tier);
    let schema_json = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());

    format!(
        "You are a KPI expert analyst. Based on the provided dataset information, \
suggest the most relevant KPIs for {tier_filter}.

Dataset Domain: {domain}
Available Columns: {columns}

{TIER_DEFINITIONS}

Requirements:
1. Generate 4-8 highly relevant KPIs based on the domain and available columns
2. Focus on {tier_filter}
3. Ensure each KPI can be calculated using the provided columns
4. Provide practical SQL, Pandas, and DAX implementations
5. Make sure the queries are realistic and use actual column names provided
6. Consider the business context and industry best practices

{KPI_DELIVERABLES}

You must return a single JSON object that strictly adheres to the following JSON schema:
{schema_json}
",
        domain = request.domain,
        columns = request.columns,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::schema::kpi_response_schema;
    use crate::models::KpiTier;

    fn request(domain: &str, columns: &str, tier: TierFilter) -> GenerationRequest {
        GenerationRequest {
            domain: domain.to_string(),
            columns: columns.to_string(),
            tier,
        }
    }

    #[test]
    fn test_tier_filter_phrase() {
        assert_eq!(
            tier_filter_phrase(TierFilter::All),
            "all tiers (Strategic, Tactical, Operational, and Analytical)"
        );
        assert_eq!(
            tier_filter_phrase(TierFilter::Only(KpiTier::Operational)),
            "Operational tier"
        );
    }

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let prompt = build_kpi_prompt(
            &request("e-commerce", "customer_id, order_date, price", TierFilter::All),
            &kpi_response_schema(),
        );
        assert!(prompt.contains("Dataset Domain: e-commerce\n"));
        assert!(prompt.contains("Available Columns: customer_id, order_date, price\n"));
    }

    #[test]
    fn test_prompt_repeats_tier_filter_twice() {
        let prompt = build_kpi_prompt(
            &request("saas", "mrr", TierFilter::Only(KpiTier::Strategic)),
            &kpi_response_schema(),
        );
        assert_eq!(prompt.matches("Strategic tier").count(), 2);
        assert!(prompt.contains("2. Focus on Strategic tier"));
    }

    #[test]
    fn test_prompt_lists_six_requirements_and_schema() {
        let prompt = build_kpi_prompt(&request("d", "c", TierFilter::All), &kpi_response_schema());
        for n in 1..=6 {
            assert!(prompt.contains(&format!("\n{n}. ")), "requirement {n} missing");
        }
        assert!(!prompt.contains("\n7. "));
        assert!(prompt.contains("\"required\""));
        assert!(prompt.contains("- Analytical: Deep data analysis"));
    }

    #[test]
    fn test_prompt_does_not_expand_braces_in_user_input() {
        let prompt = build_kpi_prompt(
            &request("{columns} {tier_filter}", "a, b", TierFilter::All),
            &kpi_response_schema(),
        );
        assert!(prompt.contains("Dataset Domain: {columns} {tier_filter}\n"));
    }
}
