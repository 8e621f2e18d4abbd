use serde_json::{json, Value};

use crate::models::KpiTier;

/// Machine-readable description of the `{kpis: KpiResult[]}` reply.
///
/// Appended to the prompt, and sent as the Gemini `responseSchema` when
/// structured output is enabled, so it stays within the subset Gemini accepts.
pub fn kpi_response_schema() -> Value {
    let tiers: Vec<&str> = KpiTier::ALL.iter().map(KpiTier::as_str).collect();

    json!({
        "type": "object",
        "properties": {
            "kpis": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Name of the KPI"
                        },
                        "description": {
                            "type": "string",
                            "description": "Brief description of what this KPI measures"
                        },
                        "tier": {
                            "type": "string",
                            "enum": tiers,
                            "description": "KPI tier level"
                        },
                        "sql": {
                            "type": "string",
                            "description": "SQL query to calculate this KPI"
                        },
                        "pandas": {
                            "type": "string",
                            "description": "Pandas code to calculate this KPI"
                        },
                        "dax": {
                            "type": "string",
                            "description": "DAX query for Power BI to calculate this KPI"
                        }
                    },
                    "required": ["name", "description", "tier", "sql", "pandas", "dax"]
                }
            }
        },
        "required": ["kpis"]
    })
}
