//! Pulls the KPI payload out of free-form model text.
//!
//! Extraction is a heuristic: the substring from the first `{` to the last `}`.
//! Any other brace-delimited text around the payload will be swept in and the
//! parse will fail. Validation is serde's: every field present, tier in the enum.

use thiserror::Error;

use crate::models::KpiSet;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model output contains no JSON object")]
    NoJsonObject,

    #[error("model output failed schema validation: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Returns the substring between the first `{` and the last `}`, inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extracts, parses, and validates a `{kpis: [...]}` payload.
pub fn parse_kpi_set(text: &str) -> Result<KpiSet, ExtractError> {
    let json = extract_json_object(text).ok_or(ExtractError::NoJsonObject)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KpiTier;

    const VALID_KPI: &str = r#"{
        "name": "Customer Lifetime Value",
        "description": "Total revenue per customer",
        "tier": "Strategic",
        "sql": "SELECT customer_id, SUM(price) FROM orders GROUP BY customer_id",
        "pandas": "df.groupby('customer_id')['price'].sum()",
        "dax": "SUMX(VALUES(orders[customer_id]), CALCULATE(SUM(orders[price])))"
    }"#;

    #[test]
    fn test_extract_strips_surrounding_prose_and_fences() {
        let text = "Here are your KPIs:\n```json\n{\"kpis\": []}\n```\nHope this helps!";
        assert_eq!(extract_json_object(text), Some("{\"kpis\": []}"));
    }

    #[test]
    fn test_extract_spans_first_open_to_last_close() {
        let text = "a {\"x\": {\"y\": 1}} b";
        assert_eq!(extract_json_object(text), Some("{\"x\": {\"y\": 1}}"));
    }

    #[test]
    fn test_extract_none_without_braces() {
        assert_eq!(extract_json_object("I cannot help with that."), None);
        assert_eq!(extract_json_object("only open {"), None);
        assert_eq!(extract_json_object("only close }"), None);
    }

    #[test]
    fn test_extract_none_when_close_precedes_open() {
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_parse_valid_payload() {
        let text = format!("Sure!\n{{\"kpis\": [{VALID_KPI}]}}");
        let set = parse_kpi_set(&text).unwrap();
        assert_eq!(set.kpis.len(), 1);
        assert_eq!(set.kpis[0].name, "Customer Lifetime Value");
        assert_eq!(set.kpis[0].tier, KpiTier::Strategic);
    }

    #[test]
    fn test_parse_no_braces_is_no_json_object() {
        let err = parse_kpi_set("The model is overloaded").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonObject));
    }

    #[test]
    fn test_parse_missing_sql_field_fails_validation() {
        let text = r#"{"kpis": [{
            "name": "Churn Rate",
            "description": "Share of customers lost",
            "tier": "Tactical",
            "pandas": "1 - retained / total",
            "dax": "DIVIDE([Lost], [Total])"
        }]}"#;
        let err = parse_kpi_set(text).unwrap_err();
        assert!(matches!(err, ExtractError::Invalid(_)));
        assert!(err.to_string().contains("sql"));
    }

    #[test]
    fn test_parse_unknown_tier_fails_validation() {
        let text = VALID_KPI.replace("Strategic", "Executive");
        let err = parse_kpi_set(&format!("{{\"kpis\": [{text}]}}")).unwrap_err();
        assert!(matches!(err, ExtractError::Invalid(_)));
    }

    #[test]
    fn test_parse_stray_braces_after_payload_fail() {
        let text = format!("{{\"kpis\": [{VALID_KPI}]}}\nNote: use {{col}} placeholders.");
        assert!(matches!(
            parse_kpi_set(&text).unwrap_err(),
            ExtractError::Invalid(_)
        ));
    }

    #[test]
    fn test_parse_missing_kpis_key_fails() {
        let err = parse_kpi_set(r#"{"results": []}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Invalid(_)));
    }
}
