//! Plain-text export of the current results. Write-only: there is no import.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use kpi_api::models::KpiResult;

pub const EXPORT_FILENAME: &str = "kpi-suggestions.txt";

/// Concatenates every result, in order, in the fixed export layout.
pub fn render_export(results: &[KpiResult]) -> String {
    let mut out = String::new();
    for kpi in results {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "{} ({})\n{}\n\nSQL:\n{}\n\nPandas:\n{}\n\nDAX:\n{}\n\n---\n\n",
            kpi.name, kpi.tier, kpi.description, kpi.sql, kpi.pandas, kpi.dax
        );
    }
    out
}

/// Writes `kpi-suggestions.txt` into `dir`, replacing any previous export.
pub fn write_export(dir: &Path, results: &[KpiResult]) -> std::io::Result<PathBuf> {
    let path = dir.join(EXPORT_FILENAME);
    std::fs::write(&path, render_export(results))?;
    Ok(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use kpi_api::models::KpiTier;

    /// Snippets use the reversed name so the name itself appears only in the header.
    pub(crate) fn kpi(name: &str, tier: KpiTier) -> KpiResult {
        let column: String = name.chars().rev().collect();
        KpiResult {
            name: name.to_string(),
            description: format!("Measures {}", name.to_uppercase()),
            tier,
            sql: format!("SELECT {column}"),
            pandas: format!("df.{column}()"),
            dax: format!("EVAL {column}"),
        }
    }

    #[test]
    fn test_render_single_result_layout() {
        let text = render_export(&[kpi("revenue", KpiTier::Strategic)]);
        assert_eq!(
            text,
            "revenue (Strategic)\nMeasures REVENUE\n\nSQL:\nSELECT eunever\n\n\
             Pandas:\ndf.eunever()\n\nDAX:\nEVAL eunever\n\n---\n\n"
        );
    }

    #[test]
    fn test_render_contains_each_name_and_snippet_once_in_order() {
        let results = vec![
            kpi("churn_rate", KpiTier::Tactical),
            kpi("order_volume", KpiTier::Operational),
            kpi("cohort_retention", KpiTier::Analytical),
        ];
        let text = render_export(&results);

        for result in &results {
            for needle in [&result.name, &result.sql, &result.pandas, &result.dax] {
                assert_eq!(text.matches(needle.as_str()).count(), 1, "{needle}");
            }
        }
        let positions: Vec<usize> = results
            .iter()
            .map(|r| text.find(r.name.as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(text.matches("\n---\n").count(), 3);
    }

    #[test]
    fn test_render_empty_is_empty() {
        assert_eq!(render_export(&[]), "");
    }

    #[test]
    fn test_write_export_uses_fixed_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(dir.path(), &[kpi("revenue", KpiTier::Strategic)]).unwrap();
        assert_eq!(path.file_name().unwrap(), EXPORT_FILENAME);
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("revenue (Strategic)\n"));
    }
}
