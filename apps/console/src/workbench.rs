//! Workbench — the single mutable view state behind the console.
//!
//! Holds `{domain, columns, selected_tier, results, loading}` and the three
//! user actions: generate, copy a snippet, export. Every action reports back
//! through a `Notice`; error causes are never shown to the user.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use kpi_api::models::{GenerationRequest, KpiResult, KpiSet, KpiTier, TierFilter};
use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{BackendError, KpiBackend};
use crate::clipboard::Clipboard;
use crate::export::write_export;

/// One entry of the tier toggle.
#[derive(Debug, Clone, Copy)]
pub struct TierOption {
    pub value: TierFilter,
    pub label: &'static str,
    pub description: &'static str,
}

pub const TIER_OPTIONS: [TierOption; 5] = [
    TierOption {
        value: TierFilter::All,
        label: "All Tiers",
        description: "Generate KPIs across all organizational levels",
    },
    TierOption {
        value: TierFilter::Only(KpiTier::Strategic),
        label: "Strategic",
        description: "Long-term company goals and vision",
    },
    TierOption {
        value: TierFilter::Only(KpiTier::Tactical),
        label: "Tactical",
        description: "Department-level performance metrics",
    },
    TierOption {
        value: TierFilter::Only(KpiTier::Operational),
        label: "Operational",
        description: "Day-to-day tasks and individual contributions",
    },
    TierOption {
        value: TierFilter::Only(KpiTier::Analytical),
        label: "Analytical",
        description: "Deep data analysis and trend identification",
    },
];

pub const EMPTY_PLACEHOLDER: &str =
    "No KPIs yet. Describe your dataset and its columns, then generate suggestions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Toast-style feedback for a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    fn destructive(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }
}

/// Which of the three code renderings to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetKind {
    Sql,
    Pandas,
    Dax,
}

impl SnippetKind {
    pub fn label(&self) -> &'static str {
        match self {
            SnippetKind::Sql => "SQL",
            SnippetKind::Pandas => "Pandas",
            SnippetKind::Dax => "DAX",
        }
    }

    pub fn of<'a>(&self, kpi: &'a KpiResult) -> &'a str {
        match self {
            SnippetKind::Sql => &kpi.sql,
            SnippetKind::Pandas => &kpi.pandas,
            SnippetKind::Dax => &kpi.dax,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown snippet '{0}' (expected sql, pandas or dax)")]
pub struct UnknownSnippet(pub String);

impl FromStr for SnippetKind {
    type Err = UnknownSnippet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sql" => Ok(SnippetKind::Sql),
            "pandas" => Ok(SnippetKind::Pandas),
            "dax" => Ok(SnippetKind::Dax),
            other => Err(UnknownSnippet(other.to_string())),
        }
    }
}

/// Result of asking the workbench to start a generation.
#[derive(Debug)]
pub enum GenerateStart {
    /// Loading is now set. Send this request and hand the outcome to `finish_generate`.
    Ready(GenerationRequest),
    /// Blank input. Nothing was sent and loading is unchanged.
    Rejected(Notice),
    /// A generation is already in flight.
    Busy,
}

#[derive(Debug, Default)]
pub struct Workbench {
    pub domain: String,
    pub columns: String,
    selected_tier: TierFilter,
    results: Vec<KpiResult>,
    loading: bool,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tier(&self) -> TierFilter {
        self.selected_tier
    }

    /// Single-select: the new tier replaces the previous one.
    pub fn select_tier(&mut self, tier: TierFilter) {
        self.selected_tier = tier;
    }

    pub fn results(&self) -> &[KpiResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_generate(&self) -> bool {
        !self.loading
    }

    /// First half of a generation round trip.
    ///
    /// Blank domain or columns is rejected with a notice. Otherwise loading is
    /// set and the request to send is returned.
    pub fn begin_generate(&mut self) -> GenerateStart {
        if self.domain.trim().is_empty() || self.columns.trim().is_empty() {
            return GenerateStart::Rejected(Notice::destructive(
                "Missing Information",
                "Please provide both domain description and column headings.",
            ));
        }
        if !self.can_generate() {
            return GenerateStart::Busy;
        }

        self.loading = true;
        GenerateStart::Ready(GenerationRequest {
            domain: self.domain.clone(),
            columns: self.columns.clone(),
            tier: self.selected_tier,
        })
    }

    /// Second half: clears loading and applies the backend outcome.
    /// On failure the previous results are kept.
    pub fn finish_generate(&mut self, outcome: Result<KpiSet, BackendError>) -> Notice {
        self.loading = false;

        match outcome {
            Ok(set) => {
                info!("Received {} KPIs", set.kpis.len());
                self.results = set.kpis;
                Notice::info(
                    "KPIs Generated Successfully",
                    format!(
                        "Generated {} relevant KPIs for your dataset.",
                        self.results.len()
                    ),
                )
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                Notice::destructive(
                    "Generation Failed",
                    "Failed to generate KPIs. Please try again.",
                )
            }
        }
    }

    /// Runs one full round trip. `None` means a generation was already in flight.
    pub async fn generate(&mut self, backend: &dyn KpiBackend) -> Option<Notice> {
        match self.begin_generate() {
            GenerateStart::Ready(request) => {
                let outcome = backend.generate(&request).await;
                Some(self.finish_generate(outcome))
            }
            GenerateStart::Rejected(notice) => Some(notice),
            GenerateStart::Busy => None,
        }
    }

    /// Copies one snippet of one result. Fire-and-forget: a clipboard failure is logged only.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn copy_snippet(
        &self,
        index: usize,
        kind: SnippetKind,
        clipboard: &mut dyn Clipboard,
    ) -> Option<Notice> {
        let kpi = self.results.get(index)?;
        if let Err(e) = clipboard.set_text(kind.of(kpi)) {
            warn!("Clipboard write failed: {e}");
        }
        Some(Notice::info(
            "Copied!",
            format!("{} code copied to clipboard.", kind.label()),
        ))
    }

    /// Writes every current result to `kpi-suggestions.txt` in `dir`.
    pub fn export(&self, dir: &Path) -> std::io::Result<(PathBuf, Notice)> {
        let path = write_export(dir, &self.results)?;
        Ok((
            path,
            Notice::info("Download Started", "Your KPI suggestions are being downloaded."),
        ))
    }

    /// Text rendering of the results pane.
    pub fn render(&self) -> String {
        if self.is_loading() {
            return "Generating KPIs...\n".to_string();
        }
        if self.results.is_empty() {
            return format!("{EMPTY_PLACEHOLDER}\n");
        }

        let mut out = format!("Generated KPIs ({})\n\n", self.results.len());
        for (i, kpi) in self.results.iter().enumerate() {
            let _ = writeln!(out, "[{}] {}  <{}>", i + 1, kpi.name, kpi.tier);
            let _ = writeln!(out, "    {}", kpi.description);
            for kind in [SnippetKind::Sql, SnippetKind::Pandas, SnippetKind::Dax] {
                let _ = writeln!(out, "  {}:", kind.label());
                for line in kind.of(kpi).lines() {
                    let _ = writeln!(out, "    {line}");
                }
            }
            out.push('\n');
        }
        out
    }
}
