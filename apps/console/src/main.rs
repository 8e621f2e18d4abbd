//! KPI Console — terminal front-end for the KPI generation endpoint.
//!
//! ```bash
//! kpi-console --domain "E-commerce retail platform" \
//!     --columns "customer_id, order_date, price" --tier strategic \
//!     --copy 1:sql --export .
//! ```

mod backend;
mod clipboard;
mod export;
mod workbench;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use kpi_api::models::TierFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::{HttpKpiBackend, KpiBackend};
use crate::clipboard::SystemClipboard;
use crate::workbench::{
    GenerateStart, Notice, NoticeVariant, SnippetKind, Workbench, TIER_OPTIONS,
};

#[derive(Parser)]
#[command(name = "kpi-console")]
#[command(version)]
#[command(about = "Generate relevant KPIs with SQL, Pandas, and DAX queries")]
struct Cli {
    /// Data domain and description
    #[arg(long, short, default_value = "")]
    domain: String,

    /// Dataset column headings, comma-separated
    #[arg(long, short, default_value = "")]
    columns: String,

    /// KPI tier: all, strategic, tactical, operational, analytical
    #[arg(long, short, default_value = "all")]
    tier: TierFilter,

    /// Base URL of the KPI API
    #[arg(long, env = "KPI_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Copy one snippet to the clipboard, e.g. `2:pandas` (1-based KPI index)
    #[arg(long, value_parser = parse_copy_target)]
    copy: Option<(usize, SnippetKind)>,

    /// Write kpi-suggestions.txt into this directory
    #[arg(long)]
    export: Option<PathBuf>,

    /// List the tier options and exit
    #[arg(long)]
    list_tiers: bool,
}

fn parse_copy_target(raw: &str) -> Result<(usize, SnippetKind), String> {
    let (index, kind) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected INDEX:SNIPPET, got '{raw}'"))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid KPI index '{index}'"))?;
    if index == 0 {
        return Err("KPI index is 1-based".to_string());
    }
    let kind = kind.parse::<SnippetKind>().map_err(|e| e.to_string())?;
    Ok((index - 1, kind))
}

fn print_notice(notice: &Notice) {
    match notice.variant {
        NoticeVariant::Default => println!("* {}: {}", notice.title, notice.description),
        NoticeVariant::Destructive => eprintln!("! {}: {}", notice.title, notice.description),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("kpi_console=warn")
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when generation did not produce results.
async fn run(cli: Cli) -> Result<bool> {
    if cli.list_tiers {
        for option in TIER_OPTIONS {
            println!("{:<12} {:<12} {}", option.value, option.label, option.description);
        }
        return Ok(true);
    }

    let backend = HttpKpiBackend::new(cli.api_url);

    let mut bench = Workbench::new();
    bench.domain = cli.domain;
    bench.columns = cli.columns;
    bench.select_tier(cli.tier);

    let notice = match bench.begin_generate() {
        GenerateStart::Ready(request) => {
            eprint!("{}", bench.render());
            let outcome = backend.generate(&request).await;
            Some(bench.finish_generate(outcome))
        }
        GenerateStart::Rejected(notice) => Some(notice),
        GenerateStart::Busy => None,
    };
    print!("{}", bench.render());
    if let Some(notice) = &notice {
        print_notice(notice);
    }
    if bench.results().is_empty() {
        return Ok(false);
    }

    if let Some(dir) = cli.export {
        let (path, notice) = bench
            .export(&dir)
            .with_context(|| format!("failed to write export into {}", dir.display()))?;
        print_notice(&notice);
        println!("  {}", path.display());
    }

    // Copy last: on Linux the process serves the clipboard until it is replaced.
    if let Some((index, kind)) = cli.copy {
        if index >= bench.results().len() {
            return Err(anyhow!("no KPI #{} to copy from", index + 1));
        }
        let mut clipboard = SystemClipboard::default();
        if clipboard.holds_until_replaced() {
            eprintln!("Holding the clipboard until something else is copied (Ctrl+C to quit).");
        }
        if let Some(notice) = bench.copy_snippet(index, kind, &mut clipboard) {
            print_notice(&notice);
        }
    }

    Ok(true)
}
