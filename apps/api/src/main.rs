use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kpi_api::config::Config;
use kpi_api::generation::schema::kpi_response_schema;
use kpi_api::llm_client::{self, GeminiClient};
use kpi_api::routes::build_router;
use kpi_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing Gemini credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("kpi_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting KPI API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client once; shared by every request for the life of the process
    let mut gemini = GeminiClient::new(config.gemini_api_key.clone(), &config.gemini_base_url)?;
    if config.structured_output {
        gemini = gemini.with_response_schema(kpi_response_schema());
    }
    info!(
        "LLM client initialized (model: {}, structured output: {})",
        llm_client::MODEL,
        gemini.structured_output()
    );

    let state = AppState {
        llm: Arc::new(gemini),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
