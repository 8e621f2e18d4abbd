use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Built once at startup; nothing in it is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide upstream. `GeminiClient` in production, stubbed in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
