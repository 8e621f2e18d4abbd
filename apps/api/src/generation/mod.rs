// KPI Generation Engine
// Implements: prompt construction, the single model call, JSON extraction, schema validation.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod extract;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod schema;
