pub mod kpi;

pub use kpi::{GenerationRequest, KpiResult, KpiSet, KpiTier, TierFilter};
