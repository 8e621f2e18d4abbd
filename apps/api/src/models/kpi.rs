use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Organizational level a KPI targets. Serialized as the capitalized literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KpiTier {
    Strategic,
    Tactical,
    Operational,
    Analytical,
}

impl KpiTier {
    pub const ALL: [KpiTier; 4] = [
        KpiTier::Strategic,
        KpiTier::Tactical,
        KpiTier::Operational,
        KpiTier::Analytical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KpiTier::Strategic => "Strategic",
            KpiTier::Tactical => "Tactical",
            KpiTier::Operational => "Operational",
            KpiTier::Analytical => "Analytical",
        }
    }
}

impl fmt::Display for KpiTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Tier selection sent with a generation request: every tier, or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TierFilter {
    #[default]
    All,
    Only(KpiTier),
}

impl TierFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierFilter::All => "all",
            TierFilter::Only(tier) => tier.as_str(),
        }
    }
}

impl fmt::Display for TierFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tier '{0}' (expected all, Strategic, Tactical, Operational or Analytical)")]
pub struct UnknownTier(pub String);

impl FromStr for TierFilter {
    type Err = UnknownTier;

    /// Case-insensitive: browser clients historically sent lowercase values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if needle.eq_ignore_ascii_case("all") {
            return Ok(TierFilter::All);
        }
        KpiTier::ALL
            .iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(needle))
            .map(|tier| TierFilter::Only(*tier))
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

impl Serialize for TierFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TierFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Body of `POST /api/generate-kpis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub domain: String,
    pub columns: String,
    pub tier: TierFilter,
}

/// One suggested KPI with three equivalent renderings of the metric.
///
/// Every field is required; keys the model adds beyond these are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    pub name: String,
    pub description: String,
    pub tier: KpiTier,
    pub sql: String,
    pub pandas: String,
    pub dax: String,
}

/// Validated model reply, returned verbatim as the success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub kpis: Vec<KpiResult>,
}
