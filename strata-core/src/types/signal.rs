//! Strategy signals — a single strategy's confidence assertion.

use serde::{Deserialize, Serialize};

use super::edge::{pair_key, Evidence};

/// Cost tier a strategy declares. Low-budget strategies run over the full
/// type-filtered cross product; medium and high run only on the pruned
/// candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Medium,
    High,
}

impl Budget {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One strategy's assertion that two artifacts are related.
#[derive(Debug, Clone)]
pub struct Signal {
    pub source: String,
    pub target: String,
    pub relationship: String,
    pub confidence: f32,
    pub evidence: Vec<Evidence>,
}

impl Signal {
    pub fn key(&self) -> String {
        pair_key(&self.source, &self.target)
    }
}
