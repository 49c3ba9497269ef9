//! Root-cause records and cascade impact attached after escalation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootCauseKind {
    RootCause,
    LikelyRootCause,
}

impl RootCauseKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RootCause => "root_cause",
            Self::LikelyRootCause => "likely_root_cause",
        }
    }
}

/// Produced once per analysis run by the graph analyzer; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootCauseRecord {
    /// Fingerprint of the root-cause artifact.
    pub artifact: String,
    pub kind: RootCauseKind,
    pub confidence: f32,
}

/// Graph-derived metrics for one artifact, present when the analyzer had
/// at least one edge to work with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetrics {
    /// Artifacts reachable from this one via the correlation graph.
    pub blast_radius: u32,
    pub risk_score: f32,
    /// Best product of edge scores on a path from any root cause.
    pub path_confidence: f32,
    pub path_depth: u32,
    pub is_root_cause: bool,
    /// Incident edge count per relationship label.
    pub impact_by_relationship: BTreeMap<String, u32>,
}

/// Correlation summary the escalator attaches to every artifact it visits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeImpact {
    /// Edges at or above `block_min`.
    pub hard_link_count: u32,
    /// Edges between `correlate_min` and `block_min`.
    pub soft_link_count: u32,
    /// Distinct other artifacts reached via hard links.
    pub cascade_component_count: u32,
    pub correlations_considered: u32,
    #[serde(default)]
    pub graph_metrics: Option<GraphMetrics>,
}
