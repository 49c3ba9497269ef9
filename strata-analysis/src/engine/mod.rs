//! Pipeline orchestration.
//!
//! One `run` call is one analysis: all state (candidate sets, processed
//! pairs, the edge map) is scoped to the call and discarded with it. The
//! phases execute strictly in order with no feedback loop, and nothing
//! here blocks on network or disk I/O.

use strata_core::config::CorrelationConfig;
use strata_core::types::{CorrelationEdge, DriftArtifact, RootCauseRecord};

use crate::aggregate::aggregate;
use crate::artifact::normalize;
use crate::escalate::escalate;
use crate::graph::{compute_graph_metrics, find_root_causes};
use crate::rules;
use crate::strategies::StrategyPipeline;

/// Everything one analysis run produces, ready for rendering and
/// exit-code mapping downstream.
#[derive(Debug)]
pub struct CorrelationOutcome {
    /// Normalized artifacts with escalated severities, reasoning, and
    /// cascade impact.
    pub artifacts: Vec<DriftArtifact>,
    pub edges: Vec<CorrelationEdge>,
    pub root_causes: Vec<RootCauseRecord>,
}

/// The correlation/risk engine.
pub struct CorrelationEngine {
    config: CorrelationConfig,
    pipeline: StrategyPipeline,
}

impl CorrelationEngine {
    /// Build an engine. The configuration is normalized up front, so
    /// malformed values are already clamped by the time strategies read
    /// them.
    pub fn new(mut config: CorrelationConfig) -> Self {
        config.normalize();
        Self { config, pipeline: StrategyPipeline::new() }
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Run one full analysis over raw analyzer artifacts.
    pub fn run(&self, raw: Vec<DriftArtifact>) -> CorrelationOutcome {
        let mut artifacts = normalize(raw);

        let resolution = rules::resolve(&artifacts, &self.config.correlation_rules);
        tracing::debug!(
            explicit = resolution.explicit_edges.len(),
            processed = resolution.processed_pairs.len(),
            "rules resolved"
        );

        let runs = self.pipeline.run(
            &artifacts,
            &self.config,
            &resolution.processed_pairs,
            &resolution.rule_pairs,
        );

        let edges = aggregate(resolution.explicit_edges, &runs, &resolution.processed_pairs);
        tracing::debug!(edges = edges.len(), "signals aggregated");

        let root_causes = find_root_causes(&edges, &artifacts);
        let metrics = compute_graph_metrics(&edges, &artifacts, &root_causes);

        for artifact in &mut artifacts {
            let artifact_metrics = metrics.get(&artifact.artifact_id);
            escalate(artifact, &edges, &self.config, artifact_metrics);
        }

        tracing::debug!(
            artifacts = artifacts.len(),
            root_causes = root_causes.len(),
            "analysis complete"
        );
        CorrelationOutcome { artifacts, edges, root_causes }
    }
}
