//! Risk escalation.
//!
//! Walks an artifact's edges and graph metrics to decide whether severity
//! should be raised, recording a human-readable justification for every
//! step. Severity only ever moves upward here; nothing in this module (or
//! anywhere else) lowers it.

use std::collections::BTreeSet;

use strata_core::config::CorrelationConfig;
use strata_core::types::collections::FxHashSet;
use strata_core::types::{CascadeImpact, CorrelationEdge, DriftArtifact, GraphMetrics, Severity};

use crate::security;

/// Edge count above which the final reasoning line also reports how many
/// correlations scored at least 0.9.
const LARGE_EDGE_SET: usize = 5;

/// Escalate one artifact in place. `metrics` comes from the graph
/// analyzer when available; without it the legacy hard-link counting path
/// applies.
pub fn escalate(
    artifact: &mut DriftArtifact,
    edges: &[CorrelationEdge],
    config: &CorrelationConfig,
    metrics: Option<&GraphMetrics>,
) {
    let correlate_min = config.thresholds.correlate_min;
    let block_min = config.thresholds.block_min;

    let relevant: Vec<&CorrelationEdge> = edges
        .iter()
        .filter(|e| e.touches(&artifact.artifact_id) && e.final_score >= correlate_min)
        .collect();

    let hard: Vec<&CorrelationEdge> =
        relevant.iter().copied().filter(|e| e.final_score >= block_min).collect();
    let soft_count = relevant.len() - hard.len();

    let mut cascade_components: FxHashSet<&str> = FxHashSet::default();
    for edge in &hard {
        if let Some(other) = edge.other(&artifact.artifact_id) {
            cascade_components.insert(other);
        }
    }
    let cascade = cascade_components.len();

    let impact = CascadeImpact {
        hard_link_count: hard.len() as u32,
        soft_link_count: soft_count as u32,
        cascade_component_count: cascade as u32,
        correlations_considered: relevant.len() as u32,
        graph_metrics: metrics.cloned(),
    };

    let original = artifact.severity;

    // Safety rail, checked before any other logic: a critical change is
    // pinned to high and nothing later in this call may touch severity.
    if security::is_critical_change(&artifact.combined_text()) {
        if artifact.severity < Severity::High {
            artifact.severity = Severity::High;
            artifact
                .reasoning
                .push("Severity raised to high: change matches a critical security pattern".to_string());
        }
        finish(artifact, &relevant, original, impact);
        return;
    }

    // Without at least one edge above correlate_min there is nothing to
    // justify an escalation.
    if relevant.is_empty() {
        finish(artifact, &relevant, original, impact);
        return;
    }

    let user_defined: Vec<&CorrelationEdge> =
        relevant.iter().copied().filter(|e| e.user_defined).collect();

    if !user_defined.is_empty() {
        escalate_user_defined(artifact, &user_defined);
    } else if let Some(m) = metrics {
        escalate_with_metrics(artifact, m, cascade);
    } else {
        escalate_legacy(artifact, cascade, hard.len());
    }

    finish(artifact, &relevant, original, impact);
}

/// User-defined correlations: low→medium unconditionally, medium→high only
/// with at least two.
fn escalate_user_defined(artifact: &mut DriftArtifact, user_defined: &[&CorrelationEdge]) {
    let count = user_defined.len();
    let raised = match artifact.severity {
        Severity::Low => {
            artifact.severity = Severity::Medium;
            true
        }
        Severity::Medium if count >= 2 => {
            artifact.severity = Severity::High;
            true
        }
        _ => false,
    };

    if raised {
        artifact
            .reasoning
            .push(format!("Escalated due to {count} user-defined correlation(s)"));
        for edge in user_defined {
            for evidence in &edge.evidence {
                artifact.reasoning.push(format!("User rule: {}", evidence.reason));
            }
        }
    }
}

/// Graph-metric branches, first match wins.
fn escalate_with_metrics(artifact: &mut DriftArtifact, m: &GraphMetrics, cascade: usize) {
    if m.is_root_cause && artifact.severity == Severity::Low {
        artifact.severity = Severity::Medium;
        artifact.reasoning.push(format!(
            "Root cause of correlated changes (blast radius {})",
            m.blast_radius
        ));
    } else if m.is_root_cause && m.blast_radius >= 3 && artifact.severity == Severity::Medium {
        artifact.severity = Severity::High;
        artifact.reasoning.push(format!(
            "Root cause with blast radius {} spanning multiple layers",
            m.blast_radius
        ));
    } else if m.path_confidence >= 0.9 && cascade >= 2 && artifact.severity == Severity::Low {
        artifact.severity = Severity::Medium;
        artifact.reasoning.push(format!(
            "On a high-confidence impact path (confidence {:.2}) with {cascade} strongly linked components",
            m.path_confidence
        ));
    } else if m.risk_score >= 0.7 && artifact.severity < Severity::High {
        artifact.severity = Severity::High;
        artifact
            .reasoning
            .push(format!("Composite graph risk score {:.2} exceeds 0.70", m.risk_score));
    }
}

/// Legacy cascade counting when no graph metrics exist.
fn escalate_legacy(artifact: &mut DriftArtifact, cascade: usize, hard_links: usize) {
    if cascade >= 3 && artifact.severity == Severity::Medium {
        artifact.severity = Severity::High;
        artifact
            .reasoning
            .push(format!("Change cascades into {cascade} cross-layer components"));
    } else if cascade >= 2 && artifact.severity == Severity::Low {
        artifact.severity = Severity::Medium;
        artifact
            .reasoning
            .push(format!("Correlated with {cascade} cross-layer components"));
    } else if hard_links >= 4 && artifact.severity < Severity::High {
        artifact.severity = Severity::High;
        artifact
            .reasoning
            .push(format!("{hard_links} strong correlations indicate broad impact"));
    }
}

/// Shared epilogue: summary reasoning line on change, cascade impact
/// always attached.
fn finish(
    artifact: &mut DriftArtifact,
    relevant: &[&CorrelationEdge],
    original: Severity,
    impact: CascadeImpact,
) {
    if artifact.severity != original {
        let labels: BTreeSet<&str> = relevant
            .iter()
            .flat_map(|e| e.relationships.iter().map(String::as_str))
            .collect();
        if !labels.is_empty() {
            let mut line = format!(
                "Correlated relationships: {}",
                labels.into_iter().collect::<Vec<_>>().join(", ")
            );
            if relevant.len() > LARGE_EDGE_SET {
                let strong = relevant.iter().filter(|e| e.final_score >= 0.9).count();
                line.push_str(&format!(
                    " ({strong} of {} correlations scored >= 0.90)",
                    relevant.len()
                ));
            }
            artifact.reasoning.push(line);
        }

        tracing::debug!(
            artifact = %artifact.artifact_id,
            from = original.name(),
            to = artifact.severity.name(),
            "severity escalated"
        );
    }

    artifact.cascade_impact = Some(impact);
}
