//! Rule resolution — explicit links and ignore directives, with the
//! critical-change safety rail.

use strata_core::types::collections::{FxHashMap, FxHashSet};
use strata_core::types::{pair_key, CorrelationEdge, CorrelationRule, DriftArtifact, Evidence};

use crate::security;

/// Strategy-map key under which explicit rule contributions are recorded.
pub const RULE_STRATEGY: &str = "user_rule";

/// Output of rule resolution.
#[derive(Debug, Default)]
pub struct RuleResolution {
    /// Edges produced by non-ignore rules, `final_score = 1.0`.
    pub explicit_edges: Vec<CorrelationEdge>,
    /// Pair keys no heuristic strategy may reconsider. Write-once: the
    /// first rule to claim a pair wins.
    pub processed_pairs: FxHashSet<String>,
    /// Pairs referenced by non-ignore rules; always part of the candidate
    /// set for expensive strategies.
    pub rule_pairs: FxHashSet<String>,
}

/// Resolve user rules against normalized artifacts.
pub fn resolve(artifacts: &[DriftArtifact], rules: &[CorrelationRule]) -> RuleResolution {
    let mut resolution = RuleResolution::default();
    let mut edges: FxHashMap<String, CorrelationEdge> = FxHashMap::default();

    for rule in rules {
        let sources = matching_artifacts(artifacts, &rule.source);
        let targets = matching_artifacts(artifacts, &rule.target);
        if sources.is_empty() || targets.is_empty() {
            tracing::debug!(
                source = %rule.source,
                target = %rule.target,
                "correlation rule matched no artifact pair"
            );
            continue;
        }

        for &si in &sources {
            for &ti in &targets {
                let a = &artifacts[si];
                let b = &artifacts[ti];
                if a.artifact_id == b.artifact_id {
                    continue;
                }
                let key = pair_key(&a.artifact_id, &b.artifact_id);
                let claimed = resolution.processed_pairs.contains(&key);

                if rule.rule_type.is_ignore() {
                    if claimed {
                        continue;
                    }
                    // Safety rail: an ignore rule must never silence a
                    // genuinely dangerous cross-layer relationship.
                    if security::is_critical_pair(a, b) {
                        tracing::warn!(
                            source = %a.artifact_id,
                            target = %b.artifact_id,
                            "ignore rule refused: pair matches a critical security pattern"
                        );
                        continue;
                    }
                    resolution.processed_pairs.insert(key);
                    continue;
                }

                // A pair claimed without an edge belongs to an earlier
                // ignore rule; the first writer wins.
                if claimed && !edges.contains_key(&key) {
                    continue;
                }

                let edge = edges.entry(key.clone()).or_insert_with(|| {
                    let mut edge = CorrelationEdge::new(&a.artifact_id, &b.artifact_id);
                    edge.user_defined = true;
                    edge.final_score = 1.0;
                    edge.scores.insert(RULE_STRATEGY.to_string(), 1.0);
                    edge.weights.insert(RULE_STRATEGY.to_string(), 1.0);
                    edge
                });
                edge.relationships.insert(rule.rule_type.relationship().to_string());
                if let Some(description) = &rule.description {
                    edge.push_evidence(Evidence::reason(description.clone()));
                }
                if let Some(reason) = &rule.reason {
                    edge.push_evidence(Evidence::reason(reason.clone()));
                }

                resolution.processed_pairs.insert(key.clone());
                resolution.rule_pairs.insert(key);
            }
        }
    }

    let mut explicit: Vec<(String, CorrelationEdge)> = edges.into_iter().collect();
    explicit.sort_by(|(a, _), (b, _)| a.cmp(b));
    resolution.explicit_edges = explicit.into_iter().map(|(_, e)| e).collect();
    resolution
}

/// Indices of artifacts a rule token resolves to.
fn matching_artifacts(artifacts: &[DriftArtifact], token: &str) -> Vec<usize> {
    let token = token.trim();
    if token.is_empty() {
        return Vec::new();
    }

    if token.contains('*') || token.contains('?') {
        match glob::Pattern::new(&token.to_lowercase()) {
            Ok(pattern) => artifacts
                .iter()
                .enumerate()
                .filter(|(_, a)| {
                    a.match_targets().iter().any(|t| pattern.matches(&t.to_lowercase()))
                })
                .map(|(i, _)| i)
                .collect(),
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "invalid glob in correlation rule");
                Vec::new()
            }
        }
    } else {
        let needle = token.to_lowercase();
        artifacts
            .iter()
            .enumerate()
            .filter(|(_, a)| {
                a.match_targets().iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect()
    }
}
