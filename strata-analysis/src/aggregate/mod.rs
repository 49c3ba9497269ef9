//! Signal aggregation — fuse per-pair strategy signals into edges.
//!
//! Explicit (user-defined) evidence dominates heuristic evidence: an edge
//! with any explicit contribution keeps `final_score = 1.0` no matter what
//! the weighted fusion of heuristic signals would say.

use strata_core::types::collections::{FxHashMap, FxHashSet};
use strata_core::types::{CorrelationEdge, Signal};

use crate::strategies::StrategyRun;

/// Fuse explicit edges and strategy signals into the final edge set,
/// sorted by pair key for deterministic output.
pub fn aggregate(
    explicit_edges: Vec<CorrelationEdge>,
    runs: &[StrategyRun],
    processed: &FxHashSet<String>,
) -> Vec<CorrelationEdge> {
    let mut edges: FxHashMap<String, CorrelationEdge> = FxHashMap::default();
    for edge in explicit_edges {
        edges.insert(edge.key(), edge);
    }

    // Per pair and per strategy, keep only the maximum-confidence signal.
    let mut best: FxHashMap<String, FxHashMap<&str, (&Signal, f32)>> = FxHashMap::default();
    for run in runs {
        for signal in &run.signals {
            let key = signal.key();
            // Pairs claimed by an ignore rule (processed, no explicit edge)
            // stay silent.
            if processed.contains(&key) && !edges.contains_key(&key) {
                continue;
            }
            let per_strategy = best.entry(key).or_default();
            match per_strategy.get(run.strategy) {
                Some((existing, _)) if existing.confidence >= signal.confidence => {}
                _ => {
                    per_strategy.insert(run.strategy, (signal, run.weight));
                }
            }
        }
    }

    for (key, per_strategy) in best {
        // Deterministic strategy order within the pair.
        let mut contributions: Vec<(&str, &Signal, f32)> =
            per_strategy.into_iter().map(|(name, (signal, weight))| (name, signal, weight)).collect();
        contributions.sort_by(|a, b| a.0.cmp(b.0));

        let edge = edges.entry(key).or_insert_with(|| {
            let first = contributions[0].1;
            CorrelationEdge::new(&first.source, &first.target)
        });

        for (strategy, signal, weight) in contributions {
            edge.relationships.insert(signal.relationship.clone());
            edge.scores.insert(strategy.to_string(), signal.confidence);
            edge.weights.insert(strategy.to_string(), weight);
            for item in &signal.evidence {
                edge.push_evidence(item.clone());
            }
        }
    }

    let mut result: Vec<CorrelationEdge> = edges.into_values().collect();
    for edge in &mut result {
        edge.final_score = final_score(edge);
    }
    result.sort_by_key(CorrelationEdge::key);
    result
}

/// 1.0 when any contribution is explicit, otherwise the weighted mean of
/// strategy confidences clamped to [0, 1].
fn final_score(edge: &CorrelationEdge) -> f32 {
    if edge.user_defined {
        return 1.0;
    }
    let mut weighted_sum = 0.0f32;
    let mut weight_total = 0.0f32;
    for (strategy, score) in &edge.scores {
        let weight = edge.weights.get(strategy).copied().unwrap_or(1.0);
        weighted_sum += score * weight;
        weight_total += weight;
    }
    if weight_total <= f32::EPSILON {
        return 0.0;
    }
    (weighted_sum / weight_total).clamp(0.0, 1.0)
}
