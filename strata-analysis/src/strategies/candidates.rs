//! Candidate selection for expensive strategies.
//!
//! Low-budget signals are grouped by source artifact; per source, the
//! top-K above `correlate_min` survive. Rule-referenced pairs are always
//! included. The result is capped at `max_pairs_high_cost` with a
//! deterministic truncation order.

use strata_core::config::CorrelationConfig;
use strata_core::types::collections::{FxHashMap, FxHashSet};

use super::StrategyRun;

/// Select the pair keys expensive strategies may consider.
pub fn select(
    low_runs: &[StrategyRun],
    rule_pairs: &FxHashSet<String>,
    config: &CorrelationConfig,
) -> FxHashSet<String> {
    let top_k = config.limits.top_k();
    let max_pairs = config.limits.max_pairs();
    let correlate_min = config.thresholds.correlate_min;

    // Group low-budget signals by source artifact.
    let mut by_source: FxHashMap<&str, Vec<(&str, f32, String)>> = FxHashMap::default();
    for run in low_runs {
        for signal in &run.signals {
            if signal.confidence >= correlate_min {
                by_source.entry(signal.source.as_str()).or_default().push((
                    signal.target.as_str(),
                    signal.confidence,
                    signal.key(),
                ));
            }
        }
    }

    // Per source: top-K by confidence, pair key as the deterministic
    // tiebreak. Keep the best confidence seen per pair for the global cap.
    let mut best_per_pair: FxHashMap<String, f32> = FxHashMap::default();
    for signals in by_source.values_mut() {
        signals.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.2.cmp(&b.2))
        });
        for (_, confidence, key) in signals.iter().take(top_k) {
            let entry = best_per_pair.entry(key.clone()).or_insert(0.0);
            if *confidence > *entry {
                *entry = *confidence;
            }
        }
    }

    // Rule pairs first, then heuristic candidates by confidence, both in
    // deterministic order, truncated at the cap.
    let mut selected: FxHashSet<String> = FxHashSet::default();
    let mut ordered_rule_pairs: Vec<&String> = rule_pairs.iter().collect();
    ordered_rule_pairs.sort();
    for key in ordered_rule_pairs {
        if selected.len() >= max_pairs {
            break;
        }
        selected.insert(key.clone());
    }

    let mut ranked: Vec<(String, f32)> = best_per_pair.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.cmp(&b.0))
    });
    for (key, _) in ranked {
        if selected.len() >= max_pairs {
            tracing::debug!(cap = max_pairs, "candidate set truncated at max_pairs_high_cost");
            break;
        }
        selected.insert(key);
    }

    selected
}
