//! Operation strategy — CRUD alignment across layers.

use strata_core::types::{Evidence, Signal};

use super::{Strategy, StrategyContext};

pub struct OperationStrategy;

impl Strategy for OperationStrategy {
    fn name(&self) -> &'static str {
        "operation"
    }

    fn run(&self, ctx: &StrategyContext) -> Vec<Signal> {
        let mut signals = Vec::new();

        for (i, a) in ctx.artifacts.iter().enumerate() {
            if a.metadata.operations.is_empty() {
                continue;
            }
            for b in &ctx.artifacts[i + 1..] {
                // Cross-layer only; same-layer CRUD overlap is noise.
                if a.layer_type == b.layer_type {
                    continue;
                }
                if !ctx.pair_allowed(&a.artifact_id, &b.artifact_id) {
                    continue;
                }

                let shared: Vec<&str> = a
                    .metadata
                    .operations
                    .intersection(&b.metadata.operations)
                    .map(String::as_str)
                    .collect();
                if shared.is_empty() {
                    continue;
                }

                let confidence = (0.6 + 0.1 * shared.len() as f32).min(0.9);
                signals.push(Signal {
                    source: a.artifact_id.clone(),
                    target: b.artifact_id.clone(),
                    relationship: "operation_alignment".to_string(),
                    confidence,
                    evidence: vec![Evidence::reason(format!(
                        "shared operations: {}",
                        shared.join(", ")
                    ))],
                });
            }
        }

        signals
    }
}
