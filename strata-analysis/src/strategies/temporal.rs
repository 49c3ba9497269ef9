//! Temporal strategy — co-located files changed in the same PR.
//!
//! Intentionally noisy and therefore opt-in: directory co-location says
//! little on monorepos with flat layouts.

use strata_core::types::{Budget, Evidence, Signal};

use crate::artifact::fingerprint::normalize_file_path;

use super::{Strategy, StrategyContext};

pub struct TemporalStrategy;

impl Strategy for TemporalStrategy {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn budget(&self) -> Budget {
        Budget::Medium
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn run(&self, ctx: &StrategyContext) -> Vec<Signal> {
        let mut signals = Vec::new();

        for (i, a) in ctx.artifacts.iter().enumerate() {
            let Some(dir_a) = parent_dir(a.file.as_deref()) else { continue };
            for b in &ctx.artifacts[i + 1..] {
                if a.layer_type == b.layer_type {
                    continue;
                }
                let Some(dir_b) = parent_dir(b.file.as_deref()) else { continue };
                if dir_a != dir_b {
                    continue;
                }
                if !ctx.pair_allowed(&a.artifact_id, &b.artifact_id) {
                    continue;
                }
                signals.push(Signal {
                    source: a.artifact_id.clone(),
                    target: b.artifact_id.clone(),
                    relationship: "temporal_proximity".to_string(),
                    confidence: 0.5,
                    evidence: vec![Evidence::reason(format!("both changed under '{dir_a}/'"))],
                });
            }
        }

        signals
    }
}

fn parent_dir(file: Option<&str>) -> Option<String> {
    let normalized = normalize_file_path(file?);
    let (dir, _) = normalized.rsplit_once('/')?;
    if dir.is_empty() {
        None
    } else {
        Some(dir.to_string())
    }
}
