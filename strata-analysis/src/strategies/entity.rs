//! Entity strategy — API endpoints naming the tables they touch.

use std::collections::BTreeSet;

use strata_core::types::{DriftArtifact, Evidence, LayerType, Signal};

use crate::artifact::metadata::path_entities;
use crate::entity::{best_match, variations};

use super::{Strategy, StrategyContext};

/// Minimum entity-match confidence worth a signal.
const MATCH_MIN: f32 = 0.6;

pub struct EntityStrategy;

impl Strategy for EntityStrategy {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn run(&self, ctx: &StrategyContext) -> Vec<Signal> {
        let mut signals = Vec::new();

        for api in ctx.artifacts.iter().filter(|a| a.layer_type == LayerType::Api) {
            let api_vars = api_name_variations(api);
            if api_vars.is_empty() {
                continue;
            }

            for db in ctx.artifacts.iter().filter(|a| a.layer_type == LayerType::Database) {
                if !ctx.pair_allowed(&api.artifact_id, &db.artifact_id) {
                    continue;
                }
                let table_vars = table_name_variations(db);
                if table_vars.is_empty() {
                    continue;
                }

                let m = best_match(&api_vars, &table_vars);
                if m.confidence > MATCH_MIN {
                    let mut evidence = vec![Evidence::reason(format!(
                        "endpoint entity '{}' matches table '{}'",
                        m.pair.0, m.pair.1
                    ))];
                    if let Some(file) = &db.file {
                        evidence.push(Evidence::in_file("table defined here", file.clone()));
                    }
                    signals.push(Signal {
                        source: api.artifact_id.clone(),
                        target: db.artifact_id.clone(),
                        relationship: "api_uses_table".to_string(),
                        confidence: m.confidence,
                        evidence,
                    });
                }
            }
        }

        signals
    }
}

fn api_name_variations(api: &DriftArtifact) -> BTreeSet<String> {
    let mut names: BTreeSet<String> = BTreeSet::new();
    for endpoint in &api.endpoints {
        names.extend(path_entities(endpoint));
    }
    names.extend(api.metadata.entities.iter().cloned());

    let mut vars = BTreeSet::new();
    for name in names {
        vars.extend(variations(&name));
    }
    vars
}

fn table_name_variations(db: &DriftArtifact) -> BTreeSet<String> {
    let mut names: BTreeSet<String> = db.entities.iter().cloned().collect();
    names.extend(db.metadata.entities.iter().cloned());

    let mut vars = BTreeSet::new();
    for name in names {
        vars.extend(variations(&name));
    }
    vars
}
