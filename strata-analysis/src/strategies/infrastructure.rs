//! Infrastructure strategy — IaC resources affecting config and API
//! surfaces.

use std::collections::BTreeSet;

use strata_core::types::{Budget, DriftArtifact, Evidence, LayerType, Signal};

use crate::entity::{best_match, variations};

use super::{Strategy, StrategyContext};

/// File-name fragments that mark environment/terraform-style configuration.
const ENV_FILE_HINTS: &[&str] =
    &[".tf", "terraform", ".tfvars", ".env", "environment", "vars", "settings"];

/// Resource-name terms that indicate an API-facing piece of infrastructure.
const API_RESOURCE_TERMS: &[&str] =
    &["api", "gateway", "function", "lambda", "service", "endpoint", "route", "ingress"];

pub struct InfrastructureStrategy;

impl Strategy for InfrastructureStrategy {
    fn name(&self) -> &'static str {
        "infrastructure"
    }

    fn budget(&self) -> Budget {
        Budget::Medium
    }

    fn run(&self, ctx: &StrategyContext) -> Vec<Signal> {
        let mut signals = Vec::new();

        for infra in ctx.artifacts.iter().filter(|a| a.layer_type == LayerType::Infrastructure) {
            let resource_vars = resource_variations(infra);

            for other in ctx.artifacts {
                if !ctx.pair_allowed(&infra.artifact_id, &other.artifact_id) {
                    continue;
                }

                match other.layer_type {
                    LayerType::Configuration => {
                        if let Some(signal) = link_config(infra, other, &resource_vars) {
                            signals.push(signal);
                        }
                    }
                    LayerType::Api => {
                        if let Some(signal) = link_api(infra, other) {
                            signals.push(signal);
                        }
                    }
                    _ => {}
                }
            }
        }

        signals
    }
}

fn link_config(
    infra: &DriftArtifact,
    config: &DriftArtifact,
    resource_vars: &BTreeSet<String>,
) -> Option<Signal> {
    if let Some(file) = config.file.as_deref() {
        let lower = file.to_lowercase();
        if ENV_FILE_HINTS.iter().any(|hint| lower.contains(hint)) {
            return Some(Signal {
                source: infra.artifact_id.clone(),
                target: config.artifact_id.clone(),
                relationship: "infra_affects_config".to_string(),
                confidence: 0.65,
                evidence: vec![Evidence::in_file(
                    "environment-style configuration file",
                    file.to_string(),
                )],
            });
        }
    }

    // No file hint: fall back to matching resource names against config
    // keys and entities.
    let mut config_vars = BTreeSet::new();
    for name in config.metadata.fields.iter().chain(config.metadata.entities.iter()) {
        config_vars.extend(variations(name));
    }
    if resource_vars.is_empty() || config_vars.is_empty() {
        return None;
    }
    let m = best_match(resource_vars, &config_vars);
    if m.confidence > 0.6 {
        return Some(Signal {
            source: infra.artifact_id.clone(),
            target: config.artifact_id.clone(),
            relationship: "infra_affects_config".to_string(),
            confidence: m.confidence,
            evidence: vec![Evidence::reason(format!(
                "resource '{}' matches config name '{}'",
                m.pair.0, m.pair.1
            ))],
        });
    }
    None
}

fn link_api(infra: &DriftArtifact, api: &DriftArtifact) -> Option<Signal> {
    let resource = infra
        .resources
        .first()
        .map(String::as_str)
        .or(infra.file.as_deref())?
        .to_lowercase();
    let term = API_RESOURCE_TERMS.iter().find(|t| resource.contains(*t))?;

    Some(Signal {
        source: infra.artifact_id.clone(),
        target: api.artifact_id.clone(),
        relationship: "infra_affects_api".to_string(),
        confidence: 0.7,
        evidence: vec![Evidence::reason(format!(
            "resource '{resource}' looks API-facing ('{term}')"
        ))],
    })
}

fn resource_variations(infra: &DriftArtifact) -> BTreeSet<String> {
    let mut vars = BTreeSet::new();
    for name in infra.metadata.entities.iter() {
        vars.extend(variations(name));
    }
    vars
}
