//! Strategy pipeline tests — individual strategies, processed-pair
//! skipping, and candidate pruning.

use strata_analysis::artifact::normalize;
use strata_analysis::strategies::{
    candidates, DependencyStrategy, EntityStrategy, OperationStrategy, Strategy, StrategyContext,
    StrategyPipeline, StrategyRun, TemporalStrategy,
};
use strata_core::config::CorrelationConfig;
use strata_core::types::collections::FxHashSet;
use strata_core::types::{pair_key, DriftArtifact, Evidence, LayerType, Severity, Signal};

fn api_artifact(endpoint: &str) -> DriftArtifact {
    let mut a = DriftArtifact::new(LayerType::Api, Severity::Low);
    a.endpoints = vec![endpoint.to_string()];
    a.changes = vec![format!("ADDED ENDPOINT: {endpoint}")];
    a
}

fn db_artifact(table: &str, change: &str) -> DriftArtifact {
    let mut a = DriftArtifact::new(LayerType::Database, Severity::Medium);
    a.entities = vec![table.to_string()];
    a.changes = vec![change.to_string()];
    a
}

fn config_artifact(file: &str, changes: &[&str]) -> DriftArtifact {
    let mut a = DriftArtifact::new(LayerType::Configuration, Severity::Low);
    a.file = Some(file.to_string());
    a.changes = changes.iter().map(|c| c.to_string()).collect();
    a
}

fn infra_artifact(resource: &str, change: &str) -> DriftArtifact {
    let mut a = DriftArtifact::new(LayerType::Infrastructure, Severity::Medium);
    a.resources = vec![resource.to_string()];
    a.changes = vec![change.to_string()];
    a
}

fn ctx<'a>(
    artifacts: &'a [DriftArtifact],
    config: &'a CorrelationConfig,
    processed: &'a FxHashSet<String>,
) -> StrategyContext<'a> {
    StrategyContext { artifacts, config, processed, candidates: None }
}

#[test]
fn entity_strategy_links_endpoint_to_table() {
    let artifacts = normalize(vec![
        api_artifact("POST /users"),
        db_artifact("users", "CREATE TABLE users"),
        db_artifact("invoices", "CREATE TABLE invoices"),
    ]);
    let config = CorrelationConfig::default();
    let processed = FxHashSet::default();

    let signals = EntityStrategy.run(&ctx(&artifacts, &config, &processed));

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].relationship, "api_uses_table");
    assert!(signals[0].confidence > 0.6);
    assert!(signals[0].target.contains("db:users"));
}

#[test]
fn operation_strategy_scores_scale_with_overlap() {
    let artifacts = normalize(vec![
        api_artifact("POST /users"),
        db_artifact("users", "INSERT INTO users"),
    ]);
    let config = CorrelationConfig::default();
    let processed = FxHashSet::default();

    let signals = OperationStrategy.run(&ctx(&artifacts, &config, &processed));

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].relationship, "operation_alignment");
    // One shared operation (create) → 0.6 + 0.1.
    assert!((signals[0].confidence - 0.7).abs() < 1e-6);
}

#[test]
fn dependency_strategy_links_manifest_to_layers() {
    let artifacts = normalize(vec![
        config_artifact("package.json", &["ADDED DEPENDENCY: express@4.18", "ADDED DEPENDENCY: prisma@5"]),
        api_artifact("GET /health"),
        db_artifact("users", "CREATE TABLE users"),
    ]);
    let config = CorrelationConfig::default();
    let processed = FxHashSet::default();

    let signals = DependencyStrategy.run(&ctx(&artifacts, &config, &processed));

    let relationships: Vec<&str> = signals.iter().map(|s| s.relationship.as_str()).collect();
    assert!(relationships.contains(&"dependency_api_framework"));
    assert!(relationships.contains(&"dependency_database_driver"));
}

#[test]
fn temporal_strategy_needs_shared_directory() {
    let artifacts = normalize(vec![
        {
            let mut a = api_artifact("GET /users");
            a.file = Some("services/billing/openapi.yaml".to_string());
            a
        },
        config_artifact("services/billing/app.yaml", &["MODIFIED: timeout"]),
        config_artifact("other/dir/app.yaml", &["MODIFIED: retries"]),
    ]);
    let config = CorrelationConfig::default();
    let processed = FxHashSet::default();

    let signals = TemporalStrategy.run(&ctx(&artifacts, &config, &processed));

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].relationship, "temporal_proximity");
}

#[test]
fn processed_pairs_are_never_reconsidered() {
    let artifacts = normalize(vec![
        api_artifact("POST /users"),
        db_artifact("users", "CREATE TABLE users"),
    ]);
    let config = CorrelationConfig::default();
    let mut processed = FxHashSet::default();
    processed.insert(pair_key(&artifacts[0].artifact_id, &artifacts[1].artifact_id));

    let signals = EntityStrategy.run(&ctx(&artifacts, &config, &processed));
    assert!(signals.is_empty());
}

#[test]
fn temporal_is_disabled_by_default_in_the_pipeline() {
    let artifacts = normalize(vec![
        {
            let mut a = api_artifact("GET /users");
            a.file = Some("app/openapi.yaml".to_string());
            a
        },
        config_artifact("app/settings.yaml", &["MODIFIED: timeout"]),
    ]);
    let config = CorrelationConfig::default();
    let processed = FxHashSet::default();
    let rule_pairs = FxHashSet::default();

    let runs = StrategyPipeline::new().run(&artifacts, &config, &processed, &rule_pairs);
    assert!(runs.iter().all(|r| r.strategy != "temporal"));

    let enabled = CorrelationConfig::from_yaml("strategy_weights: { temporal: { enabled: true } }")
        .unwrap();
    let runs = StrategyPipeline::new().run(&artifacts, &enabled, &processed, &rule_pairs);
    assert!(runs.iter().any(|r| r.strategy == "temporal"));
}

#[test]
fn disabled_strategy_emits_nothing() {
    let artifacts = normalize(vec![
        api_artifact("POST /users"),
        db_artifact("users", "CREATE TABLE users"),
    ]);
    let config =
        CorrelationConfig::from_yaml("strategy_weights: { entity: { enabled: false } }").unwrap();
    let processed = FxHashSet::default();
    let rule_pairs = FxHashSet::default();

    let runs = StrategyPipeline::new().run(&artifacts, &config, &processed, &rule_pairs);
    assert!(runs.iter().all(|r| r.strategy != "entity"));
}

fn synthetic_low_run(count: usize) -> StrategyRun {
    let signals = (0..count)
        .map(|i| Signal {
            source: format!("api:GET /s{i}"),
            target: format!("db:t{i}"),
            relationship: "api_uses_table".to_string(),
            confidence: 0.7,
            evidence: vec![Evidence::reason("synthetic")],
        })
        .collect();
    StrategyRun { strategy: "entity", weight: 1.0, signals }
}

#[test]
fn candidate_set_respects_the_high_cost_cap() {
    let mut config = CorrelationConfig::default();
    config.limits.max_pairs_high_cost = 10;
    config.normalize();

    let runs = vec![synthetic_low_run(50)];
    let rule_pairs = FxHashSet::default();

    let selected = candidates::select(&runs, &rule_pairs, &config);
    assert!(selected.len() <= config.limits.max_pairs());
}

#[test]
fn candidate_selection_keeps_top_k_per_source() {
    let mut signals = Vec::new();
    for (i, confidence) in [0.9f32, 0.8, 0.7, 0.6].iter().enumerate() {
        signals.push(Signal {
            source: "api:GET /users".to_string(),
            target: format!("db:t{i}"),
            relationship: "api_uses_table".to_string(),
            confidence: *confidence,
            evidence: Vec::new(),
        });
    }
    let runs = vec![StrategyRun { strategy: "entity", weight: 1.0, signals }];
    let config = CorrelationConfig::default(); // top_k = 3
    let rule_pairs = FxHashSet::default();

    let selected = candidates::select(&runs, &rule_pairs, &config);
    assert_eq!(selected.len(), 3);
    assert!(!selected.contains(&pair_key("api:GET /users", "db:t3")));
}

#[test]
fn rule_pairs_always_join_the_candidate_set() {
    let config = CorrelationConfig::default();
    let mut rule_pairs = FxHashSet::default();
    rule_pairs.insert(pair_key("api:GET /users", "db:users"));

    let selected = candidates::select(&[], &rule_pairs, &config);
    assert!(selected.contains(&pair_key("api:GET /users", "db:users")));
}

#[test]
fn below_threshold_signals_never_become_candidates() {
    let signals = vec![Signal {
        source: "api:GET /users".to_string(),
        target: "db:users".to_string(),
        relationship: "api_uses_table".to_string(),
        confidence: 0.4, // below correlate_min = 0.55
        evidence: Vec::new(),
    }];
    let runs = vec![StrategyRun { strategy: "entity", weight: 1.0, signals }];
    let config = CorrelationConfig::default();
    let rule_pairs = FxHashSet::default();

    let selected = candidates::select(&runs, &rule_pairs, &config);
    assert!(selected.is_empty());
}

#[test]
fn infrastructure_strategy_runs_on_the_candidate_set_only() {
    let artifacts = normalize(vec![
        infra_artifact("aws_api_gateway.main", "MODIFIED: aws_api_gateway.main"),
        api_artifact("GET /users"),
    ]);
    let config = CorrelationConfig::default();
    let processed = FxHashSet::default();

    // Not in candidates → no signal.
    let empty = FxHashSet::default();
    let pruned = StrategyContext {
        artifacts: &artifacts,
        config: &config,
        processed: &processed,
        candidates: Some(&empty),
    };
    let signals = strata_analysis::strategies::InfrastructureStrategy.run(&pruned);
    assert!(signals.is_empty());

    // In candidates → the gateway/API link appears.
    let mut allowed = FxHashSet::default();
    allowed.insert(pair_key(&artifacts[0].artifact_id, &artifacts[1].artifact_id));
    let pruned = StrategyContext {
        artifacts: &artifacts,
        config: &config,
        processed: &processed,
        candidates: Some(&allowed),
    };
    let signals = strata_analysis::strategies::InfrastructureStrategy.run(&pruned);
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].relationship, "infra_affects_api");
}
