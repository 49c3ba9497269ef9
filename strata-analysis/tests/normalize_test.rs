//! Artifact normalizer tests — expansion, fingerprint stability, metadata.

use strata_analysis::artifact::normalize;
use strata_core::types::{DriftArtifact, LayerType, Severity};

fn api_artifact(endpoints: &[&str]) -> DriftArtifact {
    let mut a = DriftArtifact::new(LayerType::Api, Severity::Low);
    a.endpoints = endpoints.iter().map(|e| e.to_string()).collect();
    a.changes = endpoints.iter().map(|e| format!("ADDED ENDPOINT: {e}")).collect();
    a
}

fn db_artifact(table: &str, change: &str) -> DriftArtifact {
    let mut a = DriftArtifact::new(LayerType::Database, Severity::Medium);
    a.entities = vec![table.to_string()];
    a.changes = vec![change.to_string()];
    a
}

#[test]
fn multi_endpoint_artifacts_expand_to_atomic_units() {
    let bundled = api_artifact(&["GET /users", "POST /users", "DELETE /users/{id}"]);
    let artifacts = normalize(vec![bundled]);

    assert_eq!(artifacts.len(), 3);
    for artifact in &artifacts {
        assert_eq!(artifact.endpoints.len(), 1);
        assert!(!artifact.artifact_id.is_empty());
    }
    // Expansion must produce distinct fingerprints.
    let ids: std::collections::BTreeSet<&str> =
        artifacts.iter().map(|a| a.artifact_id.as_str()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn single_item_artifacts_pass_through_unchanged() {
    let single = api_artifact(&["GET /orders"]);
    let artifacts = normalize(vec![single]);
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].endpoints, vec!["GET /orders"]);
}

#[test]
fn fingerprints_are_discovery_order_independent() {
    let a = normalize(vec![api_artifact(&["GET /users/{id}"]), db_artifact("Users", "CREATE TABLE Users")]);
    let b = normalize(vec![db_artifact("Users", "CREATE TABLE Users"), api_artifact(&["GET /users/{id}"])]);

    let ids_a: std::collections::BTreeSet<String> =
        a.iter().map(|x| x.artifact_id.clone()).collect();
    let ids_b: std::collections::BTreeSet<String> =
        b.iter().map(|x| x.artifact_id.clone()).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn same_object_same_fingerprint_different_objects_differ() {
    let artifacts = normalize(vec![
        api_artifact(&["GET /users/{userId}"]),
        api_artifact(&["get /Users/{id}/"]),
        api_artifact(&["GET /orders"]),
    ]);

    assert_eq!(artifacts[0].artifact_id, artifacts[1].artifact_id);
    assert_ne!(artifacts[0].artifact_id, artifacts[2].artifact_id);
}

#[test]
fn metadata_is_derived_from_change_text() {
    let artifacts = normalize(vec![db_artifact("users", "ALTER TABLE users ADD COLUMN email")]);
    let m = &artifacts[0].metadata;
    assert!(m.operations.contains("update"));
    assert!(m.entities.contains("users"));
    assert!(m.fields.contains("email"));
}

#[test]
fn provided_metadata_survives_extraction() {
    let mut artifact = db_artifact("users", "CREATE TABLE users");
    artifact.metadata.entities.insert("accounts".to_string());

    let artifacts = normalize(vec![artifact]);
    let m = &artifacts[0].metadata;
    assert!(m.entities.contains("accounts"), "upstream metadata was dropped");
    assert!(m.entities.contains("users"), "derived metadata missing");
}

#[test]
fn missing_optional_fields_are_tolerated() {
    let json = r#"{"layerType": "configuration", "severity": "low"}"#;
    let raw: DriftArtifact = serde_json::from_str(json).unwrap();
    let artifacts = normalize(vec![raw]);

    assert_eq!(artifacts.len(), 1);
    assert!(!artifacts[0].artifact_id.is_empty(), "fileless artifact still gets an id");
}
