//! Artifact normalization.
//!
//! Expands artifacts that bundle several logical items into one artifact
//! per item, derives metadata from change text, and freezes the canonical
//! fingerprint. Downstream strategies only ever reason about one logical
//! object per artifact.

pub mod fingerprint;
pub mod metadata;

use strata_core::types::DriftArtifact;

pub use fingerprint::fingerprint;

/// Normalize raw analyzer output into atomic, fingerprinted artifacts.
///
/// Fingerprints are order-independent: two artifacts describing the same
/// real-world object hash to the same id regardless of discovery order.
pub fn normalize(raw: Vec<DriftArtifact>) -> Vec<DriftArtifact> {
    let mut artifacts = Vec::with_capacity(raw.len());
    for artifact in raw {
        expand_into(artifact, &mut artifacts);
    }

    for artifact in &mut artifacts {
        let derived = metadata::extract(artifact);
        artifact.metadata.merge(derived);
        if artifact.artifact_id.is_empty() {
            artifact.artifact_id = fingerprint::fingerprint(artifact);
        }
    }

    tracing::debug!(count = artifacts.len(), "normalized artifacts");
    artifacts
}

/// Emit one shallow clone per bundled item. Single-item artifacts pass
/// through unchanged; clones get a single-element array and an unset
/// fingerprint.
fn expand_into(artifact: DriftArtifact, out: &mut Vec<DriftArtifact>) {
    if artifact.endpoints.len() > 1 {
        for endpoint in &artifact.endpoints {
            let mut clone = artifact.clone();
            clone.endpoints = vec![endpoint.clone()];
            clone.artifact_id = String::new();
            out.push(clone);
        }
    } else if artifact.entities.len() > 1 {
        for entity in &artifact.entities {
            let mut clone = artifact.clone();
            clone.entities = vec![entity.clone()];
            clone.artifact_id = String::new();
            out.push(clone);
        }
    } else if artifact.resources.len() > 1 {
        for resource in &artifact.resources {
            let mut clone = artifact.clone();
            clone.resources = vec![resource.clone()];
            clone.artifact_id = String::new();
            out.push(clone);
        }
    } else {
        out.push(artifact);
    }
}
