//! Drift artifacts — one detected change, scoped to one layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::impact::CascadeImpact;

/// The layer an artifact belongs to. Closed set: analyzers upstream only
/// produce these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Api,
    Database,
    Infrastructure,
    Configuration,
}

impl LayerType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Database => "database",
            Self::Infrastructure => "infrastructure",
            Self::Configuration => "configuration",
        }
    }
}

/// Artifact severity. `Ord` follows escalation order, so a monotone
/// upgrade is `severity.max(new)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Metadata derived from change text by the normalizer. Purely derived,
/// never authoritative; de-duplicated and deterministically ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactMetadata {
    pub entities: BTreeSet<String>,
    pub operations: BTreeSet<String>,
    pub fields: BTreeSet<String>,
    pub dependencies: BTreeSet<String>,
}

impl ArtifactMetadata {
    /// Union `other` into this metadata. Sets de-duplicate naturally.
    pub fn merge(&mut self, other: ArtifactMetadata) {
        self.entities.extend(other.entities);
        self.operations.extend(other.operations);
        self.fields.extend(other.fields);
        self.dependencies.extend(other.dependencies);
    }
}

/// One detected change produced by an external analyzer.
///
/// Analyzer JSON is tolerant: every optional field defaults to empty.
/// Lifecycle: created upstream, expanded and fingerprinted once by the
/// normalizer, then mutated only by the risk escalator (`severity`,
/// `reasoning`, `cascade_impact`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftArtifact {
    pub layer_type: LayerType,
    #[serde(default)]
    pub file: Option<String>,
    pub severity: Severity,
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default)]
    pub reasoning: Vec<String>,
    /// Pre-expansion union arrays: an analyzer may report several logical
    /// items in one artifact. The normalizer splits them.
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub metadata: ArtifactMetadata,
    /// Canonical fingerprint. Empty until the normalizer freezes it.
    #[serde(default)]
    pub artifact_id: String,
    #[serde(default)]
    pub cascade_impact: Option<CascadeImpact>,
}

impl DriftArtifact {
    pub fn new(layer_type: LayerType, severity: Severity) -> Self {
        Self {
            layer_type,
            file: None,
            severity,
            changes: Vec::new(),
            reasoning: Vec::new(),
            endpoints: Vec::new(),
            entities: Vec::new(),
            resources: Vec::new(),
            metadata: ArtifactMetadata::default(),
            artifact_id: String::new(),
            cascade_impact: None,
        }
    }

    /// All change text joined, the input to the critical-change predicate.
    pub fn combined_text(&self) -> String {
        self.changes.join("\n")
    }

    /// Fields a rule token may match against, in a stable order.
    pub fn match_targets(&self) -> Vec<&str> {
        let mut targets = Vec::new();
        if !self.artifact_id.is_empty() {
            targets.push(self.artifact_id.as_str());
        }
        if let Some(file) = &self.file {
            targets.push(file.as_str());
        }
        targets.extend(self.endpoints.iter().map(String::as_str));
        targets.extend(self.entities.iter().map(String::as_str));
        targets.extend(self.resources.iter().map(String::as_str));
        targets
    }
}
