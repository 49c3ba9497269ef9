//! Correlation edges — the fused, per-pair result of all signals.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum evidence entries retained per edge, for downstream readability.
pub const EVIDENCE_CAP: usize = 5;

/// One piece of supporting evidence for a correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Evidence {
    pub reason: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
}

impl Evidence {
    pub fn reason(reason: impl Into<String>) -> Self {
        Self { reason: reason.into(), file: None, line: None }
    }

    pub fn in_file(reason: impl Into<String>, file: impl Into<String>) -> Self {
        Self { reason: reason.into(), file: Some(file.into()), line: None }
    }
}

/// Canonical key for an unordered artifact pair.
///
/// Lexicographic ordering of the two fingerprints, so
/// `pair_key(a, b) == pair_key(b, a)` always holds. Every edge lookup and
/// insert goes through this key; it is what enforces the one-edge-per-pair
/// invariant.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}|{b}")
    } else {
        format!("{b}|{a}")
    }
}

/// The fused correlation between exactly two artifacts.
///
/// Stored undirected (one edge per unordered pair), with `source`/`target`
/// keeping the first-seen direction for display. `scores` and `weights`
/// hold the per-strategy contribution that survived per-pair maxima.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationEdge {
    pub source: String,
    pub target: String,
    pub relationships: BTreeSet<String>,
    pub scores: BTreeMap<String, f32>,
    pub weights: BTreeMap<String, f32>,
    pub final_score: f32,
    pub evidence: SmallVec<[Evidence; EVIDENCE_CAP]>,
    pub user_defined: bool,
}

impl CorrelationEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationships: BTreeSet::new(),
            scores: BTreeMap::new(),
            weights: BTreeMap::new(),
            final_score: 0.0,
            evidence: SmallVec::new(),
            user_defined: false,
        }
    }

    pub fn key(&self) -> String {
        pair_key(&self.source, &self.target)
    }

    pub fn touches(&self, fingerprint: &str) -> bool {
        self.source == fingerprint || self.target == fingerprint
    }

    /// The fingerprint on the far side of the edge, if `fingerprint` is on it.
    pub fn other(&self, fingerprint: &str) -> Option<&str> {
        if self.source == fingerprint {
            Some(self.target.as_str())
        } else if self.target == fingerprint {
            Some(self.source.as_str())
        } else {
            None
        }
    }

    /// Append evidence, de-duplicating by `(reason, file, line)` and
    /// respecting the cap.
    pub fn push_evidence(&mut self, item: Evidence) {
        if self.evidence.len() < EVIDENCE_CAP && !self.evidence.contains(&item) {
            self.evidence.push(item);
        }
    }
}
