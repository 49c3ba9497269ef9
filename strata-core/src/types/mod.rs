//! Data model for artifacts, correlation edges, signals, and rules.

pub mod artifact;
pub mod collections;
pub mod edge;
pub mod impact;
pub mod rule;
pub mod signal;

pub use artifact::{ArtifactMetadata, DriftArtifact, LayerType, Severity};
pub use edge::{pair_key, CorrelationEdge, Evidence, EVIDENCE_CAP};
pub use impact::{CascadeImpact, GraphMetrics, RootCauseKind, RootCauseRecord};
pub use rule::{CorrelationRule, RuleType};
pub use signal::{Budget, Signal};
