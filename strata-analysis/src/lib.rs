//! Strata analysis engine.
//!
//! Correlates heterogeneous change artifacts (API, database, infrastructure,
//! configuration) produced by external analyzers for one pull request, and
//! escalates artifact severity based on the resulting correlation graph.
//!
//! Processing order is strict and feedback-free:
//! normalize → resolve rules → strategy pipeline → aggregate signals →
//! graph analysis → risk escalation.

pub mod aggregate;
pub mod artifact;
pub mod engine;
pub mod entity;
pub mod escalate;
pub mod graph;
pub mod rules;
pub mod security;
pub mod strategies;

pub use engine::{CorrelationEngine, CorrelationOutcome};
