//! Graph analysis over the aggregated edge set.

pub mod metrics;
pub mod root_cause;

pub use metrics::compute_graph_metrics;
pub use root_cause::find_root_causes;
