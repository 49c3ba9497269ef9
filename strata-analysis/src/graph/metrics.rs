//! Graph metrics — blast radius, impact paths, composite risk.
//!
//! Optional enrichment for the risk escalator: when no edges exist the
//! metric map is empty and the escalator falls back to hard-link counting.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use strata_core::types::collections::{FxHashMap, FxHashSet};
use strata_core::types::{CorrelationEdge, DriftArtifact, GraphMetrics, RootCauseRecord, Severity};

/// Compute per-artifact graph metrics, keyed by fingerprint.
pub fn compute_graph_metrics(
    edges: &[CorrelationEdge],
    artifacts: &[DriftArtifact],
    root_causes: &[RootCauseRecord],
) -> FxHashMap<String, GraphMetrics> {
    let mut metrics = FxHashMap::default();
    if edges.is_empty() {
        return metrics;
    }

    let mut graph: DiGraph<&str, f32> = DiGraph::new();
    let mut nodes: FxHashMap<&str, NodeIndex> = FxHashMap::default();
    for artifact in artifacts {
        let id = artifact.artifact_id.as_str();
        let idx = graph.add_node(id);
        nodes.insert(id, idx);
    }
    for edge in edges {
        if let (Some(&s), Some(&t)) = (nodes.get(edge.source.as_str()), nodes.get(edge.target.as_str()))
        {
            graph.add_edge(s, t, edge.final_score);
        }
    }

    let root_ids: FxHashSet<&str> = root_causes.iter().map(|r| r.artifact.as_str()).collect();
    let root_indices: Vec<NodeIndex> =
        root_ids.iter().filter_map(|id| nodes.get(id).copied()).collect();
    let paths = best_paths_from(&graph, &root_indices);

    // Normalize blast radius against the rest of the artifact set.
    let reachable_max = artifacts.len().saturating_sub(1).max(1) as f32;

    for artifact in artifacts {
        let id = artifact.artifact_id.as_str();
        let idx = nodes[id];

        let blast_radius = reachable_count(&graph, idx);

        let mut impact_by_relationship = std::collections::BTreeMap::new();
        let mut strongest_incident = 0.0f32;
        for edge in edges.iter().filter(|e| e.touches(id)) {
            for label in &edge.relationships {
                *impact_by_relationship.entry(label.clone()).or_insert(0u32) += 1;
            }
            if edge.final_score > strongest_incident {
                strongest_incident = edge.final_score;
            }
        }

        let is_root_cause = root_ids.contains(id);
        let (path_confidence, path_depth) = if is_root_cause {
            (1.0, 0)
        } else {
            paths.get(&idx).copied().unwrap_or((0.0, 0))
        };

        let severity_factor = match artifact.severity {
            Severity::Low => 0.2,
            Severity::Medium => 0.5,
            Severity::High => 0.9,
        };
        let risk_score = (0.4 * (blast_radius as f32 / reachable_max)
            + 0.3 * strongest_incident
            + 0.2 * path_confidence
            + 0.1 * severity_factor)
            .clamp(0.0, 1.0);

        metrics.insert(
            id.to_string(),
            GraphMetrics {
                blast_radius,
                risk_score,
                path_confidence,
                path_depth,
                is_root_cause,
                impact_by_relationship,
            },
        );
    }

    metrics
}

/// Artifacts reachable from `start` following stored edge direction.
fn reachable_count(graph: &DiGraph<&str, f32>, start: NodeIndex) -> u32 {
    let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    let mut count = 0u32;
    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if visited.insert(next) {
                count += 1;
                queue.push_back(next);
            }
        }
    }
    count
}

#[derive(Debug, Clone, Copy)]
struct PathState {
    confidence: f32,
    depth: u32,
    node: NodeIndex,
}

impl PartialEq for PathState {
    fn eq(&self, other: &Self) -> bool {
        self.confidence == other.confidence && self.node == other.node
    }
}

impl Eq for PathState {}

impl Ord for PathState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.confidence
            .partial_cmp(&other.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.depth.cmp(&self.depth))
    }
}

impl PartialOrd for PathState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-product path confidence from any root cause, Dijkstra-style on a
/// max-heap: path confidence is the product of edge scores along the path,
/// so extending a path can only lower it and the greedy extraction order
/// stays correct.
fn best_paths_from(
    graph: &DiGraph<&str, f32>,
    roots: &[NodeIndex],
) -> FxHashMap<NodeIndex, (f32, u32)> {
    let mut best: FxHashMap<NodeIndex, (f32, u32)> = FxHashMap::default();
    let mut heap: BinaryHeap<PathState> = BinaryHeap::new();

    for &root in roots {
        best.insert(root, (1.0, 0));
        heap.push(PathState { confidence: 1.0, depth: 0, node: root });
    }

    while let Some(PathState { confidence, depth, node }) = heap.pop() {
        if let Some(&(known, _)) = best.get(&node) {
            if confidence < known {
                continue;
            }
        }
        for edge in graph.edges(node) {
            let next = edge.target();
            let next_confidence = confidence * edge.weight();
            let improved = match best.get(&next) {
                Some(&(known, _)) => next_confidence > known,
                None => true,
            };
            if improved {
                best.insert(next, (next_confidence, depth + 1));
                heap.push(PathState { confidence: next_confidence, depth: depth + 1, node: next });
            }
        }
    }

    best
}
