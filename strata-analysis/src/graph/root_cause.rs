//! Root-cause detection from edge direction.

use strata_core::types::collections::FxHashMap;
use strata_core::types::{CorrelationEdge, DriftArtifact, RootCauseKind, RootCauseRecord};

/// Find root-cause artifacts.
///
/// An artifact with zero in-degree and positive out-degree (as stored) is
/// a root cause. When none qualifies but edges exist, the artifact
/// maximizing `out − 0.5·in` is recorded as a likely root cause — at most
/// one fallback record per run.
pub fn find_root_causes(
    edges: &[CorrelationEdge],
    artifacts: &[DriftArtifact],
) -> Vec<RootCauseRecord> {
    let mut in_degree: FxHashMap<&str, u32> = FxHashMap::default();
    let mut out_degree: FxHashMap<&str, u32> = FxHashMap::default();
    for edge in edges {
        *out_degree.entry(edge.source.as_str()).or_default() += 1;
        *in_degree.entry(edge.target.as_str()).or_default() += 1;
    }

    let mut records = Vec::new();
    for artifact in artifacts {
        let id = artifact.artifact_id.as_str();
        let out = out_degree.get(id).copied().unwrap_or(0);
        let inn = in_degree.get(id).copied().unwrap_or(0);
        if inn == 0 && out > 0 {
            records.push(RootCauseRecord {
                artifact: id.to_string(),
                kind: RootCauseKind::RootCause,
                confidence: (0.6 + 0.1 * out as f32).min(0.9),
            });
        }
    }

    if records.is_empty() && !edges.is_empty() {
        let mut best: Option<(&str, f32)> = None;
        for artifact in artifacts {
            let id = artifact.artifact_id.as_str();
            let out = out_degree.get(id).copied().unwrap_or(0) as f32;
            let inn = in_degree.get(id).copied().unwrap_or(0) as f32;
            let score = out - 0.5 * inn;
            match best {
                Some((_, s)) if s >= score => {}
                _ => best = Some((id, score)),
            }
        }
        if let Some((id, score)) = best {
            if score > 0.0 {
                records.push(RootCauseRecord {
                    artifact: id.to_string(),
                    kind: RootCauseKind::LikelyRootCause,
                    confidence: (0.4 + 0.1 * score).min(0.7),
                });
            }
        }
    }

    records
}
