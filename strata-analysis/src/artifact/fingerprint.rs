//! Canonical artifact fingerprints.
//!
//! The fingerprint is the identity used for deduplication and pair-key
//! construction. Type-specific keys keep it injective across unrelated
//! artifacts of the same layer.

use strata_core::types::{DriftArtifact, LayerType};
use xxhash_rust::xxh3::xxh3_64;

/// Compute the canonical fingerprint for a normalized (single-item)
/// artifact.
pub fn fingerprint(artifact: &DriftArtifact) -> String {
    match artifact.layer_type {
        LayerType::Api => api_fingerprint(artifact),
        LayerType::Database => database_fingerprint(artifact),
        LayerType::Infrastructure => infrastructure_fingerprint(artifact),
        LayerType::Configuration => configuration_fingerprint(artifact),
    }
}

fn api_fingerprint(artifact: &DriftArtifact) -> String {
    if let Some(endpoint) = artifact.endpoints.first() {
        let (method, path) = split_endpoint(endpoint);
        format!("api:{} {}", method, normalize_path(&path))
    } else {
        fallback("api", artifact)
    }
}

fn database_fingerprint(artifact: &DriftArtifact) -> String {
    if let Some(table) = artifact.entities.first() {
        format!("db:{}", table.trim().to_lowercase())
    } else if let Some(table) = artifact.metadata.entities.iter().next() {
        format!("db:{}", table.trim().to_lowercase())
    } else {
        fallback("db", artifact)
    }
}

fn infrastructure_fingerprint(artifact: &DriftArtifact) -> String {
    if let Some(resource) = artifact.resources.first() {
        format!("infra:{}", resource.trim().to_lowercase())
    } else {
        fallback("infra", artifact)
    }
}

fn configuration_fingerprint(artifact: &DriftArtifact) -> String {
    fallback("config", artifact)
}

/// File-path key when present, otherwise a stable content hash so every
/// artifact still gets an id.
fn fallback(prefix: &str, artifact: &DriftArtifact) -> String {
    if let Some(file) = artifact.file.as_deref().filter(|f| !f.trim().is_empty()) {
        format!("{prefix}:{}", normalize_file_path(file))
    } else {
        format!("{prefix}:x{:016x}", xxh3_64(artifact.combined_text().as_bytes()))
    }
}

/// Split `"GET /users/{id}"` into method and path. An endpoint with no
/// method token is treated as matching any method.
fn split_endpoint(endpoint: &str) -> (String, String) {
    let trimmed = endpoint.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((method, path)) if !path.trim().is_empty() => {
            (method.to_uppercase(), path.trim().to_string())
        }
        _ => ("ANY".to_string(), trimmed.to_string()),
    }
}

/// Lower-case the path and canonicalize path parameters: `{userId}`,
/// `:user_id`, and `<id>` all become `{}`, so differently named parameters
/// fingerprint identically.
fn normalize_path(path: &str) -> String {
    let lower = path.trim().trim_end_matches('/').to_lowercase();
    let segments: Vec<String> = lower
        .split('/')
        .map(|segment| {
            let is_param = (segment.starts_with('{') && segment.ends_with('}'))
                || (segment.starts_with('<') && segment.ends_with('>'))
                || segment.starts_with(':');
            if is_param {
                "{}".to_string()
            } else {
                segment.to_string()
            }
        })
        .collect();
    let joined = segments.join("/");
    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Slash-normalize a file path: backslashes to slashes, `./` prefix and
/// trailing slashes stripped.
pub fn normalize_file_path(path: &str) -> String {
    let mut normalized = path.trim().replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized.trim_end_matches('/').to_string()
}
