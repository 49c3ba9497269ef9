//! Metadata extraction — keyword scans over change text.
//!
//! Purely derived, never authoritative: the scan only feeds heuristic
//! strategies, and upstream-provided metadata is merged, not replaced.

use std::sync::OnceLock;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use strata_core::types::{ArtifactMetadata, DriftArtifact, LayerType};

/// What to do with the token following a matched keyword.
#[derive(Debug, Clone, Copy)]
enum Capture {
    None,
    Entity,
    Field,
    Dependency,
}

struct KeywordScanner {
    ac: AhoCorasick,
    /// Parallel to the pattern list: (CRUD operation, capture kind).
    actions: Vec<(Option<&'static str>, Capture)>,
}

impl KeywordScanner {
    fn new(rules: &[(&str, Option<&'static str>, Capture)]) -> Self {
        let patterns: Vec<&str> = rules.iter().map(|(p, _, _)| *p).collect();
        let ac = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .expect("keyword patterns are valid");
        let actions = rules.iter().map(|(_, op, cap)| (*op, *cap)).collect();
        Self { ac, actions }
    }

    fn scan(&self, text: &str, metadata: &mut ArtifactMetadata) {
        for m in self.ac.find_iter(text) {
            let (operation, capture) = self.actions[m.pattern().as_usize()];
            if let Some(op) = operation {
                metadata.operations.insert(op.to_string());
            }
            match capture {
                Capture::None => {}
                Capture::Entity => {
                    if let Some(token) = identifier_after(text, m.end()) {
                        metadata.entities.insert(token);
                    }
                }
                Capture::Field => {
                    if let Some(token) = identifier_after(text, m.end()) {
                        metadata.fields.insert(token);
                    }
                }
                Capture::Dependency => {
                    if let Some(token) = dependency_after(text, m.end()) {
                        metadata.dependencies.insert(token);
                    }
                }
            }
        }
    }
}

fn sql_scanner() -> &'static KeywordScanner {
    static SCANNER: OnceLock<KeywordScanner> = OnceLock::new();
    SCANNER.get_or_init(|| {
        KeywordScanner::new(&[
            ("CREATE TABLE", Some("create"), Capture::Entity),
            ("DROP TABLE", Some("delete"), Capture::Entity),
            ("ALTER TABLE", Some("update"), Capture::Entity),
            ("TRUNCATE", Some("delete"), Capture::Entity),
            ("INSERT INTO", Some("create"), Capture::Entity),
            ("DELETE FROM", Some("delete"), Capture::Entity),
            ("ADD COLUMN", Some("update"), Capture::Field),
            ("DROP COLUMN", Some("update"), Capture::Field),
            ("RENAME COLUMN", Some("update"), Capture::Field),
            ("SELECT", Some("read"), Capture::None),
        ])
    })
}

fn http_scanner() -> &'static KeywordScanner {
    static SCANNER: OnceLock<KeywordScanner> = OnceLock::new();
    SCANNER.get_or_init(|| {
        KeywordScanner::new(&[
            ("GET ", Some("read"), Capture::None),
            ("HEAD ", Some("read"), Capture::None),
            ("POST ", Some("create"), Capture::None),
            ("PUT ", Some("update"), Capture::None),
            ("PATCH ", Some("update"), Capture::None),
            ("DELETE ", Some("delete"), Capture::None),
        ])
    })
}

fn config_scanner() -> &'static KeywordScanner {
    static SCANNER: OnceLock<KeywordScanner> = OnceLock::new();
    SCANNER.get_or_init(|| {
        KeywordScanner::new(&[
            ("ADDED DEPENDENCY", Some("create"), Capture::Dependency),
            ("REMOVED DEPENDENCY", Some("delete"), Capture::Dependency),
            ("UPDATED DEPENDENCY", Some("update"), Capture::Dependency),
            ("ADDED KEY", Some("create"), Capture::Field),
            ("REMOVED KEY", Some("delete"), Capture::Field),
            ("MODIFIED KEY", Some("update"), Capture::Field),
            ("ADDED", Some("create"), Capture::None),
            ("REMOVED", Some("delete"), Capture::None),
            ("MODIFIED", Some("update"), Capture::None),
        ])
    })
}

fn infra_scanner() -> &'static KeywordScanner {
    static SCANNER: OnceLock<KeywordScanner> = OnceLock::new();
    SCANNER.get_or_init(|| {
        KeywordScanner::new(&[
            ("CREATED", Some("create"), Capture::None),
            ("ADDED", Some("create"), Capture::None),
            ("DELETED", Some("delete"), Capture::None),
            ("REMOVED", Some("delete"), Capture::None),
            ("DESTROYED", Some("delete"), Capture::None),
            ("REPLACED", Some("update"), Capture::None),
            ("MODIFIED", Some("update"), Capture::None),
            ("UPDATED", Some("update"), Capture::None),
        ])
    })
}

/// Derive metadata for one artifact from its change text and item arrays.
pub fn extract(artifact: &DriftArtifact) -> ArtifactMetadata {
    let mut metadata = ArtifactMetadata::default();
    let text = artifact.combined_text();

    match artifact.layer_type {
        LayerType::Api => {
            http_scanner().scan(&text, &mut metadata);
            for endpoint in &artifact.endpoints {
                for entity in path_entities(endpoint) {
                    metadata.entities.insert(entity);
                }
            }
            // Paths mentioned inline in change text count too.
            for token in text.split_whitespace().filter(|t| t.starts_with('/')) {
                for entity in path_entities(token) {
                    metadata.entities.insert(entity);
                }
            }
        }
        LayerType::Database => {
            sql_scanner().scan(&text, &mut metadata);
            for table in &artifact.entities {
                metadata.entities.insert(table.trim().to_lowercase());
            }
        }
        LayerType::Infrastructure => {
            infra_scanner().scan(&text, &mut metadata);
            for resource in &artifact.resources {
                let lower = resource.trim().to_lowercase();
                if let Some((_, name)) = lower.rsplit_once('.') {
                    if !name.is_empty() {
                        metadata.entities.insert(name.to_string());
                    }
                }
                metadata.entities.insert(lower);
            }
        }
        LayerType::Configuration => {
            config_scanner().scan(&text, &mut metadata);
        }
    }

    metadata
}

/// Entity candidates from a path: non-parameter, non-numeric segments,
/// skipping routing boilerplate.
pub fn path_entities(endpoint: &str) -> Vec<String> {
    const BOILERPLATE: &[&str] = &["api", "rest", "v1", "v2", "v3", "v4"];

    let path = endpoint
        .trim()
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or(endpoint);
    path.split('/')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| {
            !s.is_empty()
                && !s.starts_with('{')
                && !s.starts_with(':')
                && !s.starts_with('<')
                && !s.chars().all(|c| c.is_ascii_digit())
                && !BOILERPLATE.contains(&s.as_str())
        })
        .collect()
}

/// Next identifier-like token after a keyword match, lower-cased.
fn identifier_after(text: &str, from: usize) -> Option<String> {
    let rest = text[from..].trim_start_matches(|c: char| c.is_whitespace() || c == ':' || c == '=');
    let rest = rest
        .strip_prefix("IF NOT EXISTS ")
        .or_else(|| rest.strip_prefix("IF EXISTS "))
        .unwrap_or(rest);
    let token: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let token = token.trim_matches(|c| c == '.' || c == '-').to_lowercase();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Dependency name after a keyword match. Handles scoped npm names and
/// strips trailing version specifiers.
fn dependency_after(text: &str, from: usize) -> Option<String> {
    let rest = text[from..].trim_start_matches(|c: char| c.is_whitespace() || c == ':' || c == '=');
    let token: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/' | '@'))
        .collect();
    if token.is_empty() {
        return None;
    }
    // `express@4.18` → `express`; `@types/node@20` keeps its scope.
    let cut = match token[1..].find('@') {
        Some(pos) => &token[..pos + 1],
        None => token.as_str(),
    };
    let name = cut.trim_matches(|c| c == '.' || c == '-').to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
