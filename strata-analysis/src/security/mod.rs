//! Critical-change predicate.
//!
//! One pure function shared by the ignore-rule safety rail and the risk
//! escalator, so the two call sites can never drift apart. A user ignore
//! rule must never silence a change matching these patterns, and an
//! artifact matching them is pinned to high severity.

use std::sync::OnceLock;

use regex::RegexSet;
use strata_core::types::DriftArtifact;

static CRITICAL: OnceLock<RegexSet> = OnceLock::new();

fn critical_set() -> &'static RegexSet {
    CRITICAL.get_or_init(|| {
        RegexSet::new([
            // Destructive SQL
            r"(?i)DROP\s+(TABLE|COLUMN)",
            r"(?i)\bTRUNCATE\b",
            r"(?i)ALTER\s+\S.*\bSET\s+(NOT\s+NULL|TYPE)\b",
            // Known-vulnerability markers
            r"CVE-\d",
            r"GHSA-",
            r"SECURITY_VULNERABILITY",
            r"MALICIOUS_PACKAGE",
            // Wide-open network exposure
            r"0\.0\.0\.0/0",
            r"::/0",
            r"SECURITY_GROUP_DELETION",
            // Secret material added or removed. `\b` alone would miss
            // snake_case names like AWS_SECRET_ACCESS_KEY, since `_` is a
            // word character.
            r"(?i)\b(ADD(ED)?|REMOVE[D]?)\b[^\n]*(\b|_)(SECRET|API[_-]?KEY|PRIVATE[_-]?KEY|CREDENTIAL|PASSWORD)",
        ])
        .expect("critical pattern set is valid")
    })
}

/// Whether change text matches any critical security pattern.
pub fn is_critical_change(text: &str) -> bool {
    critical_set().is_match(text)
}

/// Whether the combined text of two artifacts matches a critical pattern.
/// Used by the ignore safety rail before a pair is removed from
/// consideration.
pub fn is_critical_pair(a: &DriftArtifact, b: &DriftArtifact) -> bool {
    let combined = format!("{}\n{}", a.combined_text(), b.combined_text());
    is_critical_change(&combined)
}
