//! Entity variation matcher threshold tests.
//!
//! The matcher deliberately favors precision over recall: composite names
//! must not correlate strongly with their components, while spelling
//! variants of the same entity must.

use strata_analysis::entity::{best_match, variations};

#[test]
fn singular_plural_variants_match_strongly() {
    let m = best_match(&variations("user"), &variations("users"));
    assert!(m.confidence > 0.8, "user/users scored {}", m.confidence);
}

#[test]
fn camel_and_snake_case_variants_match_strongly() {
    let m = best_match(&variations("userProfile"), &variations("user_profile"));
    assert!(m.confidence > 0.8, "userProfile/user_profile scored {}", m.confidence);
}

#[test]
fn composite_names_do_not_match_their_components_strongly() {
    let m = best_match(&variations("user_products"), &variations("users"));
    assert!(m.confidence < 0.9, "user_products/users scored {}", m.confidence);

    let m = best_match(&variations("user_products"), &variations("products"));
    assert!(m.confidence < 0.9, "user_products/products scored {}", m.confidence);
}

#[test]
fn identical_composite_names_match_exactly() {
    let m = best_match(&variations("user_products"), &variations("user_products"));
    assert!(m.confidence > 0.9, "identical names scored {}", m.confidence);
}

#[test]
fn table_prefix_does_not_block_a_match() {
    let m = best_match(&variations("tbl_users"), &variations("users"));
    assert!(m.confidence > 0.9, "tbl_users/users scored {}", m.confidence);
}

#[test]
fn unrelated_names_score_zero_or_low() {
    let m = best_match(&variations("orders"), &variations("permissions"));
    assert!(m.confidence < 0.7, "orders/permissions scored {}", m.confidence);
}

#[test]
fn exact_match_reports_the_winning_pair() {
    let m = best_match(&variations("users"), &variations("user"));
    assert!((m.confidence - 1.0).abs() < 1e-6);
    assert_eq!(m.pair.0, m.pair.1);
}

#[test]
fn empty_name_yields_no_match() {
    let m = best_match(&variations(""), &variations("users"));
    assert_eq!(m.confidence, 0.0);
}
