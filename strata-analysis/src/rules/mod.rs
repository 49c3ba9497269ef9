//! User-authored correlation rules.

pub mod resolver;

pub use resolver::{resolve, RuleResolution, RULE_STRATEGY};
