//! Correlation configuration.
//! Parsed from YAML by an external loader; invalid values are clamped to
//! safe defaults with a warning, never fatal.

pub mod correlation_config;

pub use correlation_config::{
    CorrelationConfig, Limits, StrategySetting, Thresholds, DEFAULT_BLOCK_MIN,
    DEFAULT_CORRELATE_MIN, DEFAULT_MAX_PAIRS_HIGH_COST, DEFAULT_TOP_K_PER_SOURCE,
};
