//! Core types, errors, and configuration for the Strata correlation engine.
//!
//! Everything here is per-analysis-run state: no persistence, no I/O.

pub mod config;
pub mod errors;
pub mod types;

pub use config::CorrelationConfig;
pub use errors::ConfigError;
