//! Error handling for Strata.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! The engine itself degrades instead of failing: malformed configuration
//! values are clamped, strategies that cannot score a pair omit it. The
//! only fallible surface is parsing configuration text.

pub mod config_error;

pub use config_error::ConfigError;
