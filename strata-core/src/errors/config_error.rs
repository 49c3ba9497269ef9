//! Configuration errors.

/// Errors that can occur while loading correlation configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid correlation config: {message}")]
    ParseError { message: String },
}
