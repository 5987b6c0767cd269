//! Error types for the review list core.
//!
//! Page loads fail in exactly two ways and both share one recovery path: state is
//! left untouched, the gate reopens, and the next scroll or refresh retries.
//! Nothing here is fatal.

use std::sync::Arc;

use thiserror::Error;

/// Cause carried by a malformed-payload failure.
///
/// Held behind `Arc` so `LoadError` stays `Clone` and can sit in state snapshots
/// and notifications.
pub type ErrorCause = Arc<dyn std::error::Error + Send + Sync>;

/// Why a page could not be applied.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The provider could not be reached or located.
    #[error("review source unavailable")]
    SourceUnavailable,
    /// The bytes could not be read or decoded against the page schema.
    #[error("malformed review payload: {0}")]
    MalformedPayload(ErrorCause),
}

impl LoadError {
    /// Wraps any error as a `MalformedPayload` cause.
    pub fn malformed<E>(cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LoadError::MalformedPayload(Arc::new(cause))
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::malformed(err)
    }
}

/// Failures while reading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
