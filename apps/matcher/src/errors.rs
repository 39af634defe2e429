use thiserror::Error;

/// Engine-level error type.
///
/// Failures are scoped to the single request being processed: a
/// malformed stored field never surfaces here (the normalizer degrades
/// it to an empty value), and empty job-posting text is a valid
/// zero-signal outcome, not an error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown grouping strategy: {0}")]
    UnknownStrategy(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
