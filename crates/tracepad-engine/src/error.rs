use thiserror::Error;

/// Errors from host-facing parsing. Drawing itself never fails.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("invalid board config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("unknown case mode: {0:?}")]
    UnknownCaseMode(String),

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("unknown practice mode: {0:?}")]
    UnknownMode(String),
}
