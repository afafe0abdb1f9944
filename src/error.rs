use std::time::Duration;

/// Failure of a pronunciation/spelling-equivalence oracle call.
///
/// Callers inside this crate never surface these to the host: evaluation
/// falls back to strict matching instead.
#[derive(thiserror::Error, Debug)]
pub enum OracleError {
    #[error("Oracle did not answer within {0:?}")]
    Timeout(Duration),
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),
    #[error("Oracle returned an unusable response: {0}")]
    InvalidResponse(String),
    #[cfg(feature = "http-oracle")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
