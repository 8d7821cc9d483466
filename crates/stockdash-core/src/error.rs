//! Error types for dashboard operations

use thiserror::Error;

/// Dashboard specific errors
#[derive(Debug, Error)]
pub enum DashError {
    /// Query failed constructor-time validation
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Upstream provider failure (unknown symbol, throttling, bad payload)
    #[error("provider error: {0}")]
    Provider(String),

    /// Data not available for the requested symbol. This is the only
    /// error kind the loader exposes; every upstream failure collapses
    /// into it with the cause preserved in `reason`.
    #[error("data unavailable for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Network or HTTP error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashError {
    /// Wrap an upstream failure as `DataUnavailable` for the given symbol.
    pub fn data_unavailable(symbol: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
            reason: cause.to_string(),
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashError>;
