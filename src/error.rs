//! Error types for the market data SDK

use thiserror::Error;

/// Errors produced while resolving a historical time range
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// A supplied date string could not be parsed
    #[error("Unparsable date: {0:?}")]
    InvalidDate(String),

    /// The resolved window is inverted or zero-length
    #[error("Empty time window: start {start} is not before end {end}")]
    EmptyWindow { start: i64, end: i64 },
}

/// Errors that can occur when talking to the market data API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// API returned a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Response body did not match the documented schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Caller-supplied time range was malformed
    #[error(transparent)]
    TimeRange(#[from] TimeRangeError),
}

impl ClientError {
    /// True for failures the client absorbs into an empty or absent result:
    /// transport problems and non-success statuses. Schema and input errors
    /// surface to the caller instead.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::RateLimitExceeded | ClientError::Api(_)
        )
    }
}
