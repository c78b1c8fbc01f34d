//! Error types

use thiserror::Error;

/// Feed errors
///
/// Every failure mode collapses to a single human-readable message per feed;
/// the next scheduled poll is the only retry mechanism.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("unexpected status: {status}")]
    Http { status: u16 },

    #[error("could not extract a numeric value: {0}")]
    Parse(String),
}

impl FeedError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        FeedError::Network(err.to_string())
    }

    pub fn parse(err: impl std::fmt::Display) -> Self {
        FeedError::Parse(err.to_string())
    }
}

/// Result type alias
pub type FeedResult<T> = Result<T, FeedError>;
