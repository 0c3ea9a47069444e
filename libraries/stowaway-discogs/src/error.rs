//! Error types for the Discogs client.

use thiserror::Error;

/// Errors that can occur when talking to Discogs.
#[derive(Error, Debug)]
pub enum DiscogsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Discogs returned a non-success status
    #[error("Discogs returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Invalid base URL
    #[error("Invalid Discogs URL: {0}")]
    InvalidUrl(String),

    /// Response body was not JSON
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Discogs is offline or unreachable
    #[error("Discogs unreachable: {0}")]
    Unreachable(String),

    /// Rate limited by Discogs
    #[error("Rate limited by Discogs")]
    RateLimited,
}

impl From<DiscogsError> for stowaway_core::StowawayError {
    fn from(err: DiscogsError) -> Self {
        stowaway_core::StowawayError::upstream(err.to_string())
    }
}

/// Result type for Discogs client operations.
pub type Result<T> = std::result::Result<T, DiscogsError>;
