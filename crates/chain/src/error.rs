//! Error types for chain queries.

use blockpoll_poller::PollError;
use thiserror::Error;

/// Errors from querying a chain or waiting on it.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The HTTP request could not be sent or its body not read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Unexpected status {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The queried object does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response could not be interpreted.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Reading the height a poll window is anchored on failed.
    #[error("Failed to get height of {chain}: {reason}")]
    Height { chain: String, reason: String },

    /// The poll ended without the condition being met.
    #[error(transparent)]
    Poll(#[from] PollError),
}

impl ChainError {
    /// Whether the poll ended because the caller cancelled or timed out.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChainError::Poll(e) if e.is_cancelled())
    }
}
