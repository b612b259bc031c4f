//! Error types for polling.

use crate::HeightError;
use blockpoll_types::{BlockHeight, WindowError};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a poll check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollFailure {
    /// The observed state does not satisfy the condition yet. Retried until
    /// the window is exhausted.
    #[error("{0}")]
    Mismatch(String),

    /// The check can never succeed (e.g. a malformed query). Ends the poll.
    #[error("{0}")]
    Permanent(String),
}

impl PollFailure {
    /// Retryable failure from any displayable reason.
    pub fn mismatch(reason: impl fmt::Display) -> Self {
        PollFailure::Mismatch(reason.to_string())
    }

    /// Non-retryable failure from any displayable reason.
    pub fn permanent(reason: impl fmt::Display) -> Self {
        PollFailure::Permanent(reason.to_string())
    }
}

/// Terminal outcome of a poll that did not succeed.
#[derive(Debug, Error)]
pub enum PollError {
    /// The window was malformed; the check was never run.
    #[error("Invalid poll window: {0}")]
    InvalidWindow(#[from] WindowError),

    /// The cancel token fired.
    #[error("Poll cancelled")]
    Cancelled,

    /// The configured deadline elapsed.
    #[error("Poll deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// The window was used up; carries the most recent mismatch.
    #[error("Condition not met by {last_height}: {reason}")]
    Exhausted {
        last_height: BlockHeight,
        reason: String,
    },

    /// The check reported a permanent failure.
    #[error("Condition rejected at {height}: {reason}")]
    Rejected { height: BlockHeight, reason: String },

    /// The height source failed more times in a row than allowed.
    #[error("Height source failed {attempts} consecutive times: {source}")]
    HeightUnavailable {
        attempts: u32,
        #[source]
        source: HeightError,
    },
}

impl PollError {
    /// Whether the poll ended because the caller cancelled or timed out.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PollError::Cancelled | PollError::DeadlineExceeded(_))
    }

    /// Whether the poll ran out of heights.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PollError::Exhausted { .. })
    }
}
