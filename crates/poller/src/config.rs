//! Poll configuration.

use std::time::Duration;

/// Configuration for the poll engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// How long to sleep before re-reading the height when no new block has
    /// been produced (or the height read failed).
    pub poll_interval: Duration,

    /// Upper bound on the wall-clock duration of one poll.
    /// `None` leaves termination to the height window and the cancel token.
    pub deadline: Option<Duration>,

    /// Give up after this many consecutive failed height reads.
    /// `None` treats every failed read as transient.
    pub max_height_errors: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            deadline: None,
            max_height_errors: None,
        }
    }
}

impl PollConfig {
    /// Set the interval between height reads.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Bound the whole poll by a deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Fail once the height source errors this many times in a row.
    pub fn with_max_height_errors(mut self, limit: u32) -> Self {
        self.max_height_errors = Some(limit.max(1));
        self
    }
}
