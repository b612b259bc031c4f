//! Poll window: the inclusive height range a poll may retry within.

use crate::BlockHeight;
use std::fmt;
use thiserror::Error;

/// A malformed poll window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("max height {max} is below start height {start}")]
pub struct WindowError {
    pub start: BlockHeight,
    pub max: BlockHeight,
}

/// Inclusive range of heights during which a poll may retry.
///
/// Construction is the only validation point: a `PollWindow` in hand always
/// satisfies `start <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollWindow {
    start: BlockHeight,
    max: BlockHeight,
}

impl PollWindow {
    /// Create a window, rejecting `max < start`.
    pub fn new(start: BlockHeight, max: BlockHeight) -> Result<Self, WindowError> {
        if max < start {
            return Err(WindowError { start, max });
        }
        Ok(Self { start, max })
    }

    /// Window covering `start` and the next `delta` blocks.
    pub fn from_delta(start: BlockHeight, delta: u64) -> Self {
        Self {
            start,
            max: start.saturating_add(delta),
        }
    }

    /// First height the predicate may be evaluated at.
    pub fn start(&self) -> BlockHeight {
        self.start
    }

    /// Last height retries are permitted at.
    pub fn max(&self) -> BlockHeight {
        self.max
    }

    /// Whether a failed attempt at `height` ends the poll.
    pub fn is_exhausted_at(&self, height: BlockHeight) -> bool {
        height >= self.max
    }
}

impl fmt::Display for PollWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start.0, self.max.0)
    }
}
