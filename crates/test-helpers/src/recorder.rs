//! Records check invocations.

use blockpoll_types::BlockHeight;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared log of the heights a check was evaluated at.
#[derive(Debug, Clone, Default)]
pub struct CheckRecorder {
    heights: Arc<Mutex<Vec<BlockHeight>>>,
}

impl CheckRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one evaluation.
    pub fn record(&self, height: BlockHeight) {
        self.heights.lock().push(height);
    }

    /// Heights recorded so far, in call order.
    pub fn heights(&self) -> Vec<u64> {
        self.heights.lock().iter().map(|h| h.0).collect()
    }

    /// Number of evaluations.
    pub fn calls(&self) -> usize {
        self.heights.lock().len()
    }
}
