//! Block height.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Block height.
///
/// Heights only ever move forward on a healthy chain, but values read from a
/// remote node may still appear to regress (load-balanced endpoints, restarts).
/// Consumers decide how to treat that; this type only orders them.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// Genesis block height.
    pub const GENESIS: Self = BlockHeight(0);

    /// Get the next block height.
    pub fn next(self) -> Self {
        BlockHeight(self.0.saturating_add(1))
    }

    /// Height `delta` blocks after this one, saturating at `u64::MAX`.
    pub fn saturating_add(self, delta: u64) -> Self {
        BlockHeight(self.0.saturating_add(delta))
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        BlockHeight(height)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.0)
    }
}
