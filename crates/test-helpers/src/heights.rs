//! Fake height sources.

use async_trait::async_trait;
use blockpoll_poller::{HeightError, HeightSource};
use blockpoll_types::BlockHeight;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Replays a scripted sequence of height reads.
///
/// Once the script runs out, the last successful height is repeated forever,
/// which models a chain that stopped producing blocks.
#[derive(Debug)]
pub struct ScriptedHeights {
    script: Mutex<VecDeque<Result<BlockHeight, HeightError>>>,
    last: Mutex<BlockHeight>,
    reads: AtomicUsize,
}

impl ScriptedHeights {
    /// Script of successful reads.
    pub fn new(heights: impl IntoIterator<Item = u64>) -> Self {
        Self::from_reads(heights.into_iter().map(|h| Ok(BlockHeight(h))))
    }

    /// Script mixing successful and failed reads.
    pub fn from_reads(reads: impl IntoIterator<Item = Result<BlockHeight, HeightError>>) -> Self {
        Self {
            script: Mutex::new(reads.into_iter().collect()),
            last: Mutex::new(BlockHeight::GENESIS),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of reads served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Whether every scripted read was consumed.
    pub fn is_drained(&self) -> bool {
        self.script.lock().is_empty()
    }
}

#[async_trait]
impl HeightSource for ScriptedHeights {
    async fn current_height(&self) -> Result<BlockHeight, HeightError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        match next {
            Some(Ok(height)) => {
                *self.last.lock() = height;
                Ok(height)
            }
            Some(Err(e)) => Err(e),
            None => Ok(*self.last.lock()),
        }
    }
}

/// Produces one block every `block_time` of tokio time.
///
/// Uses [`tokio::time::Instant`], so with a paused clock heights advance only
/// as the runtime auto-advances time.
#[derive(Debug, Clone)]
pub struct TickingHeights {
    start_height: BlockHeight,
    started: Instant,
    block_time: Duration,
}

impl TickingHeights {
    pub fn new(start_height: u64, block_time: Duration) -> Self {
        Self {
            start_height: BlockHeight(start_height),
            started: Instant::now(),
            block_time,
        }
    }

    /// Height at the current tokio instant.
    pub fn height_now(&self) -> BlockHeight {
        let elapsed = self.started.elapsed().as_nanos();
        let blocks = elapsed / self.block_time.as_nanos().max(1);
        self.start_height
            .saturating_add(u64::try_from(blocks).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl HeightSource for TickingHeights {
    async fn current_height(&self) -> Result<BlockHeight, HeightError> {
        Ok(self.height_now())
    }
}
