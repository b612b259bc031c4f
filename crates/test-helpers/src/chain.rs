//! In-memory chain.

use crate::TickingHeights;
use async_trait::async_trait;
use blockpoll_chain::{ChainError, ChainQuerier};
use blockpoll_types::{BlockHeight, ProposalResponse};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug)]
enum HeightClock {
    Manual(AtomicU64),
    Ticking(TickingHeights),
}

/// Values of one key over time, ordered by the height they take effect at.
type Timeline<T> = Vec<(BlockHeight, T)>;

fn value_at<T: Clone>(timeline: &Timeline<T>, height: BlockHeight) -> Option<T> {
    timeline
        .iter()
        .rev()
        .find(|(at, _)| *at <= height)
        .map(|(_, value)| value.clone())
}

fn insert_at<T>(timeline: &mut Timeline<T>, at: BlockHeight, value: T) {
    let idx = timeline.partition_point(|(h, _)| *h <= at);
    timeline.insert(idx, (at, value));
}

/// In-memory chain whose state changes at scheduled heights.
///
/// Queries answer with the state as of the current height, which makes
/// "transfer lands in block N" scenarios deterministic.
#[derive(Debug)]
pub struct MockChain {
    name: String,
    clock: HeightClock,
    balances: Mutex<HashMap<(String, String), Timeline<u128>>>,
    proposals: Mutex<HashMap<String, Timeline<ProposalResponse>>>,
    /// Balance and proposal queries fail below this height.
    queries_fail_below: Mutex<Option<BlockHeight>>,
    failing_height_reads: AtomicUsize,
    queries: AtomicUsize,
}

impl MockChain {
    /// Chain whose height only moves through [`set_height`](Self::set_height)
    /// and [`advance`](Self::advance).
    pub fn new(name: impl Into<String>, height: u64) -> Self {
        Self::with_clock(name, HeightClock::Manual(AtomicU64::new(height)))
    }

    /// Chain producing one block every `block_time` of tokio time.
    pub fn ticking(name: impl Into<String>, start_height: u64, block_time: Duration) -> Self {
        Self::with_clock(
            name,
            HeightClock::Ticking(TickingHeights::new(start_height, block_time)),
        )
    }

    fn with_clock(name: impl Into<String>, clock: HeightClock) -> Self {
        Self {
            name: name.into(),
            clock,
            balances: Mutex::new(HashMap::new()),
            proposals: Mutex::new(HashMap::new()),
            queries_fail_below: Mutex::new(None),
            failing_height_reads: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
        }
    }

    /// Current height, ignoring injected failures.
    pub fn current(&self) -> BlockHeight {
        match &self.clock {
            HeightClock::Manual(height) => BlockHeight(height.load(Ordering::SeqCst)),
            HeightClock::Ticking(ticking) => ticking.height_now(),
        }
    }

    /// Set the height of a manual chain.
    ///
    /// # Panics
    ///
    /// Panics on a ticking chain.
    pub fn set_height(&self, height: u64) {
        match &self.clock {
            HeightClock::Manual(h) => h.store(height, Ordering::SeqCst),
            HeightClock::Ticking(_) => panic!("set_height on a ticking MockChain"),
        }
    }

    /// Produce `blocks` blocks on a manual chain.
    pub fn advance(&self, blocks: u64) {
        self.set_height(self.current().0 + blocks);
    }

    /// Set a balance effective from genesis.
    pub fn set_balance(&self, address: &str, denom: &str, amount: u128) {
        self.schedule_balance(address, denom, amount, 0);
    }

    /// Change a balance starting at height `at`.
    pub fn schedule_balance(&self, address: &str, denom: &str, amount: u128, at: u64) {
        let mut balances = self.balances.lock();
        let timeline = balances
            .entry((address.to_string(), denom.to_string()))
            .or_default();
        insert_at(timeline, BlockHeight(at), amount);
    }

    /// Store a proposal effective from genesis.
    pub fn set_proposal(&self, proposal: ProposalResponse) {
        self.schedule_proposal(proposal, 0);
    }

    /// Store a proposal version that becomes visible at height `at`.
    pub fn schedule_proposal(&self, proposal: ProposalResponse, at: u64) {
        let mut proposals = self.proposals.lock();
        let timeline = proposals.entry(proposal.proposal_id.clone()).or_default();
        insert_at(timeline, BlockHeight(at), proposal);
    }

    /// Make balance and proposal queries fail while the height is below `height`.
    pub fn fail_queries_below(&self, height: u64) {
        *self.queries_fail_below.lock() = Some(BlockHeight(height));
    }

    /// Make the next `count` height reads fail.
    pub fn fail_next_height_reads(&self, count: usize) {
        self.failing_height_reads.store(count, Ordering::SeqCst);
    }

    /// Number of balance and proposal queries served (including failed ones).
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn begin_query(&self) -> Result<BlockHeight, ChainError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let height = self.current();
        if let Some(threshold) = *self.queries_fail_below.lock() {
            if height < threshold {
                return Err(ChainError::Malformed(format!(
                    "{}: query failed at {}",
                    self.name, height
                )));
            }
        }
        Ok(height)
    }
}

#[async_trait]
impl ChainQuerier for MockChain {
    fn name(&self) -> &str {
        &self.name
    }

    async fn height(&self) -> Result<BlockHeight, ChainError> {
        let failing = self
            .failing_height_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(ChainError::Malformed(format!(
                "{}: height unavailable",
                self.name
            )));
        }
        Ok(self.current())
    }

    async fn balance(&self, address: &str, denom: &str) -> Result<u128, ChainError> {
        let height = self.begin_query()?;
        let balances = self.balances.lock();
        Ok(balances
            .get(&(address.to_string(), denom.to_string()))
            .and_then(|timeline| value_at(timeline, height))
            .unwrap_or(0))
    }

    async fn proposal(&self, proposal_id: &str) -> Result<ProposalResponse, ChainError> {
        let height = self.begin_query()?;
        let proposals = self.proposals.lock();
        proposals
            .get(proposal_id)
            .and_then(|timeline| value_at(timeline, height))
            .ok_or_else(|| ChainError::NotFound(format!("proposal {}", proposal_id)))
    }
}
