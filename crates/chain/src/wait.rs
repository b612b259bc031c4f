//! Waiting for block production.

use crate::{ChainError, ChainHeight, ChainQuerier};
use blockpoll_poller::{BlockPoller, PollConfig, PollFailure};
use blockpoll_types::{BlockHeight, PollWindow};
use futures::future::try_join_all;
use std::future::ready;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Wait until `chain` reports a height of at least `target`, returning the
/// height observed.
pub async fn wait_for_height<C>(
    cancel: &CancellationToken,
    chain: &C,
    target: BlockHeight,
    config: &PollConfig,
) -> Result<BlockHeight, ChainError>
where
    C: ChainQuerier + ?Sized,
{
    // The check cannot fail, so the open-ended window never exhausts: the
    // first height at or above `target` ends the poll.
    let window = PollWindow::from_delta(target, u64::MAX);
    let poller = BlockPoller::with_config(ChainHeight::new(chain), config.clone());
    let reached = poller
        .poll(cancel, window, |height| ready(Ok::<_, PollFailure>(height)))
        .await?;

    debug!(chain = chain.name(), %target, %reached, "Reached height");
    Ok(reached)
}

/// Wait until every chain has produced `delta` blocks past the height it
/// reported when this was called. Chains are waited on concurrently.
pub async fn wait_for_blocks(
    cancel: &CancellationToken,
    delta: u64,
    chains: &[&dyn ChainQuerier],
    config: &PollConfig,
) -> Result<(), ChainError> {
    try_join_all(chains.iter().map(|chain| async move {
        let start = chain.height().await.map_err(|e| ChainError::Height {
            chain: chain.name().to_string(),
            reason: e.to_string(),
        })?;
        wait_for_height(cancel, *chain, start.saturating_add(delta), config).await
    }))
    .await?;
    Ok(())
}
