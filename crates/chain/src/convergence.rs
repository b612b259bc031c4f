//! Balance and proposal-status convergence.

use crate::{ChainError, ChainHeight, ChainQuerier};
use blockpoll_poller::{BlockPoller, PollConfig, PollFailure};
use blockpoll_types::{BlockHeight, PollWindow, ProposalResponse, WalletAmount};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Poll until `expected.address` holds exactly `expected.amount` of
/// `expected.denom`.
///
/// The window starts at the chain's height when this is called and spans the
/// next `delta_blocks` blocks. Failed balance queries count as "not yet".
pub async fn poll_for_balance<C>(
    cancel: &CancellationToken,
    chain: &C,
    delta_blocks: u64,
    expected: &WalletAmount,
    config: &PollConfig,
) -> Result<(), ChainError>
where
    C: ChainQuerier + ?Sized,
{
    let start = chain.height().await.map_err(|e| ChainError::Height {
        chain: chain.name().to_string(),
        reason: e.to_string(),
    })?;
    let window = PollWindow::from_delta(start, delta_blocks);
    let poller = BlockPoller::with_config(ChainHeight::new(chain), config.clone());

    poller
        .poll(cancel, window, |_height| async move {
            let amount = chain
                .balance(&expected.address, &expected.denom)
                .await
                .map_err(PollFailure::mismatch)?;
            if amount != expected.amount {
                return Err(PollFailure::mismatch(format!(
                    "balance ({}) does not match expected: ({})",
                    amount, expected.amount
                )));
            }
            Ok(())
        })
        .await?;

    info!(chain = chain.name(), %expected, %window, "Balance converged");
    Ok(())
}

/// Poll until proposal `proposal_id` reports `status`, returning the record
/// as seen at that point.
///
/// Every query failure, including a proposal that does not exist yet, counts
/// as "not yet".
pub async fn poll_for_proposal_status<C>(
    cancel: &CancellationToken,
    chain: &C,
    start: BlockHeight,
    max: BlockHeight,
    proposal_id: &str,
    status: &str,
    config: &PollConfig,
) -> Result<ProposalResponse, ChainError>
where
    C: ChainQuerier + ?Sized,
{
    let poller = BlockPoller::with_config(ChainHeight::new(chain), config.clone());

    let proposal = poller
        .poll_range(cancel, start, max, |_height| async move {
            let proposal = chain
                .proposal(proposal_id)
                .await
                .map_err(PollFailure::mismatch)?;
            if proposal.status != status {
                return Err(PollFailure::mismatch(format!(
                    "proposal status ({}) does not match expected: ({})",
                    proposal.status, status
                )));
            }
            Ok(proposal)
        })
        .await?;

    info!(
        chain = chain.name(),
        proposal_id,
        status,
        "Proposal status converged"
    );
    Ok(proposal)
}
