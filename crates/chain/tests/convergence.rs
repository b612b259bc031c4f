//! Balance and proposal convergence against an in-memory chain.

use blockpoll_chain::{
    poll_for_balance, poll_for_proposal_status, wait_for_blocks, wait_for_height, ChainError,
    ChainQuerier,
};
use blockpoll_poller::{PollConfig, PollError};
use blockpoll_test_helpers::MockChain;
use blockpoll_types::{
    BlockHeight, ProposalResponse, WalletAmount, PROPOSAL_STATUS_PASSED,
    PROPOSAL_STATUS_VOTING_PERIOD,
};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

const OSMO_USER: &str = "osmo1qnk2n4nlkpw9xfqntladh74w6ujtulwnmxnh3k";

fn config() -> PollConfig {
    PollConfig::default().with_poll_interval(Duration::from_millis(200))
}

#[tokio::test(start_paused = true)]
async fn test_balance_converges_when_transfer_lands() {
    let chain = MockChain::ticking("osmosis", 100, Duration::from_secs(1));
    chain.set_balance(OSMO_USER, "uosmo", 1_000);
    chain.schedule_balance(OSMO_USER, "uosmo", 1_100, 103);
    let cancel = CancellationToken::new();

    poll_for_balance(
        &cancel,
        &chain,
        5,
        &WalletAmount::new(OSMO_USER, "uosmo", 1_100),
        &config(),
    )
    .await
    .unwrap();

    assert_eq!(chain.current(), BlockHeight(103));
}

#[tokio::test(start_paused = true)]
async fn test_balance_mismatch_exhausts_window() {
    let chain = MockChain::ticking("osmosis", 100, Duration::from_secs(1));
    chain.set_balance(OSMO_USER, "uosmo", 500);
    let cancel = CancellationToken::new();

    let err = poll_for_balance(
        &cancel,
        &chain,
        2,
        &WalletAmount::new(OSMO_USER, "uosmo", 999),
        &config(),
    )
    .await
    .unwrap_err();

    match err {
        ChainError::Poll(PollError::Exhausted {
            last_height,
            reason,
        }) => {
            assert_eq!(last_height, BlockHeight(102));
            assert_eq!(reason, "balance (500) does not match expected: (999)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // One balance query per block in [100, 102].
    assert_eq!(chain.queries(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_balance_query_failures_mean_not_yet() {
    let chain = MockChain::ticking("juno", 10, Duration::from_secs(1));
    chain.set_balance(OSMO_USER, "ujuno", 42);
    chain.fail_queries_below(12);
    let cancel = CancellationToken::new();

    poll_for_balance(
        &cancel,
        &chain,
        3,
        &WalletAmount::new(OSMO_USER, "ujuno", 42),
        &config(),
    )
    .await
    .unwrap();

    assert_eq!(chain.queries(), 3);
}

#[tokio::test]
async fn test_balance_fails_when_start_height_unavailable() {
    let chain = MockChain::new("gaia", 7);
    chain.fail_next_height_reads(1);
    let cancel = CancellationToken::new();

    let err = poll_for_balance(
        &cancel,
        &chain,
        5,
        &WalletAmount::new(OSMO_USER, "uatom", 1),
        &config(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ChainError::Height { ref chain, .. } if chain == "gaia"));
    assert_eq!(chain.queries(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_proposal_reaches_passed_status() {
    let chain = MockChain::ticking("juno", 200, Duration::from_secs(1));
    let mut proposal = ProposalResponse::new("1", PROPOSAL_STATUS_VOTING_PERIOD);
    proposal.content.title = "Enable packet forwarding".to_string();
    chain.set_proposal(proposal.clone());

    proposal.status = PROPOSAL_STATUS_PASSED.to_string();
    proposal.final_tally_result.yes = "1000".to_string();
    chain.schedule_proposal(proposal, 205);
    let cancel = CancellationToken::new();

    let passed = poll_for_proposal_status(
        &cancel,
        &chain,
        BlockHeight(200),
        BlockHeight(210),
        "1",
        PROPOSAL_STATUS_PASSED,
        &config(),
    )
    .await
    .unwrap();

    assert_eq!(passed.status, PROPOSAL_STATUS_PASSED);
    assert_eq!(passed.content.title, "Enable packet forwarding");
    assert_eq!(passed.final_tally_result.yes, "1000");
    assert_eq!(chain.current(), BlockHeight(205));
}

#[tokio::test(start_paused = true)]
async fn test_proposal_missing_until_submitted() {
    let chain = MockChain::ticking("juno", 50, Duration::from_secs(1));
    chain.schedule_proposal(ProposalResponse::new("4", PROPOSAL_STATUS_VOTING_PERIOD), 52);
    let cancel = CancellationToken::new();

    let proposal = poll_for_proposal_status(
        &cancel,
        &chain,
        BlockHeight(50),
        BlockHeight(55),
        "4",
        PROPOSAL_STATUS_VOTING_PERIOD,
        &config(),
    )
    .await
    .unwrap();

    assert_eq!(proposal.proposal_id, "4");
    assert_eq!(chain.queries(), 3);
}

#[tokio::test]
async fn test_proposal_inverted_window() {
    let chain = MockChain::new("juno", 20);
    chain.set_proposal(ProposalResponse::new("1", PROPOSAL_STATUS_PASSED));
    let cancel = CancellationToken::new();

    let err = poll_for_proposal_status(
        &cancel,
        &chain,
        BlockHeight(20),
        BlockHeight(10),
        "1",
        PROPOSAL_STATUS_PASSED,
        &config(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ChainError::Poll(PollError::InvalidWindow(_))));
    assert_eq!(chain.queries(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_proposal_deadline() {
    // Chain halted below the window.
    let chain = MockChain::new("juno", 3);
    let cancel = CancellationToken::new();

    let err = poll_for_proposal_status(
        &cancel,
        &chain,
        BlockHeight(10),
        BlockHeight(20),
        "1",
        PROPOSAL_STATUS_PASSED,
        &config().with_deadline(Duration::from_secs(30)),
    )
    .await
    .unwrap_err();

    assert!(err.is_cancelled());
    assert!(matches!(err, ChainError::Poll(PollError::DeadlineExceeded(_))));
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_blocks_on_all_chains() {
    let fast = MockChain::ticking("osmosis", 1_000, Duration::from_secs(1));
    let slow = MockChain::ticking("gaia", 40, Duration::from_secs(6));
    let cancel = CancellationToken::new();
    let started = Instant::now();

    wait_for_blocks(&cancel, 3, &[&fast, &slow], &config())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(18));
    assert!(fast.height().await.unwrap() >= BlockHeight(1_003));
    assert_eq!(slow.height().await.unwrap(), BlockHeight(43));
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_height_cancelled() {
    let chain = MockChain::new("gaia", 1);
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            cancel.cancel();
        })
    };

    let err = wait_for_height(&cancel, &chain, BlockHeight(100), &config())
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(err.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_height_returns_reached_height() {
    let chain = MockChain::new("gaia", 9);
    let cancel = CancellationToken::new();

    let reached = wait_for_height(&cancel, &chain, BlockHeight(5), &config())
        .await
        .unwrap();

    assert_eq!(reached, BlockHeight(9));
}
